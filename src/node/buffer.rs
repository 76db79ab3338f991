//! Packed node buffers.
//!
//! ```text
//!   [u64 total size][record][record]...
//!   record = [NodeHeader (48)][child_count x u32 child id][payload...]
//! ```
//!
//! `size` in a header counts every byte after that header up to the next
//! sibling record: child ids plus any node-kind struct, property blocks or
//! text. Nesting is expressed only through child ids.
//!
//! A buffer is validated once, when it is built or adopted. Traversal after
//! that cannot fail.

use std::collections::HashMap;
use std::fmt;
use std::iter::FusedIterator;
use std::slice::ChunksExact;

use bytemuck::Pod;

use super::header::{
    Constraints, Layout, NodeHeader, CHILD_ID_SIZE, FIRST_RECORD_OFFSET, HEADER_SIZE,
    H_CHILD_COUNT, H_CONSTRAINTS, H_ELEMENT_ID, H_LAYOUT, H_NODE_ID, H_SIZE,
};
use crate::blocks::{NodeKind, PropertyBlock, PropertyBlockHandle, TextHandle};
use crate::codec::read_u64;
use crate::error::{BufferError, Result};
use crate::text::Utf8TextRef;

// =============================================================================
// Validation
// =============================================================================

/// Check one record against the buffer bounds and return its header.
fn check_record(bytes: &[u8], offset: usize) -> Result<NodeHeader> {
    let total = bytes.len();
    let header = bytes
        .get(offset..)
        .and_then(NodeHeader::read)
        .ok_or(BufferError::RecordOverrun { offset, end: offset.saturating_add(HEADER_SIZE), total })?;

    let end = offset.saturating_add(header.record_len());
    if offset.checked_add(header.record_len()).is_none_or(|end| end > total) {
        return Err(BufferError::RecordOverrun { offset, end, total });
    }

    let child_count = usize::try_from(header.child_count)
        .map_err(|_| BufferError::NegativeChildCount { offset, count: header.child_count })?;
    child_count
        .checked_mul(CHILD_ID_SIZE)
        .filter(|&bytes| bytes <= header.size as usize)
        .ok_or(BufferError::ChildListOverrun { offset, child_count, size: header.size })?;
    Ok(header)
}

/// Validate a whole buffer. Returns the declared total size.
fn validate(bytes: &[u8]) -> Result<usize> {
    let total = read_u64(bytes, 0)?;
    let total_len = usize::try_from(total)
        .ok()
        .filter(|t| (FIRST_RECORD_OFFSET..=bytes.len()).contains(t))
        .ok_or(BufferError::TotalSizeOutOfRange { total, len: bytes.len() })?;

    let bytes = &bytes[..total_len];
    let mut offset = FIRST_RECORD_OFFSET;
    let mut records = 0usize;
    while offset < total_len {
        let header = check_record(bytes, offset).inspect_err(|error| {
            tracing::debug!(offset, records, %error, "rejected node buffer");
        })?;
        offset += header.record_len();
        records += 1;
    }
    tracing::trace!(records, total = total_len, "validated node buffer");
    Ok(total_len)
}

// =============================================================================
// NodeOffset
// =============================================================================

/// A record position as a byte count from the buffer start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeOffset(u64);

impl NodeOffset {
    #[inline]
    pub const fn new(offset: u64) -> Self {
        Self(offset)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<NodeOffset> for u64 {
    fn from(offset: NodeOffset) -> Self {
        offset.0
    }
}

impl fmt::Display for NodeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

// =============================================================================
// NodeHandle
// =============================================================================

/// A record inside a validated buffer. Borrows the buffer, so it cannot
/// outlive it.
#[derive(Clone, Copy)]
pub struct NodeHandle<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> NodeHandle<'a> {
    #[inline]
    fn read_u32(&self, field: usize) -> u32 {
        let at = self.offset + field;
        let b = &self.buffer[at..at + 4];
        u32::from_ne_bytes([b[0], b[1], b[2], b[3]])
    }

    #[inline]
    pub fn offset(&self) -> NodeOffset {
        NodeOffset(self.offset as u64)
    }

    /// Copy of the full header.
    #[inline]
    pub fn header(&self) -> NodeHeader {
        bytemuck::pod_read_unaligned(&self.buffer[self.offset..self.offset + HEADER_SIZE])
    }

    #[inline] pub fn element_id(&self) -> u32 { self.read_u32(H_ELEMENT_ID) }
    #[inline] pub fn node_id(&self) -> u32 { self.read_u32(H_NODE_ID) }
    #[inline] pub fn size(&self) -> u32 { self.read_u32(H_SIZE) }
    #[inline] pub fn constraints(&self) -> Constraints { self.header().constraints }
    #[inline] pub fn layout(&self) -> Layout { self.header().layout }

    #[inline]
    pub fn child_count(&self) -> usize {
        // Never negative once validated.
        self.read_u32(H_CHILD_COUNT) as usize
    }

    /// The child ids written right after the header.
    pub fn children_ids(&self) -> ChildIds<'a> {
        let start = self.offset + HEADER_SIZE;
        let end = start + self.child_count() * CHILD_ID_SIZE;
        ChildIds(self.buffer[start..end].chunks_exact(CHILD_ID_SIZE))
    }

    /// Header, child ids and payload.
    pub fn record(&self) -> &'a [u8] {
        &self.buffer[self.offset..self.offset + HEADER_SIZE + self.size() as usize]
    }

    /// Bytes after the child ids.
    pub fn payload(&self) -> &'a [u8] {
        &self.record()[HEADER_SIZE + self.child_count() * CHILD_ID_SIZE..]
    }

    /// Decode the node-kind struct at the start of the payload.
    pub fn kind<K: NodeKind>(&self) -> Result<K> {
        let payload = self.payload();
        if payload.len() < K::SIZE {
            return Err(BufferError::PayloadTooSmall {
                kind: K::NAME,
                needed: K::SIZE,
                available: payload.len(),
            });
        }
        K::decode(payload)
    }

    /// The buffer this record lives in.
    #[inline]
    pub fn buffer(&self) -> NodeBufferView<'a> {
        NodeBufferView { bytes: self.buffer }
    }
}

impl PartialEq for NodeHandle<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.buffer, other.buffer) && self.offset == other.offset
    }
}

impl Eq for NodeHandle<'_> {}

impl fmt::Debug for NodeHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeHandle")
            .field("offset", &self.offset)
            .field("node_id", &self.node_id())
            .field("child_count", &self.child_count())
            .finish()
    }
}

/// Iterator over a record's child ids.
#[derive(Debug, Clone)]
pub struct ChildIds<'a>(ChunksExact<'a, u8>);

impl Iterator for ChildIds<'_> {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        self.0.next().map(|b| u32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for ChildIds<'_> {}
impl FusedIterator for ChildIds<'_> {}

// =============================================================================
// Iteration
// =============================================================================

/// Forward, single-pass walk over the records of a buffer.
#[derive(Debug, Clone)]
pub struct Nodes<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = NodeHandle<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.buffer.len() {
            return None;
        }
        let handle = NodeHandle { buffer: self.buffer, offset: self.cursor };
        self.cursor += HEADER_SIZE + handle.size() as usize;
        Some(handle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.cursor);
        (usize::from(remaining > 0), Some(remaining / HEADER_SIZE))
    }
}

impl FusedIterator for Nodes<'_> {}

// =============================================================================
// NodeBufferView
// =============================================================================

/// Read-only view of a validated buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeBufferView<'a> {
    bytes: &'a [u8],
}

impl<'a> NodeBufferView<'a> {
    /// Validate a foreign buffer. Bytes past the declared total are ignored.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        let total = validate(bytes)?;
        Ok(Self { bytes: &bytes[..total] })
    }

    /// The total-size field.
    #[inline]
    pub fn total_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline]
    pub fn iter(&self) -> Nodes<'a> {
        Nodes { buffer: self.bytes, cursor: FIRST_RECORD_OFFSET }
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.len() <= FIRST_RECORD_OFFSET
    }

    /// Map node ids to handles. A repeated id maps to its last record.
    pub fn build_id_to_handle(&self) -> HashMap<u32, NodeHandle<'a>> {
        let mut map = HashMap::new();
        for node in self.iter() {
            if let Some(previous) = map.insert(node.node_id(), node) {
                warn_duplicate(node.node_id(), previous.offset, node.offset);
            }
        }
        map
    }

    /// Map node ids to offsets. A repeated id maps to its last record.
    pub fn build_id_to_offset(&self) -> HashMap<u32, NodeOffset> {
        let mut map = HashMap::new();
        for node in self.iter() {
            if let Some(previous) = map.insert(node.node_id(), node.offset()) {
                warn_duplicate(node.node_id(), previous.0 as usize, node.offset);
            }
        }
        map
    }

    /// Linear search. With repeated ids the last record wins, as in
    /// [`build_id_to_handle`](Self::build_id_to_handle).
    pub fn find(&self, node_id: u32) -> Option<NodeHandle<'a>> {
        self.iter().filter(|n| n.node_id() == node_id).last()
    }

    /// Turn an offset back into a handle. The offset must be a record
    /// start; the buffer is walked to find it, so this is O(records).
    pub fn handle_at(&self, offset: NodeOffset) -> Result<NodeHandle<'a>> {
        let at = usize::try_from(offset.0).map_err(|_| BufferError::InvalidOffset(offset.0))?;
        if at < FIRST_RECORD_OFFSET || at >= self.bytes.len() {
            return Err(BufferError::InvalidOffset(offset.0));
        }
        self.iter()
            .take_while(|n| n.offset <= at)
            .find(|n| n.offset == at)
            .ok_or(BufferError::InvalidOffset(offset.0))
    }

    /// Read the block a handle points at.
    pub fn resolve<T: PropertyBlock>(&self, handle: PropertyBlockHandle<T>) -> Result<T> {
        let bytes = self.block_bytes(handle.offset(), T::NAME, T::SIZE)?;
        T::decode(bytes)
    }

    /// Like [`resolve`](Self::resolve), with `None` for an unbound handle.
    pub fn try_resolve<T: PropertyBlock>(&self, handle: PropertyBlockHandle<T>) -> Result<Option<T>> {
        if handle.is_bound() { self.resolve(handle).map(Some) } else { Ok(None) }
    }

    /// Read the text blob a handle points at.
    pub fn text(&self, handle: TextHandle) -> Result<Utf8TextRef<'a>> {
        let bytes = self.block_bytes(handle.offset(), "Text", 4)?;
        Utf8TextRef::from_bytes(bytes)
    }

    fn block_bytes(&self, offset: u64, block: &'static str, size: usize) -> Result<&'a [u8]> {
        if offset == 0 {
            return Err(BufferError::UnboundPropertyBlock(block));
        }
        let out_of_range = || BufferError::BlockOutOfRange { block, offset, total: self.bytes.len() };
        let at = usize::try_from(offset)
            .ok()
            .filter(|&at| at >= FIRST_RECORD_OFFSET && at.saturating_add(size) <= self.bytes.len())
            .ok_or_else(out_of_range)?;
        Ok(&self.bytes[at..])
    }
}

impl<'a> IntoIterator for NodeBufferView<'a> {
    type Item = NodeHandle<'a>;
    type IntoIter = Nodes<'a>;

    fn into_iter(self) -> Nodes<'a> {
        self.iter()
    }
}

fn warn_duplicate(node_id: u32, previous: usize, current: usize) {
    tracing::warn!(node_id, previous, current, "duplicate node id, keeping the later record");
}

// =============================================================================
// NodeBufferMut
// =============================================================================

/// Read-write view. Rewrites constraint and layout fields in place; the
/// record structure never changes.
#[derive(Debug)]
pub struct NodeBufferMut<'a> {
    bytes: &'a mut [u8],
}

impl<'a> NodeBufferMut<'a> {
    pub fn from_bytes(bytes: &'a mut [u8]) -> Result<Self> {
        let total = validate(bytes)?;
        Ok(Self { bytes: &mut bytes[..total] })
    }

    #[inline]
    pub fn as_view(&self) -> NodeBufferView<'_> {
        NodeBufferView { bytes: self.bytes }
    }

    pub fn set_layout(&mut self, offset: NodeOffset, layout: Layout) -> Result<()> {
        let at = self.record_start(offset)?;
        self.write_pod(at + H_LAYOUT, &layout);
        Ok(())
    }

    pub fn set_constraints(&mut self, offset: NodeOffset, constraints: Constraints) -> Result<()> {
        let at = self.record_start(offset)?;
        self.write_pod(at + H_CONSTRAINTS, &constraints);
        Ok(())
    }

    /// One pass over every record; `f` returns the new layout, or `None` to
    /// leave a record untouched. Returns how many records were rewritten.
    pub fn update_layouts(&mut self, mut f: impl FnMut(&NodeHeader) -> Option<Layout>) -> usize {
        let mut cursor = FIRST_RECORD_OFFSET;
        let mut written = 0;
        while cursor < self.bytes.len() {
            let header: NodeHeader =
                bytemuck::pod_read_unaligned(&self.bytes[cursor..cursor + HEADER_SIZE]);
            if let Some(layout) = f(&header) {
                self.write_pod(cursor + H_LAYOUT, &layout);
                written += 1;
            }
            cursor += header.record_len();
        }
        written
    }

    /// Offsets must name a record start, found by walking the buffer.
    fn record_start(&self, offset: NodeOffset) -> Result<usize> {
        self.as_view().handle_at(offset).map(|n| n.offset)
    }

    fn write_pod<T: Pod>(&mut self, at: usize, value: &T) {
        let src = bytemuck::bytes_of(value);
        self.bytes[at..at + src.len()].copy_from_slice(src);
    }
}

// =============================================================================
// NodeBuffer
// =============================================================================

/// Owner of a validated node buffer.
///
/// Publish to readers behind an `Arc`; to change structure, build a new
/// buffer and swap it in.
#[derive(Clone, PartialEq, Eq)]
pub struct NodeBuffer {
    bytes: Vec<u8>,
}

impl NodeBuffer {
    /// Adopt and validate foreign bytes. Bytes past the declared total are
    /// dropped.
    pub fn from_bytes(mut bytes: Vec<u8>) -> Result<Self> {
        let total = validate(&bytes)?;
        bytes.truncate(total);
        Ok(Self { bytes })
    }

    /// Builder output, valid by construction.
    pub(crate) fn from_built(bytes: Vec<u8>) -> Self {
        debug_assert!(validate(&bytes).is_ok());
        Self { bytes }
    }

    #[inline]
    pub fn view(&self) -> NodeBufferView<'_> {
        NodeBufferView { bytes: &self.bytes }
    }

    #[inline]
    pub fn view_mut(&mut self) -> NodeBufferMut<'_> {
        NodeBufferMut { bytes: &mut self.bytes }
    }

    #[inline]
    pub fn iter(&self) -> Nodes<'_> {
        self.view().iter()
    }

    pub fn node_count(&self) -> usize {
        self.view().node_count()
    }

    #[inline]
    pub fn total_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl TryFrom<Vec<u8>> for NodeBuffer {
    type Error = BufferError;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl<'a> IntoIterator for &'a NodeBuffer {
    type Item = NodeHandle<'a>;
    type IntoIter = Nodes<'a>;

    fn into_iter(self) -> Nodes<'a> {
        self.iter()
    }
}

impl fmt::Debug for NodeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeBuffer")
            .field("total_size", &self.total_size())
            .field("nodes", &self.node_count())
            .finish()
    }
}
