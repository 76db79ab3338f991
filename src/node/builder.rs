//! Single-pass producer for node buffers.
//!
//! Records are appended in the order they are pushed. Each record's payload
//! is written in one go, so block handles can be computed from the current
//! write position.

use std::collections::HashSet;

use super::buffer::{NodeBuffer, NodeOffset};
use super::header::{Constraints, Layout, NodeHeader, HEADER_SIZE, TOTAL_SIZE_BYTES};
use crate::blocks::{
    BoxModel, BoxNode, BoxProperties, NodeKind, PropertyBlock, PropertyBlockHandle, TextHandle,
    TextNode,
};
use crate::codec::{pad, FixedCodec};
use crate::error::{BufferError, Result};
use crate::text::encode_into;

// =============================================================================
// Configuration
// =============================================================================

bitflags::bitflags! {
    /// Producer checks. Empty by default.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BuildFlags: u8 {
        /// Fail a push whose node id was already written. Without it the
        /// record is kept and id lookups resolve to the later one.
        const REJECT_DUPLICATE_IDS = 1 << 0;
        /// Fail `finish` when a child id names no record in the buffer.
        const VERIFY_CHILD_IDS = 1 << 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Bytes to reserve up front.
    pub initial_capacity: usize,
    pub flags: BuildFlags,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self { initial_capacity: 4096, flags: BuildFlags::empty() }
    }
}

// =============================================================================
// NodeSpec
// =============================================================================

/// Everything the header needs for one node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeSpec {
    pub element_id: u32,
    pub node_id: u32,
    pub constraints: Constraints,
    pub layout: Layout,
    pub children: Vec<u32>,
}

impl NodeSpec {
    pub fn new(node_id: u32) -> Self {
        Self { node_id, ..Self::default() }
    }

    pub fn element(mut self, element_id: u32) -> Self {
        self.element_id = element_id;
        self
    }

    pub fn children(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.children = ids.into_iter().collect();
        self
    }

    pub fn constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

// =============================================================================
// Builder
// =============================================================================

#[derive(Debug)]
pub struct NodeBufferBuilder {
    bytes: Vec<u8>,
    flags: BuildFlags,
    ids: HashSet<u32>,
    edges: Vec<(u32, u32)>,
    records: usize,
}

impl Default for NodeBufferBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeBufferBuilder {
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        let mut bytes = Vec::with_capacity(config.initial_capacity.max(TOTAL_SIZE_BYTES));
        bytes.resize(TOTAL_SIZE_BYTES, 0);
        Self { bytes, flags: config.flags, ids: HashSet::new(), edges: Vec::new(), records: 0 }
    }

    /// Records pushed so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.records
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// A record with only its child ids.
    pub fn push(&mut self, spec: &NodeSpec) -> Result<NodeOffset> {
        self.push_with_payload(spec, &[])
    }

    /// A record whose child ids are followed by opaque `payload` bytes.
    pub fn push_with_payload(&mut self, spec: &NodeSpec, payload: &[u8]) -> Result<NodeOffset> {
        self.write_record(spec, |out| {
            out.extend_from_slice(payload);
            Ok(())
        })
    }

    /// A box node followed by whichever blocks `props` carries.
    pub fn push_box(&mut self, spec: &NodeSpec, props: &BoxProperties) -> Result<NodeOffset> {
        check_children::<BoxNode>(spec)?;
        self.write_record(spec, |out| {
            let at = reserve::<BoxNode>(out);
            let node = BoxNode {
                constraints: attach(out, props.constraints.as_ref()),
                layout: attach(out, props.layout.as_ref()),
                model: attach(out, props.model.as_ref()),
                border: attach(out, props.border.as_ref()),
            };
            patch(out, at, &node);
            Ok(())
        })
    }

    /// A leaf text node: the node struct, the text blob, then the box model
    /// if given.
    pub fn push_text(&mut self, spec: &NodeSpec, text: &str, model: Option<&BoxModel>) -> Result<NodeOffset> {
        check_children::<TextNode>(spec)?;
        self.write_record(spec, |out| {
            let at = reserve::<TextNode>(out);
            let content = TextHandle::from_offset(out.len() as u64);
            encode_into(text, out)?;
            let node = TextNode { content, model: attach(out, model) };
            patch(out, at, &node);
            Ok(())
        })
    }

    /// Seal the buffer.
    pub fn finish(mut self) -> Result<NodeBuffer> {
        if self.flags.contains(BuildFlags::VERIFY_CHILD_IDS) {
            if let Some(&(parent, child)) = self.edges.iter().find(|(_, child)| !self.ids.contains(child)) {
                tracing::debug!(parent, child, "child id names no record");
                return Err(BufferError::UnknownChild { parent, child });
            }
        }
        let total = self.bytes.len() as u64;
        self.bytes[..TOTAL_SIZE_BYTES].copy_from_slice(&total.to_ne_bytes());
        tracing::debug!(records = self.records, bytes = total, "node buffer built");
        Ok(NodeBuffer::from_built(self.bytes))
    }

    fn write_record(
        &mut self,
        spec: &NodeSpec,
        write_payload: impl FnOnce(&mut Vec<u8>) -> Result<()>,
    ) -> Result<NodeOffset> {
        let duplicate = self.ids.contains(&spec.node_id);
        if duplicate && self.flags.contains(BuildFlags::REJECT_DUPLICATE_IDS) {
            return Err(BufferError::DuplicateNodeId(spec.node_id));
        }
        let child_count = i32::try_from(spec.children.len()).map_err(|_| {
            BufferError::TooManyChildren { kind: "Node", max: i32::MAX as usize, count: spec.children.len() }
        })?;

        let start = self.bytes.len();
        pad(&mut self.bytes, HEADER_SIZE);
        for id in &spec.children {
            self.bytes.extend_from_slice(&id.to_ne_bytes());
        }
        if let Err(error) = write_payload(&mut self.bytes) {
            self.bytes.truncate(start);
            return Err(error);
        }

        let payload = self.bytes.len() - start - HEADER_SIZE;
        let Ok(size) = u32::try_from(payload) else {
            self.bytes.truncate(start);
            return Err(BufferError::PayloadTooLarge(payload));
        };

        let header = NodeHeader {
            element_id: spec.element_id,
            node_id: spec.node_id,
            size,
            constraints: spec.constraints,
            layout: spec.layout,
            child_count,
        };
        self.bytes[start..start + HEADER_SIZE].copy_from_slice(header.as_bytes());

        if duplicate {
            tracing::warn!(node_id = spec.node_id, offset = start, "duplicate node id, later record wins lookups");
        }
        self.ids.insert(spec.node_id);
        if self.flags.contains(BuildFlags::VERIFY_CHILD_IDS) {
            self.edges.extend(spec.children.iter().map(|&child| (spec.node_id, child)));
        }
        self.records += 1;
        tracing::trace!(node_id = spec.node_id, offset = start, size, "pushed record");
        Ok(NodeOffset::new(start as u64))
    }
}

fn check_children<K: NodeKind>(spec: &NodeSpec) -> Result<()> {
    if spec.children.len() > K::MAX_CHILDREN {
        return Err(BufferError::TooManyChildren {
            kind: K::NAME,
            max: K::MAX_CHILDREN,
            count: spec.children.len(),
        });
    }
    Ok(())
}

/// Zero space for a node-kind struct, returning where it starts.
fn reserve<K: FixedCodec>(out: &mut Vec<u8>) -> usize {
    let at = out.len();
    pad(out, K::SIZE);
    at
}

fn patch<K: FixedCodec>(out: &mut [u8], at: usize, value: &K) {
    let mut encoded = Vec::with_capacity(K::SIZE);
    value.encode(&mut encoded);
    out[at..at + K::SIZE].copy_from_slice(&encoded);
}

/// Append a block and return its handle.
fn attach<T: PropertyBlock>(out: &mut Vec<u8>, block: Option<&T>) -> PropertyBlockHandle<T> {
    match block {
        Some(block) => {
            let handle = PropertyBlockHandle::from_offset(out.len() as u64);
            block.encode(out);
            handle
        }
        None => PropertyBlockHandle::UNBOUND,
    }
}
