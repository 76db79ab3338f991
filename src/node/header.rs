//! Fixed-width node header.
//!
//! ```text
//! Offset  Size  Field
//!   0      4    element_id   u32
//!   4      4    node_id      u32   unique per buffer
//!   8      4    size         u32   payload bytes after the header
//!  12     16    constraints  min (x, y), max (x, y)  f32
//!  28     16    layout       position (x, y), size (x, y)  f32
//!  44      4    child_count  i32   child ids follow the header
//! ```
//!
//! All fields are native endian. Records are not aligned inside a buffer,
//! so headers are always copied out with an unaligned read.

use bytemuck::{Pod, Zeroable};

pub const H_ELEMENT_ID: usize = 0;
pub const H_NODE_ID: usize = 4;
pub const H_SIZE: usize = 8;
pub const H_CONSTRAINTS: usize = 12;
pub const H_LAYOUT: usize = 28;
pub const H_CHILD_COUNT: usize = 44;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 48;

/// Bytes taken by the leading total-size field.
pub const TOTAL_SIZE_BYTES: usize = 8;

/// Offset of the first record.
pub const FIRST_RECORD_OFFSET: usize = TOTAL_SIZE_BYTES;

/// Size of one child id.
pub const CHILD_ID_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Resolved min/max size, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Constraints {
    pub minimum: Vec2,
    pub maximum: Vec2,
}

/// Computed rectangle, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Layout {
    pub position: Vec2,
    pub size: Vec2,
}

impl Layout {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { position: Vec2::new(x, y), size: Vec2::new(width, height) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct NodeHeader {
    pub element_id: u32,
    pub node_id: u32,
    pub size: u32,
    pub constraints: Constraints,
    pub layout: Layout,
    pub child_count: i32,
}

impl NodeHeader {
    /// Read a header from the first [`HEADER_SIZE`] bytes of `bytes`.
    #[inline]
    pub fn read(bytes: &[u8]) -> Option<Self> {
        bytes.get(..HEADER_SIZE).map(bytemuck::pod_read_unaligned)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Bytes from the start of this record to the start of the next one.
    #[inline]
    pub fn record_len(&self) -> usize {
        HEADER_SIZE.saturating_add(self.size as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn test_constants_match_layout() {
        assert_eq!(size_of::<NodeHeader>(), HEADER_SIZE);
        assert_eq!(offset_of!(NodeHeader, element_id), H_ELEMENT_ID);
        assert_eq!(offset_of!(NodeHeader, node_id), H_NODE_ID);
        assert_eq!(offset_of!(NodeHeader, size), H_SIZE);
        assert_eq!(offset_of!(NodeHeader, constraints), H_CONSTRAINTS);
        assert_eq!(offset_of!(NodeHeader, layout), H_LAYOUT);
        assert_eq!(offset_of!(NodeHeader, child_count), H_CHILD_COUNT);
    }

    #[test]
    fn test_unaligned_read() {
        let header = NodeHeader {
            element_id: 9,
            node_id: 3,
            size: 8,
            layout: Layout::new(1.0, 2.0, 30.0, 40.0),
            child_count: 2,
            ..NodeHeader::default()
        };
        let mut bytes = vec![0xFFu8];
        bytes.extend_from_slice(header.as_bytes());
        assert_eq!(NodeHeader::read(&bytes[1..]), Some(header));
        assert_eq!(NodeHeader::read(&bytes[2..]), None);
        assert_eq!(header.record_len(), 56);
    }
}
