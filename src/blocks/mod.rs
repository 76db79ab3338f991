//! Property blocks and the nodes that reference them.
//!
//! A property block is a fixed-size record stored in a record's payload,
//! after the child ids and the node-kind struct. Nodes reach their blocks
//! through typed handles holding an absolute buffer offset:
//!
//! ```text
//!   record: [header][child ids][BoxNode][BoxConstraints][BoxModel]...
//!                                 |  |        ^              ^
//!                                 |  +--------|--------------+
//!                                 +-----------+
//! ```
//!
//! Offset 0 is the buffer's total-size field, so it doubles as "unbound".

mod box_blocks;
mod nodes;

use std::fmt;
use std::marker::PhantomData;

pub use box_blocks::{Border, BoxConstraints, BoxLayout, BoxLayoutDirection, BoxModel};
pub use nodes::{BoxNode, BoxProperties, NodeKind, NodeRole, TextNode};

use crate::codec::FixedCodec;
use crate::error::Result;
use crate::schema::BlockSchema;

// =============================================================================
// Block kinds
// =============================================================================

bitflags::bitflags! {
    /// Block kinds, combined to describe what a node kind can reference.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BlockKinds: u8 {
        const CONSTRAINTS = 1 << 0;
        const LAYOUT = 1 << 1;
        const MODEL = 1 << 2;
        const BORDER = 1 << 3;
        const TEXT = 1 << 4;
    }
}

/// A fixed-size record referenced from nodes.
pub trait PropertyBlock: FixedCodec + Copy + Default {
    const NAME: &'static str;
    const KIND: BlockKinds;
    /// Shared by every node rather than owned per node.
    const GLOBAL: bool = false;
    const SCHEMA: &'static BlockSchema;
}

// =============================================================================
// Handles
// =============================================================================

/// Typed, non-owning reference to a property block.
pub struct PropertyBlockHandle<T> {
    offset: u64,
    _block: PhantomData<fn() -> T>,
}

impl<T> PropertyBlockHandle<T> {
    pub const UNBOUND: Self = Self::from_offset(0);

    /// Raw handle at an absolute buffer offset; 0 is unbound.
    #[inline]
    pub const fn from_offset(offset: u64) -> Self {
        Self { offset, _block: PhantomData }
    }

    #[inline]
    pub const fn offset(self) -> u64 {
        self.offset
    }

    #[inline]
    pub const fn is_bound(self) -> bool {
        self.offset != 0
    }
}

impl<T> Clone for PropertyBlockHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PropertyBlockHandle<T> {}

impl<T> PartialEq for PropertyBlockHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl<T> Eq for PropertyBlockHandle<T> {}

impl<T> Default for PropertyBlockHandle<T> {
    fn default() -> Self {
        Self::UNBOUND
    }
}

impl<T: PropertyBlock> fmt::Debug for PropertyBlockHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bound() {
            write!(f, "{}@{}", T::NAME, self.offset)
        } else {
            write!(f, "{}@unbound", T::NAME)
        }
    }
}

impl<T> FixedCodec for PropertyBlockHandle<T> {
    const SIZE: usize = 8;

    fn encode(&self, out: &mut Vec<u8>) {
        self.offset.encode(out);
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        u64::decode(bytes).map(Self::from_offset)
    }
}

/// Reference to a text blob, same convention as [`PropertyBlockHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextHandle(u64);

impl TextHandle {
    pub const UNBOUND: Self = Self(0);

    #[inline]
    pub const fn from_offset(offset: u64) -> Self {
        Self(offset)
    }

    #[inline]
    pub const fn offset(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_bound(self) -> bool {
        self.0 != 0
    }
}

impl FixedCodec for TextHandle {
    const SIZE: usize = 8;

    fn encode(&self, out: &mut Vec<u8>) {
        self.0.encode(out);
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        u64::decode(bytes).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_binding() {
        let h = PropertyBlockHandle::<BoxModel>::UNBOUND;
        assert!(!h.is_bound());
        assert_eq!(h, PropertyBlockHandle::default());
        assert_eq!(format!("{h:?}"), "BoxModel@unbound");

        let h = PropertyBlockHandle::<BoxModel>::from_offset(120);
        assert!(h.is_bound());
        assert_eq!(format!("{h:?}"), "BoxModel@120");
    }

    #[test]
    fn test_handle_codec() {
        let mut out = Vec::new();
        PropertyBlockHandle::<Border>::from_offset(0xAB).encode(&mut out);
        assert_eq!(out, 0xABu64.to_ne_bytes());
        assert_eq!(TextHandle::decode(&out), Ok(TextHandle::from_offset(0xAB)));
    }
}
