//! Static field tables for the node header, property blocks and node kinds.
//!
//! Editors and code generators read these to map property names to bytes.
//! Composite fields are flattened, one entry per component, with the
//! component suffix appended (`padding-top`, `radius-top-left-x`).
//!
//! Sizes, block kinds, roles and the global flag are taken from the
//! `PropertyBlock` and `NodeKind` impls, so a table cannot drift from its type.

use crate::blocks::{
    BlockKinds, Border, BoxConstraints, BoxLayout, BoxModel, BoxNode, NodeKind, NodeRole,
    PropertyBlock, TextNode,
};
use crate::codec::FixedCodec;
use crate::node::header::HEADER_SIZE;

// =============================================================================
// Descriptors
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    U32,
    I32,
    F32,
    /// 8 bytes: f32 value + unit tag.
    Length,
    /// Packed 1-byte alignment.
    Alignment,
    /// 1-byte layout direction.
    Direction,
    /// Packed ARGB.
    Rgba,
    /// Absolute offset of a property block, named by block.
    BlockHandle(&'static str),
    /// Absolute offset of a text blob.
    TextHandle,
}

impl FieldKind {
    pub const fn size(self) -> usize {
        match self {
            Self::Alignment | Self::Direction => 1,
            Self::U32 | Self::I32 | Self::F32 | Self::Rgba => 4,
            Self::Length | Self::BlockHandle(_) | Self::TextHandle => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub offset: usize,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSchema {
    pub name: &'static str,
    pub size: usize,
    pub global: bool,
    /// For a block, its own kind; for a node kind, the blocks it references.
    pub blocks: BlockKinds,
    /// Set for node kinds only.
    pub role: Option<NodeRole>,
    pub fields: &'static [FieldDescriptor],
}

impl BlockSchema {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

const fn field(name: &'static str, offset: usize, kind: FieldKind) -> FieldDescriptor {
    FieldDescriptor { name, offset, kind }
}

// =============================================================================
// Tables
// =============================================================================

pub const NODE_HEADER: BlockSchema = BlockSchema {
    name: "NodeHeader",
    size: HEADER_SIZE,
    global: false,
    blocks: BlockKinds::empty(),
    role: None,
    fields: &[
        field("element-id", 0, FieldKind::U32),
        field("node-id", 4, FieldKind::U32),
        field("size", 8, FieldKind::U32),
        field("min-width", 12, FieldKind::F32),
        field("min-height", 16, FieldKind::F32),
        field("max-width", 20, FieldKind::F32),
        field("max-height", 24, FieldKind::F32),
        field("x", 28, FieldKind::F32),
        field("y", 32, FieldKind::F32),
        field("width", 36, FieldKind::F32),
        field("height", 40, FieldKind::F32),
        field("child-count", 44, FieldKind::I32),
    ],
};

pub const BOX_CONSTRAINTS: BlockSchema = BlockSchema {
    name: <BoxConstraints as PropertyBlock>::NAME,
    size: <BoxConstraints as FixedCodec>::SIZE,
    global: <BoxConstraints as PropertyBlock>::GLOBAL,
    blocks: <BoxConstraints as PropertyBlock>::KIND,
    role: None,
    fields: &[
        field("min-width", 0, FieldKind::Length),
        field("max-width", 8, FieldKind::Length),
        field("min-height", 16, FieldKind::Length),
        field("max-height", 24, FieldKind::Length),
    ],
};

pub const BOX_LAYOUT: BlockSchema = BlockSchema {
    name: <BoxLayout as PropertyBlock>::NAME,
    size: <BoxLayout as FixedCodec>::SIZE,
    global: <BoxLayout as PropertyBlock>::GLOBAL,
    blocks: <BoxLayout as PropertyBlock>::KIND,
    role: None,
    fields: &[
        field("direction", 0, FieldKind::Direction),
        field("spacing", 4, FieldKind::Length),
        field("alignment", 12, FieldKind::Alignment),
    ],
};

pub const BOX_MODEL: BlockSchema = BlockSchema {
    name: <BoxModel as PropertyBlock>::NAME,
    size: <BoxModel as FixedCodec>::SIZE,
    global: <BoxModel as PropertyBlock>::GLOBAL,
    blocks: <BoxModel as PropertyBlock>::KIND,
    role: None,
    fields: &[
        field("padding-top", 0, FieldKind::Length),
        field("padding-right", 8, FieldKind::Length),
        field("padding-bottom", 16, FieldKind::Length),
        field("padding-left", 24, FieldKind::Length),
        field("margin-top", 32, FieldKind::Length),
        field("margin-right", 40, FieldKind::Length),
        field("margin-bottom", 48, FieldKind::Length),
        field("margin-left", 56, FieldKind::Length),
    ],
};

pub const BORDER: BlockSchema = BlockSchema {
    name: <Border as PropertyBlock>::NAME,
    size: <Border as FixedCodec>::SIZE,
    global: <Border as PropertyBlock>::GLOBAL,
    blocks: <Border as PropertyBlock>::KIND,
    role: None,
    fields: &[
        field("width-top", 0, FieldKind::Length),
        field("width-right", 8, FieldKind::Length),
        field("width-bottom", 16, FieldKind::Length),
        field("width-left", 24, FieldKind::Length),
        field("color-top", 32, FieldKind::Rgba),
        field("color-right", 36, FieldKind::Rgba),
        field("color-bottom", 40, FieldKind::Rgba),
        field("color-left", 44, FieldKind::Rgba),
        field("radius-top-left-x", 48, FieldKind::Length),
        field("radius-top-left-y", 56, FieldKind::Length),
        field("radius-top-right-x", 64, FieldKind::Length),
        field("radius-top-right-y", 72, FieldKind::Length),
        field("radius-bottom-right-x", 80, FieldKind::Length),
        field("radius-bottom-right-y", 88, FieldKind::Length),
        field("radius-bottom-left-x", 96, FieldKind::Length),
        field("radius-bottom-left-y", 104, FieldKind::Length),
    ],
};

pub const BOX_NODE: BlockSchema = BlockSchema {
    name: <BoxNode as NodeKind>::NAME,
    size: <BoxNode as FixedCodec>::SIZE,
    global: false,
    blocks: <BoxNode as NodeKind>::BLOCKS,
    role: Some(<BoxNode as NodeKind>::ROLE),
    fields: &[
        field("constraints", 0, FieldKind::BlockHandle("BoxConstraints")),
        field("layout", 8, FieldKind::BlockHandle("BoxLayout")),
        field("model", 16, FieldKind::BlockHandle("BoxModel")),
        field("border", 24, FieldKind::BlockHandle("Border")),
    ],
};

pub const TEXT_NODE: BlockSchema = BlockSchema {
    name: <TextNode as NodeKind>::NAME,
    size: <TextNode as FixedCodec>::SIZE,
    global: false,
    blocks: <TextNode as NodeKind>::BLOCKS,
    role: Some(<TextNode as NodeKind>::ROLE),
    fields: &[
        field("content", 0, FieldKind::TextHandle),
        field("model", 8, FieldKind::BlockHandle("BoxModel")),
    ],
};

/// Every table, header first.
pub fn all() -> [&'static BlockSchema; 7] {
    [&NODE_HEADER, &BOX_CONSTRAINTS, &BOX_LAYOUT, &BOX_MODEL, &BORDER, &BOX_NODE, &TEXT_NODE]
}
