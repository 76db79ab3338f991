//! Node kinds: the fixed-size struct a record carries after its child ids.

use super::{BlockKinds, Border, BoxConstraints, BoxLayout, BoxModel, PropertyBlockHandle, TextHandle};
use crate::codec::{ensure_len, FixedCodec};
use crate::error::Result;
use crate::node::NodeBufferView;
use crate::schema::{self, BlockSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Takes part in layout.
    Layout,
    /// Only drawn.
    Render,
}

pub trait NodeKind: FixedCodec + Copy {
    const NAME: &'static str;
    const ROLE: NodeRole;
    /// Upper bound on the child-id list.
    const MAX_CHILDREN: usize = usize::MAX;
    /// Block kinds this node can reference.
    const BLOCKS: BlockKinds;
    const SCHEMA: &'static BlockSchema;
}

// =============================================================================
// BoxNode
// =============================================================================

/// A rectangular container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxNode {
    pub constraints: PropertyBlockHandle<BoxConstraints>,
    pub layout: PropertyBlockHandle<BoxLayout>,
    pub model: PropertyBlockHandle<BoxModel>,
    pub border: PropertyBlockHandle<Border>,
}

impl FixedCodec for BoxNode {
    const SIZE: usize = 32;

    fn encode(&self, out: &mut Vec<u8>) {
        self.constraints.encode(out);
        self.layout.encode(out);
        self.model.encode(out);
        self.border.encode(out);
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        ensure_len(bytes, Self::SIZE)?;
        Ok(Self {
            constraints: PropertyBlockHandle::decode(&bytes[0..])?,
            layout: PropertyBlockHandle::decode(&bytes[8..])?,
            model: PropertyBlockHandle::decode(&bytes[16..])?,
            border: PropertyBlockHandle::decode(&bytes[24..])?,
        })
    }
}

impl NodeKind for BoxNode {
    const NAME: &'static str = "Box";
    const ROLE: NodeRole = NodeRole::Layout;
    const BLOCKS: BlockKinds = BlockKinds::CONSTRAINTS
        .union(BlockKinds::LAYOUT)
        .union(BlockKinds::MODEL)
        .union(BlockKinds::BORDER);
    const SCHEMA: &'static BlockSchema = &schema::BOX_NODE;
}

/// The blocks of a box, resolved. `None` is an unbound handle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxProperties {
    pub constraints: Option<BoxConstraints>,
    pub layout: Option<BoxLayout>,
    pub model: Option<BoxModel>,
    pub border: Option<Border>,
}

impl BoxProperties {
    /// Resolve every bound handle of `node` in `buffer`.
    pub fn load(buffer: &NodeBufferView<'_>, node: &BoxNode) -> Result<Self> {
        Ok(Self {
            constraints: buffer.try_resolve(node.constraints)?,
            layout: buffer.try_resolve(node.layout)?,
            model: buffer.try_resolve(node.model)?,
            border: buffer.try_resolve(node.border)?,
        })
    }
}

// =============================================================================
// TextNode
// =============================================================================

/// A run of text. Always a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextNode {
    pub content: TextHandle,
    pub model: PropertyBlockHandle<BoxModel>,
}

impl FixedCodec for TextNode {
    const SIZE: usize = 16;

    fn encode(&self, out: &mut Vec<u8>) {
        self.content.encode(out);
        self.model.encode(out);
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        ensure_len(bytes, Self::SIZE)?;
        Ok(Self {
            content: TextHandle::decode(&bytes[0..])?,
            model: PropertyBlockHandle::decode(&bytes[8..])?,
        })
    }
}

impl NodeKind for TextNode {
    const NAME: &'static str = "Text";
    const ROLE: NodeRole = NodeRole::Render;
    const MAX_CHILDREN: usize = 0;
    const BLOCKS: BlockKinds = BlockKinds::TEXT.union(BlockKinds::MODEL);
    const SCHEMA: &'static BlockSchema = &schema::TEXT_NODE;
}
