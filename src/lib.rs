//! # spark-nodebuf
//!
//! Packed UI node buffers and UTF-8 text blobs.
//!
//! ## Architecture
//!
//! A producer lays a UI tree out as one contiguous byte buffer; consumers
//! read it in place without copying or parsing into objects:
//!
//! ```text
//! [total_size: u64][record 0][record 1]...[record n-1]
//!
//! record: [header: 48 bytes][child ids: u32 * child_count][payload]
//!          |
//!          +-- element_id, node_id, size, constraints, layout, child_count
//! ```
//!
//! A record's `size` is the distance to the next sibling record, so the
//! buffer is walked by hopping from record to record. The payload holds a
//! node-kind struct (box or text), its property blocks and text blobs,
//! reached through typed offset handles.
//!
//! The buffer is validated once on construction. Traversal and header
//! reads after that cannot fail.
//!
//! ## Modules
//!
//! - [`node`] - Record headers, validated buffers, traversal, the builder
//! - [`text`] - UTF-8 text blobs, BOM detection, code-point decoding
//! - [`types`] - Length, Alignment, Composite, bit fields, colors
//! - [`blocks`] - Property blocks, block handles, node kinds
//! - [`schema`] - Field layouts of every block, for tooling
//! - [`layout`] - Conversion of box blocks into Taffy styles
//!
//! ## Example
//!
//! ```
//! use spark_nodebuf::{NodeBufferBuilder, NodeSpec};
//!
//! let mut builder = NodeBufferBuilder::new();
//! builder.push(&NodeSpec::new(1).children([2, 3]))?;
//! builder.push(&NodeSpec::new(2))?;
//! builder.push(&NodeSpec::new(3))?;
//! let buffer = builder.finish()?;
//!
//! let ids: Vec<u32> = buffer.iter().map(|n| n.node_id()).collect();
//! assert_eq!(ids, [1, 2, 3]);
//!
//! let root = buffer.view().find(1).unwrap();
//! assert_eq!(root.children_ids().collect::<Vec<_>>(), [2, 3]);
//! # Ok::<(), spark_nodebuf::BufferError>(())
//! ```

pub mod blocks;
pub mod codec;
pub mod error;
pub mod layout;
pub mod node;
pub mod schema;
pub mod text;
pub mod types;

// Re-export commonly used items
pub use error::{BufferError, Result};

pub use node::{
    BuildFlags, BuilderConfig, NodeBuffer, NodeBufferBuilder, NodeBufferMut, NodeBufferView,
    NodeHandle, NodeHeader, NodeOffset, NodeSpec,
};

pub use text::{ByteOrderMark, TextBlob, TextEncoding, Utf8Text, Utf8TextRef};

pub use blocks::{
    Border, BoxConstraints, BoxLayout, BoxLayoutDirection, BoxModel, BoxNode, BoxProperties,
    PropertyBlock, PropertyBlockHandle, TextHandle, TextNode,
};

pub use types::{
    Alignment, BitField, Composite, Length, LengthContext, LengthExt, LengthUnit, Rgba,
};
