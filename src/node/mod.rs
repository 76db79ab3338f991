//! Node buffer codec: header format, validated buffers, traversal, id
//! indexing and the producer.

mod buffer;
mod builder;
pub mod header;

pub use buffer::{ChildIds, NodeBuffer, NodeBufferMut, NodeBufferView, NodeHandle, NodeOffset, Nodes};
pub use builder::{BuildFlags, BuilderConfig, NodeBufferBuilder, NodeSpec};
pub use header::{Constraints, Layout, NodeHeader, Vec2, HEADER_SIZE};
