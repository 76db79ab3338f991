//! Layout Module
//!
//! Boundary between the node buffer and [Taffy](https://github.com/DioxusLabs/taffy).
//!
//! # Architecture
//!
//! The bridge does not compute layout. It:
//!
//! 1. Converts box and text node blocks into Taffy styles
//! 2. Provides a measure function for text intrinsic sizing
//!
//! The caller builds the Taffy tree (child ids give the structure), computes
//! it, and writes results back with
//! [`NodeBufferMut::update_layouts`](crate::node::NodeBufferMut::update_layouts).
//!
//! # Example
//!
//! ```ignore
//! use spark_nodebuf::layout::box_style;
//! use spark_nodebuf::types::LengthContext;
//!
//! let ctx = LengthContext::new(80.0, 24.0);
//! for node in buffer.iter() {
//!     let style = box_style(node, &ctx)?;
//!     // tree.new_leaf(style) ...
//! }
//! ```

mod taffy_bridge;

pub use taffy_bridge::{box_style, measure_text, text_style, to_taffy_style};
