//! Value substrate: the small fixed-size values stored in node headers and
//! property blocks.

mod alignment;
mod bitfield;
mod color;
mod composite;
mod length;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use bitfield::{width_for, BitField, BitField16, BitField32, BitField64, BitField8};
pub use color::Rgba;
pub use composite::{xy, xyz, Composite, Composite1, Composite2, Composite3, Composite4};
pub use length::{Length, LengthContext, LengthExt, LengthUnit};
