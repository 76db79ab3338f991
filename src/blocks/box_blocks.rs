//! Box property blocks: constraints, flow layout, box model and border.

use super::{BlockKinds, PropertyBlock};
use crate::codec::{ensure_len, pad, FixedCodec};
use crate::error::{BufferError, Result};
use crate::schema::{self, BlockSchema};
use crate::types::{Alignment, Composite2, Composite4, Length, Rgba};

// =============================================================================
// BoxConstraints
// =============================================================================

/// Size limits. A non-finite maximum means unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxConstraints {
    pub min_width: Length,
    pub max_width: Length,
    pub min_height: Length,
    pub max_height: Length,
}

impl BoxConstraints {
    pub const UNBOUNDED: Length = Length::px(f32::INFINITY);

    /// Exactly `width` by `height`.
    pub const fn fixed(width: Length, height: Length) -> Self {
        Self { min_width: width, max_width: width, min_height: height, max_height: height }
    }
}

impl Default for BoxConstraints {
    fn default() -> Self {
        Self {
            min_width: Length::ZERO,
            max_width: Self::UNBOUNDED,
            min_height: Length::ZERO,
            max_height: Self::UNBOUNDED,
        }
    }
}

impl FixedCodec for BoxConstraints {
    const SIZE: usize = 32;

    fn encode(&self, out: &mut Vec<u8>) {
        self.min_width.encode(out);
        self.max_width.encode(out);
        self.min_height.encode(out);
        self.max_height.encode(out);
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        ensure_len(bytes, Self::SIZE)?;
        Ok(Self {
            min_width: Length::decode(&bytes[0..])?,
            max_width: Length::decode(&bytes[8..])?,
            min_height: Length::decode(&bytes[16..])?,
            max_height: Length::decode(&bytes[24..])?,
        })
    }
}

impl PropertyBlock for BoxConstraints {
    const NAME: &'static str = "BoxConstraints";
    const KIND: BlockKinds = BlockKinds::CONSTRAINTS;
    const SCHEMA: &'static BlockSchema = &schema::BOX_CONSTRAINTS;
}

// =============================================================================
// BoxLayout
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BoxLayoutDirection {
    #[default]
    Row = 0,
    RowReverse = 1,
    Column = 2,
    ColumnReverse = 3,
}

impl BoxLayoutDirection {
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Row),
            1 => Some(Self::RowReverse),
            2 => Some(Self::Column),
            3 => Some(Self::ColumnReverse),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_row(self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    #[inline]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}

/// How a box flows its children.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxLayout {
    pub direction: BoxLayoutDirection,
    /// Gap between children along the main axis.
    pub spacing: Length,
    pub alignment: Alignment,
}

impl FixedCodec for BoxLayout {
    // direction u8 @0, spacing @4, alignment @12
    const SIZE: usize = 16;

    fn encode(&self, out: &mut Vec<u8>) {
        out.push(self.direction as u8);
        pad(out, 3);
        self.spacing.encode(out);
        self.alignment.encode(out);
        pad(out, 3);
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        ensure_len(bytes, Self::SIZE)?;
        let direction =
            BoxLayoutDirection::from_u8(bytes[0]).ok_or(BufferError::InvalidDirection(bytes[0]))?;
        Ok(Self {
            direction,
            spacing: Length::decode(&bytes[4..])?,
            alignment: Alignment::decode(&bytes[12..])?,
        })
    }
}

impl PropertyBlock for BoxLayout {
    const NAME: &'static str = "BoxLayout";
    const KIND: BlockKinds = BlockKinds::LAYOUT;
    const SCHEMA: &'static BlockSchema = &schema::BOX_LAYOUT;
}

// =============================================================================
// BoxModel
// =============================================================================

/// Padding and margin, per edge (top, right, bottom, left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxModel {
    pub padding: Composite4<Length>,
    pub margin: Composite4<Length>,
}

impl FixedCodec for BoxModel {
    const SIZE: usize = 64;

    fn encode(&self, out: &mut Vec<u8>) {
        self.padding.encode(out);
        self.margin.encode(out);
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        ensure_len(bytes, Self::SIZE)?;
        Ok(Self {
            padding: Composite4::decode(&bytes[0..])?,
            margin: Composite4::decode(&bytes[32..])?,
        })
    }
}

impl PropertyBlock for BoxModel {
    const NAME: &'static str = "BoxModel";
    const KIND: BlockKinds = BlockKinds::MODEL;
    const SCHEMA: &'static BlockSchema = &schema::BOX_MODEL;
}

// =============================================================================
// Border
// =============================================================================

/// Border widths and colors per edge, radii per corner.
///
/// Corners run top-left, top-right, bottom-right, bottom-left; each radius
/// is (horizontal, vertical).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Border {
    pub width: Composite4<Length>,
    pub color: Composite4<Rgba>,
    pub radii: Composite4<Composite2<Length>>,
}

impl Border {
    /// Same width and color on every edge, square corners.
    pub fn uniform(width: Length, color: Rgba) -> Self {
        Self {
            width: Composite4::splat(width),
            color: Composite4::splat(color),
            radii: Composite4::default(),
        }
    }
}

impl FixedCodec for Border {
    const SIZE: usize = 112;

    fn encode(&self, out: &mut Vec<u8>) {
        self.width.encode(out);
        self.color.encode(out);
        self.radii.encode(out);
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        ensure_len(bytes, Self::SIZE)?;
        Ok(Self {
            width: Composite4::decode(&bytes[0..])?,
            color: Composite4::decode(&bytes[32..])?,
            radii: Composite4::decode(&bytes[48..])?,
        })
    }
}

impl PropertyBlock for Border {
    const NAME: &'static str = "Border";
    const KIND: BlockKinds = BlockKinds::BORDER;
    const SCHEMA: &'static BlockSchema = &schema::BORDER;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LengthExt;

    fn encoded<T: FixedCodec>(value: &T) -> Vec<u8> {
        let mut out = Vec::new();
        value.encode(&mut out);
        assert_eq!(out.len(), T::SIZE);
        out
    }

    #[test]
    fn test_constraints_default_is_unbounded() {
        let c = BoxConstraints::default();
        assert!(!c.max_width.value().is_finite());
        assert_eq!(BoxConstraints::decode(&encoded(&c)), Ok(c));
    }

    #[test]
    fn test_layout_field_offsets() {
        let layout = BoxLayout {
            direction: BoxLayoutDirection::ColumnReverse,
            spacing: 2_i32.em(),
            alignment: Alignment::BOTTOM_RIGHT,
        };
        let bytes = encoded(&layout);
        assert_eq!(bytes[0], 3);
        assert_eq!(bytes[12], Alignment::BOTTOM_RIGHT.bits());
        assert_eq!(BoxLayout::decode(&bytes), Ok(layout));
    }

    #[test]
    fn test_layout_rejects_direction() {
        let mut bytes = encoded(&BoxLayout::default());
        bytes[0] = 9;
        assert_eq!(BoxLayout::decode(&bytes), Err(BufferError::InvalidDirection(9)));
    }

    #[test]
    fn test_direction_axes() {
        assert!(BoxLayoutDirection::RowReverse.is_row());
        assert!(BoxLayoutDirection::RowReverse.is_reverse());
        assert!(!BoxLayoutDirection::Column.is_row());
        assert_eq!(BoxLayoutDirection::from_u8(4), None);
    }

    #[test]
    fn test_border() {
        let mut border = Border::uniform(1_i32.px(), Rgba::rgb(255, 0, 0));
        border.radii = Composite4::splat(Composite2::pair(4_i32.px(), 2_i32.px()));
        let bytes = encoded(&border);
        assert_eq!(Rgba::decode(&bytes[32..]), Ok(Rgba::rgb(255, 0, 0)));
        assert_eq!(Border::decode(&bytes), Ok(border));
    }

    #[test]
    fn test_short_block() {
        assert_eq!(
            BoxModel::decode(&[0; 63]),
            Err(BufferError::BufferTooSmall { len: 63, needed: 64 })
        );
    }
}
