//! Packed alignment.
//!
//! One byte holds both axes:
//!
//! ```text
//!   bit:  7 6 5 4 | 3 2      | 1 0
//!         unused  | vertical | horizontal
//! ```
//!
//! Composition is a bitwise OR, decomposition a mask.

use std::ops::BitOr;

// =============================================================================
// Axes
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum HorizontalAlignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
    Stretch = 3,
}

impl HorizontalAlignment {
    pub const MASK: u8 = 0b0000_0011;

    /// Take the horizontal bits of `bits`; the rest is ignored.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & Self::MASK {
            0 => Self::Left,
            1 => Self::Center,
            2 => Self::Right,
            _ => Self::Stretch,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Vertical values are stored pre-shifted into bits 2-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum VerticalAlignment {
    #[default]
    Top = 0,
    Center = 4,
    Bottom = 8,
    Stretch = 12,
}

impl VerticalAlignment {
    pub const MASK: u8 = 0b0000_1100;

    /// Take the vertical bits of `bits`; the rest is ignored.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & Self::MASK {
            0 => Self::Top,
            4 => Self::Center,
            8 => Self::Bottom,
            _ => Self::Stretch,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

// =============================================================================
// Alignment
// =============================================================================

/// Horizontal and vertical alignment in one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Alignment(u8);

impl Alignment {
    pub const TOP_LEFT: Self = Self::new(HorizontalAlignment::Left, VerticalAlignment::Top);
    pub const TOP_CENTER: Self = Self::new(HorizontalAlignment::Center, VerticalAlignment::Top);
    pub const TOP_RIGHT: Self = Self::new(HorizontalAlignment::Right, VerticalAlignment::Top);
    pub const TOP_STRETCHED: Self = Self::new(HorizontalAlignment::Stretch, VerticalAlignment::Top);
    pub const CENTER_LEFT: Self = Self::new(HorizontalAlignment::Left, VerticalAlignment::Center);
    pub const CENTER: Self = Self::new(HorizontalAlignment::Center, VerticalAlignment::Center);
    pub const CENTER_RIGHT: Self = Self::new(HorizontalAlignment::Right, VerticalAlignment::Center);
    pub const CENTER_STRETCHED_HORIZONTALLY: Self =
        Self::new(HorizontalAlignment::Stretch, VerticalAlignment::Center);
    pub const BOTTOM_LEFT: Self = Self::new(HorizontalAlignment::Left, VerticalAlignment::Bottom);
    pub const BOTTOM_CENTER: Self = Self::new(HorizontalAlignment::Center, VerticalAlignment::Bottom);
    pub const BOTTOM_RIGHT: Self = Self::new(HorizontalAlignment::Right, VerticalAlignment::Bottom);
    pub const BOTTOM_STRETCHED: Self =
        Self::new(HorizontalAlignment::Stretch, VerticalAlignment::Bottom);
    pub const LEFT_STRETCHED: Self = Self::new(HorizontalAlignment::Left, VerticalAlignment::Stretch);
    pub const CENTER_STRETCHED_VERTICALLY: Self =
        Self::new(HorizontalAlignment::Center, VerticalAlignment::Stretch);
    pub const RIGHT_STRETCHED: Self = Self::new(HorizontalAlignment::Right, VerticalAlignment::Stretch);
    pub const STRETCHED: Self = Self::new(HorizontalAlignment::Stretch, VerticalAlignment::Stretch);

    #[inline]
    pub const fn new(horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        Self(horizontal as u8 | vertical as u8)
    }

    /// Parse a packed byte. Bits above 3 make it invalid.
    #[inline]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !(HorizontalAlignment::MASK | VerticalAlignment::MASK) == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn horizontal(self) -> HorizontalAlignment {
        HorizontalAlignment::from_bits(self.0)
    }

    #[inline]
    pub const fn vertical(self) -> VerticalAlignment {
        VerticalAlignment::from_bits(self.0)
    }
}

impl From<HorizontalAlignment> for Alignment {
    fn from(horizontal: HorizontalAlignment) -> Self {
        Self::new(horizontal, VerticalAlignment::Top)
    }
}

impl From<VerticalAlignment> for Alignment {
    fn from(vertical: VerticalAlignment) -> Self {
        Self::new(HorizontalAlignment::Left, vertical)
    }
}

impl From<Alignment> for HorizontalAlignment {
    fn from(alignment: Alignment) -> Self {
        alignment.horizontal()
    }
}

impl From<Alignment> for VerticalAlignment {
    fn from(alignment: Alignment) -> Self {
        alignment.vertical()
    }
}

impl BitOr<VerticalAlignment> for HorizontalAlignment {
    type Output = Alignment;

    fn bitor(self, rhs: VerticalAlignment) -> Alignment {
        Alignment::new(self, rhs)
    }
}

impl BitOr<HorizontalAlignment> for VerticalAlignment {
    type Output = Alignment;

    fn bitor(self, rhs: HorizontalAlignment) -> Alignment {
        Alignment::new(rhs, self)
    }
}
