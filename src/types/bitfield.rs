//! Inline bit fields.
//!
//! A fixed-width integer used as a set of independently addressable flags.
//! Indices must be below the width. Debug builds assert it; release builds
//! wrap the shift, so an out-of-range index touches some other bit.

/// Common operations over every bit-field width.
pub trait BitField: Copy + Default {
    /// Number of addressable bits.
    const WIDTH: u32;

    fn get(&self, index: u32) -> bool;
    fn set(&mut self, index: u32, value: bool);
    fn toggle(&mut self, index: u32);
    /// Every bit to 0.
    fn clear(&mut self);
    /// Every bit to 1.
    fn fill(&mut self);
    fn count_ones(&self) -> u32;

    #[inline]
    fn is_empty(&self) -> bool {
        self.count_ones() == 0
    }
}

macro_rules! bit_field {
    ($(#[$meta:meta])* $name:ident, $int:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[repr(transparent)]
        pub struct $name($int);

        impl $name {
            pub const EMPTY: Self = Self(0);
            pub const FULL: Self = Self(<$int>::MAX);

            #[inline]
            pub const fn from_bits(bits: $int) -> Self {
                Self(bits)
            }

            #[inline]
            pub const fn bits(self) -> $int {
                self.0
            }

            #[inline]
            fn mask(index: u32) -> $int {
                debug_assert!(
                    index < <Self as BitField>::WIDTH,
                    "bit index {index} out of range for {}",
                    stringify!($name)
                );
                (1 as $int).wrapping_shl(index)
            }
        }

        impl BitField for $name {
            const WIDTH: u32 = <$int>::BITS;

            #[inline]
            fn get(&self, index: u32) -> bool {
                self.0 & Self::mask(index) != 0
            }

            #[inline]
            fn set(&mut self, index: u32, value: bool) {
                let mask = Self::mask(index);
                if value {
                    self.0 |= mask;
                } else {
                    self.0 &= !mask;
                }
            }

            #[inline]
            fn toggle(&mut self, index: u32) {
                self.0 ^= Self::mask(index);
            }

            #[inline]
            fn clear(&mut self) {
                self.0 = 0;
            }

            #[inline]
            fn fill(&mut self) {
                self.0 = <$int>::MAX;
            }

            #[inline]
            fn count_ones(&self) -> u32 {
                self.0.count_ones()
            }
        }

        impl From<$int> for $name {
            fn from(bits: $int) -> Self {
                Self(bits)
            }
        }

        impl From<$name> for $int {
            fn from(field: $name) -> Self {
                field.0
            }
        }
    };
}

bit_field!(
    /// Up to 8 flags.
    BitField8, u8
);
bit_field!(
    /// Up to 16 flags.
    BitField16, u16
);
bit_field!(
    /// Up to 32 flags.
    BitField32, u32
);
bit_field!(
    /// Up to 64 flags.
    BitField64, u64
);

/// Smallest field width that holds `bits` flags, or `None` past 64.
pub const fn width_for(bits: u32) -> Option<u32> {
    match bits {
        0..=8 => Some(8),
        9..=16 => Some(16),
        17..=32 => Some(32),
        33..=64 => Some(64),
        _ => None,
    }
}
