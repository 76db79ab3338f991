//! Fixed-size binary encoding for substrate values.
//!
//! Every value has a constant encoded size and native byte order, so a
//! property block is just its fields laid end to end:
//!
//! | value        | bytes | layout                           |
//! |--------------|-------|----------------------------------|
//! | `u8`         | 1     |                                  |
//! | `u32`/`i32`  | 4     | native endian                    |
//! | `f32`        | 4     | native endian                    |
//! | `u64`        | 8     | native endian                    |
//! | `Length`     | 8     | f32 value, u8 unit tag, 3 zero   |
//! | `Alignment`  | 1     | packed bits                      |
//! | `Rgba`       | 4     | packed ARGB u32                  |
//! | `Composite`  | N * T | components in order              |

use crate::error::{BufferError, Result};
use crate::types::{Alignment, Composite, Length, LengthUnit, Rgba};

pub trait FixedCodec: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Append exactly `SIZE` bytes.
    fn encode(&self, out: &mut Vec<u8>);

    /// Read from the start of `bytes`. Trailing bytes are ignored.
    fn decode(bytes: &[u8]) -> Result<Self>;
}

/// Copy `N` bytes at `at`, or report how many were needed.
#[inline]
pub(crate) fn read_array<const N: usize>(bytes: &[u8], at: usize) -> Result<[u8; N]> {
    let needed = at.saturating_add(N);
    bytes
        .get(at..needed)
        .and_then(|s| <[u8; N]>::try_from(s).ok())
        .ok_or(BufferError::BufferTooSmall { len: bytes.len(), needed })
}

#[inline]
pub(crate) fn ensure_len(bytes: &[u8], needed: usize) -> Result<()> {
    if bytes.len() < needed {
        return Err(BufferError::BufferTooSmall { len: bytes.len(), needed });
    }
    Ok(())
}

/// Zero padding up to a field boundary.
#[inline]
pub(crate) fn pad(out: &mut Vec<u8>, n: usize) {
    out.resize(out.len() + n, 0);
}

#[inline]
pub(crate) fn read_u32(bytes: &[u8], at: usize) -> Result<u32> {
    read_array(bytes, at).map(u32::from_ne_bytes)
}

#[inline]
pub(crate) fn read_i32(bytes: &[u8], at: usize) -> Result<i32> {
    read_array(bytes, at).map(i32::from_ne_bytes)
}

#[inline]
pub(crate) fn read_u64(bytes: &[u8], at: usize) -> Result<u64> {
    read_array(bytes, at).map(u64::from_ne_bytes)
}

// =============================================================================
// Primitives
// =============================================================================

macro_rules! primitive_codec {
    ($($ty:ty),*) => {$(
        impl FixedCodec for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();

            #[inline]
            fn encode(&self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_ne_bytes());
            }

            #[inline]
            fn decode(bytes: &[u8]) -> Result<Self> {
                read_array(bytes, 0).map(<$ty>::from_ne_bytes)
            }
        }
    )*};
}

primitive_codec!(u8, u32, i32, u64, f32);

// =============================================================================
// Substrate values
// =============================================================================

impl FixedCodec for Length {
    const SIZE: usize = 8;

    fn encode(&self, out: &mut Vec<u8>) {
        self.value().encode(out);
        out.push(self.unit() as u8);
        pad(out, 3);
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; 8] = read_array(bytes, 0)?;
        let value = f32::from_ne_bytes([raw[0], raw[1], raw[2], raw[3]]);
        let unit = LengthUnit::from_u8(raw[4]).ok_or(BufferError::InvalidLengthUnit(raw[4]))?;
        Ok(Length::new(value, unit))
    }
}

impl FixedCodec for Alignment {
    const SIZE: usize = 1;

    fn encode(&self, out: &mut Vec<u8>) {
        out.push(self.bits());
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        let [bits] = read_array(bytes, 0)?;
        Alignment::from_bits(bits).ok_or(BufferError::InvalidAlignment(bits))
    }
}

impl FixedCodec for Rgba {
    const SIZE: usize = 4;

    fn encode(&self, out: &mut Vec<u8>) {
        self.to_packed().encode(out);
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        read_u32(bytes, 0).map(Rgba::from_packed)
    }
}

impl<T: FixedCodec + Copy + Default, const N: usize> FixedCodec for Composite<T, N> {
    const SIZE: usize = T::SIZE * N;

    fn encode(&self, out: &mut Vec<u8>) {
        for component in self.iter() {
            component.encode(out);
        }
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        ensure_len(bytes, Self::SIZE)?;
        let mut components = [T::default(); N];
        for (i, slot) in components.iter_mut().enumerate() {
            *slot = T::decode(&bytes[i * T::SIZE..])?;
        }
        Ok(Composite::new(components))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Composite2, Composite4, LengthExt};

    fn encoded<T: FixedCodec>(value: &T) -> Vec<u8> {
        let mut out = Vec::new();
        value.encode(&mut out);
        assert_eq!(out.len(), T::SIZE);
        out
    }

    #[test]
    fn test_length_layout() {
        let bytes = encoded(&2.5_f32.em());
        assert_eq!(&bytes[..4], &2.5f32.to_ne_bytes());
        assert_eq!(&bytes[4..], &[LengthUnit::ElementSize as u8, 0, 0, 0]);
        assert_eq!(Length::decode(&bytes), Ok(2.5_f32.em()));
    }

    #[test]
    fn test_length_rejects_unknown_unit() {
        let mut bytes = encoded(&1_i32.px());
        bytes[4] = 0b1100;
        assert_eq!(Length::decode(&bytes), Err(BufferError::InvalidLengthUnit(0b1100)));
    }

    #[test]
    fn test_alignment_rejects_high_bits() {
        assert_eq!(Alignment::decode(&[0x10]), Err(BufferError::InvalidAlignment(0x10)));
        assert_eq!(Alignment::decode(&[0b0101]), Ok(Alignment::CENTER));
    }

    #[test]
    fn test_nested_composite_size() {
        type Radii = Composite4<Composite2<Length>>;
        assert_eq!(Radii::SIZE, 64);
        let radii = Radii::splat(Composite2::pair(4_i32.px(), 2_i32.px()));
        let bytes = encoded(&radii);
        assert_eq!(Radii::decode(&bytes), Ok(radii));
    }

    #[test]
    fn test_short_input() {
        assert_eq!(
            Composite4::<u32>::decode(&[0; 15]),
            Err(BufferError::BufferTooSmall { len: 15, needed: 16 })
        );
        assert_eq!(read_u32(&[1, 2], 0), Err(BufferError::BufferTooSmall { len: 2, needed: 4 }));
    }
}
