//! Length-prefixed UTF-8 text blobs.
//!
//! ```text
//!   [i32 code-point count][BOM 0-4][UTF-8 payload][0x00]
//! ```
//!
//! The count is in code points, not bytes. Encoding always writes the
//! 3-byte UTF-8 mark.

use super::bom::{ByteOrderMark, TextEncoding};
use super::code_points::CodePoints;
use super::measure;
use crate::codec::read_i32;
use crate::error::{BufferError, Result};

/// Bytes before the payload when the UTF-8 mark is present.
pub const BLOB_PREFIX: usize = 4 + 3;

/// Append the blob encoding of `text` to `out`. Returns the bytes written.
pub fn encode_into(text: &str, out: &mut Vec<u8>) -> Result<usize> {
    if let Some(offset) = text.find('\0') {
        return Err(BufferError::InteriorNul { offset });
    }
    let chars = text.chars().count();
    let count = i32::try_from(chars).map_err(|_| BufferError::TextTooLong { chars })?;

    let start = out.len();
    out.reserve(encoded_len(text));
    out.extend_from_slice(&count.to_ne_bytes());
    ByteOrderMark::UTF8.write_to(out);
    out.extend_from_slice(text.as_bytes());
    out.push(0);
    Ok(out.len() - start)
}

/// Size of the blob [`encode_into`] writes for `text`.
#[inline]
pub fn encoded_len(text: &str) -> usize {
    BLOB_PREFIX + text.len() + 1
}

// =============================================================================
// TextBlob
// =============================================================================

/// Read access shared by owned and borrowed blobs.
pub trait TextBlob {
    /// The whole blob, terminator included.
    fn as_bytes(&self) -> &[u8];

    fn as_str(&self) -> &str;

    /// Declared code-point count.
    fn len(&self) -> usize;

    fn preamble(&self) -> Option<ByteOrderMark>;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// UTF-8 payload, without mark or terminator.
    #[inline]
    fn payload(&self) -> &[u8] {
        self.as_str().as_bytes()
    }

    /// Decode code points straight from the blob bytes.
    fn code_points(&self) -> CodePoints<'_> {
        let bytes = self.as_bytes();
        CodePoints::starting_at(bytes, bytes.len() - self.payload().len() - 1)
    }

    /// Width in terminal cells.
    fn display_width(&self) -> usize {
        measure::display_width(self.as_str())
    }

    fn grapheme_count(&self) -> usize {
        measure::grapheme_count(self.as_str())
    }
}

// =============================================================================
// Borrowed
// =============================================================================

/// A blob inside someone else's memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utf8TextRef<'a> {
    bytes: &'a [u8],
    text: &'a str,
    chars: usize,
    preamble: Option<ByteOrderMark>,
}

impl<'a> Utf8TextRef<'a> {
    /// Validate the blob at the start of `bytes`. Bytes after the
    /// terminator are ignored.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        let declared = read_i32(bytes, 0)?;
        let declared = usize::try_from(declared).map_err(|_| BufferError::NegativeLength(declared))?;

        let preamble = ByteOrderMark::try_detect(&bytes[4..]);
        let start = match preamble {
            Some(bom) if bom.encoding() != TextEncoding::Utf8 => {
                return Err(BufferError::UnsupportedEncoding(bom.encoding()));
            }
            Some(bom) => 4 + bom.len(),
            None => 4,
        };

        let terminator = bytes[start..]
            .iter()
            .position(|&b| b == 0)
            .ok_or(BufferError::MissingTerminator)?;
        let payload = &bytes[start..start + terminator];
        let text = std::str::from_utf8(payload)
            .map_err(|e| BufferError::InvalidUtf8 { valid_up_to: e.valid_up_to() })?;

        let decoded = text.chars().count();
        if decoded != declared {
            tracing::debug!(declared, decoded, "text blob length mismatch");
            return Err(BufferError::LengthMismatch { declared, decoded });
        }

        Ok(Self {
            bytes: &bytes[..start + terminator + 1],
            text,
            chars: declared,
            preamble,
        })
    }

    /// Copy into an owned blob.
    pub fn to_owned_text(&self) -> Utf8Text {
        Utf8Text {
            bytes: self.bytes.into(),
            payload_start: self.bytes.len() - self.text.len() - 1,
            chars: self.chars,
            preamble: self.preamble,
        }
    }
}

impl TextBlob for Utf8TextRef<'_> {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self.bytes
    }

    #[inline]
    fn as_str(&self) -> &str {
        self.text
    }

    #[inline]
    fn len(&self) -> usize {
        self.chars
    }

    #[inline]
    fn preamble(&self) -> Option<ByteOrderMark> {
        self.preamble
    }
}

// =============================================================================
// Owned
// =============================================================================

/// An owned blob. The allocation is released on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utf8Text {
    bytes: Box<[u8]>,
    payload_start: usize,
    chars: usize,
    preamble: Option<ByteOrderMark>,
}

impl Utf8Text {
    pub fn new(text: &str) -> Result<Self> {
        let mut bytes = Vec::with_capacity(encoded_len(text));
        encode_into(text, &mut bytes)?;
        Ok(Self {
            bytes: bytes.into_boxed_slice(),
            payload_start: BLOB_PREFIX,
            chars: text.chars().count(),
            preamble: Some(ByteOrderMark::UTF8),
        })
    }

    /// Validate and copy a foreign blob.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Utf8TextRef::from_bytes(bytes).map(|r| r.to_owned_text())
    }

    /// Borrow as a [`Utf8TextRef`].
    pub fn as_text_ref(&self) -> Utf8TextRef<'_> {
        Utf8TextRef {
            bytes: &self.bytes,
            text: self.as_str(),
            chars: self.chars,
            preamble: self.preamble,
        }
    }

    pub fn into_bytes(self) -> Box<[u8]> {
        self.bytes
    }
}

impl TextBlob for Utf8Text {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    fn as_str(&self) -> &str {
        let payload = &self.bytes[self.payload_start..self.bytes.len() - 1];
        // SAFETY: the payload came from a `&str` or passed `str::from_utf8`,
        // and the bytes are never mutated after construction.
        unsafe { std::str::from_utf8_unchecked(payload) }
    }

    #[inline]
    fn len(&self) -> usize {
        self.chars
    }

    #[inline]
    fn preamble(&self) -> Option<ByteOrderMark> {
        self.preamble
    }
}

impl TryFrom<&str> for Utf8Text {
    type Error = BufferError;

    fn try_from(text: &str) -> Result<Self> {
        Self::new(text)
    }
}

impl std::fmt::Display for Utf8Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
