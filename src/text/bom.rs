//! Byte-order marks.

use crate::error::{BufferError, Result};

/// Encodings a byte-order mark can announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

/// A 2 to 4 byte mark at the start of a text payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteOrderMark {
    bytes: [u8; 4],
    len: u8,
    encoding: TextEncoding,
}

impl ByteOrderMark {
    pub const UTF8: Self = Self::new([0xEF, 0xBB, 0xBF, 0], 3, TextEncoding::Utf8);
    pub const UTF16_BE: Self = Self::new([0xFE, 0xFF, 0, 0], 2, TextEncoding::Utf16Be);
    pub const UTF16_LE: Self = Self::new([0xFF, 0xFE, 0, 0], 2, TextEncoding::Utf16Le);
    pub const UTF32_BE: Self = Self::new([0, 0, 0xFE, 0xFF], 4, TextEncoding::Utf32Be);
    pub const UTF32_LE: Self = Self::new([0xFF, 0xFE, 0, 0], 4, TextEncoding::Utf32Le);

    /// Detection order. The 16-bit marks come first; see [`detect`](Self::detect)
    /// for how UTF-32LE, which starts with the UTF-16LE mark, still wins.
    pub const CANDIDATES: [Self; 5] =
        [Self::UTF16_LE, Self::UTF16_BE, Self::UTF8, Self::UTF32_LE, Self::UTF32_BE];

    const fn new(bytes: [u8; 4], len: u8, encoding: TextEncoding) -> Self {
        Self { bytes, len, encoding }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Does `bytes` start with this mark?
    #[inline]
    pub fn matches(&self, bytes: &[u8]) -> bool {
        bytes.starts_with(self.as_bytes())
    }

    /// Append the mark.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }

    /// Identify the mark at the start of `bytes`, failing if none matches.
    ///
    /// Candidates are tried in [`CANDIDATES`](Self::CANDIDATES) order. A later
    /// candidate only replaces an earlier match when it is longer, so
    /// `FF FE 00 00` reads as UTF-32LE while `FF FE` alone reads as UTF-16LE.
    pub fn detect(bytes: &[u8]) -> Result<Self> {
        Self::try_detect(bytes).ok_or_else(|| {
            let mut head = [0u8; 4];
            let n = bytes.len().min(4);
            head[..n].copy_from_slice(&bytes[..n]);
            tracing::debug!(?head, "unrecognized byte-order mark");
            BufferError::UnrecognizedPreamble(head)
        })
    }

    /// Like [`detect`](Self::detect), but `None` when nothing matches.
    pub fn try_detect(bytes: &[u8]) -> Option<Self> {
        let mut found: Option<Self> = None;
        for candidate in Self::CANDIDATES {
            if candidate.matches(bytes) && found.is_none_or(|f| candidate.len > f.len) {
                found = Some(candidate);
            }
        }
        found
    }
}
