//! Restartable code-point decoder over a raw text blob.

use std::iter::FusedIterator;

use super::bom::{ByteOrderMark, TextEncoding};
use crate::codec::read_i32;
use crate::error::{BufferError, Result};

/// Lazy UTF-8 decoder.
///
/// Reads the lead byte of each sequence to learn its length and stops at
/// the zero terminator. Only well-formed UTF-8 decodes, so every yielded
/// value is a Unicode scalar: overlong forms, surrogates and values past
/// U+10FFFF are rejected. Errors are yielded once; the iterator is fused
/// after that until [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct CodePoints<'a> {
    blob: &'a [u8],
    start: usize,
    cursor: usize,
    done: bool,
}

impl<'a> CodePoints<'a> {
    /// Decode the blob in `blob` (`i32 length | BOM | UTF-8 | 0x00`).
    ///
    /// A missing mark is read as bare UTF-8; any other mark is rejected.
    pub fn new(blob: &'a [u8]) -> Result<Self> {
        read_i32(blob, 0)?;
        let preamble = ByteOrderMark::try_detect(&blob[4..]);
        let start = match preamble {
            Some(bom) if bom.encoding() != TextEncoding::Utf8 => {
                return Err(BufferError::UnsupportedEncoding(bom.encoding()));
            }
            Some(bom) => 4 + bom.len(),
            None => 4,
        };
        Ok(Self::starting_at(blob, start))
    }

    /// Skip header parsing for blobs whose payload offset is already known.
    pub(crate) fn starting_at(blob: &'a [u8], start: usize) -> Self {
        Self { blob, start, cursor: start, done: false }
    }

    /// Rewind to the first code point.
    pub fn reset(&mut self) {
        self.cursor = self.start;
        self.done = false;
    }

    fn fail(&mut self, error: BufferError) -> Option<Result<u32>> {
        self.done = true;
        Some(Err(error))
    }

    fn byte(&self, at: usize) -> Option<u8> {
        self.blob.get(at).copied()
    }
}

impl Iterator for CodePoints<'_> {
    type Item = Result<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let offset = self.cursor - self.start;
        let Some(lead) = self.byte(self.cursor) else {
            return self.fail(BufferError::MissingTerminator);
        };

        let (len, mut value) = match lead {
            0 => {
                self.done = true;
                return None;
            }
            0x01..=0x7F => (1, lead as u32),
            0xC2..=0xDF => (2, (lead & 0x1F) as u32),
            0xE0..=0xEF => (3, (lead & 0x0F) as u32),
            0xF0..=0xF4 => (4, (lead & 0x07) as u32),
            _ => return self.fail(BufferError::InvalidLeadByte { byte: lead, offset }),
        };

        for i in 1..len {
            // The second byte range excludes overlongs, surrogates and > U+10FFFF.
            let (lo, hi) = match (i, lead) {
                (1, 0xE0) => (0xA0, 0xBF),
                (1, 0xED) => (0x80, 0x9F),
                (1, 0xF0) => (0x90, 0xBF),
                (1, 0xF4) => (0x80, 0x8F),
                _ => (0x80, 0xBF),
            };
            match self.byte(self.cursor + i) {
                None => return self.fail(BufferError::MissingTerminator),
                Some(0) => return self.fail(BufferError::TruncatedSequence { offset }),
                Some(b) if !(lo..=hi).contains(&b) => {
                    return self.fail(BufferError::InvalidContinuationByte { byte: b, offset: offset + i });
                }
                Some(b) => value = (value << 6) | (b & 0x3F) as u32,
            }
        }

        self.cursor += len;
        Some(Ok(value))
    }
}

impl FusedIterator for CodePoints<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(payload: &[u8]) -> Vec<u8> {
        let mut out = 0i32.to_ne_bytes().to_vec();
        ByteOrderMark::UTF8.write_to(&mut out);
        out.extend_from_slice(payload);
        out.push(0);
        out
    }

    #[test]
    fn test_decodes_all_lengths() {
        let bytes = blob("aé€😀".as_bytes());
        let points: Vec<u32> = CodePoints::new(&bytes).unwrap().map(|p| p.unwrap()).collect();
        assert_eq!(points, vec![0x61, 0xE9, 0x20AC, 0x1F600]);
    }

    #[test]
    fn test_reset_restarts() {
        let bytes = blob(b"ab");
        let mut it = CodePoints::new(&bytes).unwrap();
        assert_eq!(it.by_ref().count(), 2);
        assert_eq!(it.next(), None);
        it.reset();
        assert_eq!(it.next(), Some(Ok(0x61)));
    }

    #[test]
    fn test_no_mark_is_bare_utf8() {
        let mut bytes = 1i32.to_ne_bytes().to_vec();
        bytes.extend_from_slice(b"z\0");
        let points: Vec<_> = CodePoints::new(&bytes).unwrap().collect();
        assert_eq!(points, vec![Ok(0x7A)]);
    }

    #[test]
    fn test_invalid_lead_byte() {
        let bytes = blob(&[b'a', 0x80, b'b']);
        let mut it = CodePoints::new(&bytes).unwrap();
        assert_eq!(it.next(), Some(Ok(0x61)));
        assert_eq!(it.next(), Some(Err(BufferError::InvalidLeadByte { byte: 0x80, offset: 1 })));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_truncated_and_bad_continuation() {
        let bytes = blob(&[0xE2, 0x82]);
        let mut it = CodePoints::new(&bytes).unwrap();
        assert_eq!(it.next(), Some(Err(BufferError::TruncatedSequence { offset: 0 })));

        let bytes = blob(&[0xC3, 0x41]);
        let mut it = CodePoints::new(&bytes).unwrap();
        assert_eq!(
            it.next(),
            Some(Err(BufferError::InvalidContinuationByte { byte: 0x41, offset: 1 }))
        );
    }

    #[test]
    fn test_rejects_non_scalar_forms() {
        let first = |payload: &[u8]| CodePoints::new(&blob(payload)).unwrap().next();

        // overlong NUL and the other two-byte overlong lead
        assert_eq!(first(&[0xC0, 0x80]), Some(Err(BufferError::InvalidLeadByte { byte: 0xC0, offset: 0 })));
        assert_eq!(first(&[0xC1, 0xBF]), Some(Err(BufferError::InvalidLeadByte { byte: 0xC1, offset: 0 })));
        // past U+10FFFF
        assert_eq!(
            first(&[0xF5, 0x80, 0x80, 0x80]),
            Some(Err(BufferError::InvalidLeadByte { byte: 0xF5, offset: 0 }))
        );
        assert_eq!(
            first(&[0xF4, 0x90, 0x80, 0x80]),
            Some(Err(BufferError::InvalidContinuationByte { byte: 0x90, offset: 1 }))
        );
        // overlong three- and four-byte forms
        assert_eq!(
            first(&[0xE0, 0x80, 0x80]),
            Some(Err(BufferError::InvalidContinuationByte { byte: 0x80, offset: 1 }))
        );
        assert_eq!(
            first(&[0xF0, 0x8F, 0xBF, 0xBF]),
            Some(Err(BufferError::InvalidContinuationByte { byte: 0x8F, offset: 1 }))
        );
        // UTF-16 surrogate U+D800
        assert_eq!(
            first(&[0xED, 0xA0, 0x80]),
            Some(Err(BufferError::InvalidContinuationByte { byte: 0xA0, offset: 1 }))
        );

        // the boundaries themselves still decode
        assert_eq!(first("\u{80}".as_bytes()), Some(Ok(0x80)));
        assert_eq!(first("\u{D7FF}".as_bytes()), Some(Ok(0xD7FF)));
        assert_eq!(first("\u{10FFFF}".as_bytes()), Some(Ok(0x10FFFF)));
    }

    #[test]
    fn test_missing_terminator() {
        let mut bytes = blob(b"a");
        bytes.pop();
        let mut it = CodePoints::new(&bytes).unwrap();
        assert_eq!(it.next(), Some(Ok(0x61)));
        assert_eq!(it.next(), Some(Err(BufferError::MissingTerminator)));
    }

    #[test]
    fn test_rejects_utf16_mark() {
        let mut bytes = 0i32.to_ne_bytes().to_vec();
        bytes.extend_from_slice(&[0xFE, 0xFF, 0, 0]);
        assert_eq!(
            CodePoints::new(&bytes).unwrap_err(),
            BufferError::UnsupportedEncoding(TextEncoding::Utf16Be)
        );
    }
}
