//! Text blob encoding, byte-order-mark detection and code-point decoding.

use spark_nodebuf::text::{encode_into, CodePoints, BLOB_PREFIX};
use spark_nodebuf::{BufferError, ByteOrderMark, TextBlob, TextEncoding, Utf8Text, Utf8TextRef};

/// A blob laid out by hand: count, mark, payload, terminator.
fn raw_blob(count: i32, mark: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut out = count.to_ne_bytes().to_vec();
    out.extend_from_slice(mark);
    out.extend_from_slice(payload);
    out.push(0);
    out
}

// =============================================================================
// ENCODING
// =============================================================================

#[test]
fn test_hello_round_trip() {
    let text = Utf8Text::new("héllo").unwrap();
    let points: Vec<u32> = text.code_points().collect::<Result<_, _>>().unwrap();
    let expected: Vec<u32> = "héllo".chars().map(u32::from).collect();
    assert_eq!(points, expected);
    assert_eq!(points, vec![0x68, 0xE9, 0x6C, 0x6C, 0x6F]);

    assert_eq!(text.len(), 5);
    assert_eq!(text.as_str(), "héllo");
    assert_eq!(text.to_string(), "héllo");
}

#[test]
fn test_encoded_layout() {
    let mut out = vec![0xAA];
    let written = encode_into("héllo", &mut out).unwrap();
    // é is two bytes
    assert_eq!(written, BLOB_PREFIX + 6 + 1);
    assert_eq!(&out[1..5], &5i32.to_ne_bytes());
    assert_eq!(&out[5..8], ByteOrderMark::UTF8.as_bytes());
    assert_eq!(&out[8..14], "héllo".as_bytes());
    assert_eq!(out.last(), Some(&0));
}

#[test]
fn test_empty_text() {
    let text = Utf8Text::new("").unwrap();
    assert!(text.is_empty());
    assert_eq!(text.as_bytes().len(), BLOB_PREFIX + 1);
    assert_eq!(text.code_points().count(), 0);
}

#[test]
fn test_rejects_interior_nul() {
    assert_eq!(Utf8Text::new("a\0b"), Err(BufferError::InteriorNul { offset: 1 }));
    let mut out = Vec::new();
    assert!(encode_into("\0", &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn test_wide_and_combining_text() {
    let text = Utf8Text::try_from("日本e\u{301}").unwrap();
    assert_eq!(text.len(), 4);
    assert_eq!(text.grapheme_count(), 3);
    assert_eq!(text.display_width(), 5);
}

// =============================================================================
// BYTE-ORDER MARKS
// =============================================================================

#[test]
fn test_detects_each_mark() {
    let cases: [(&[u8], TextEncoding); 5] = [
        (&[0xEF, 0xBB, 0xBF], TextEncoding::Utf8),
        (&[0xFE, 0xFF], TextEncoding::Utf16Be),
        (&[0xFF, 0xFE], TextEncoding::Utf16Le),
        (&[0x00, 0x00, 0xFE, 0xFF], TextEncoding::Utf32Be),
        (&[0xFF, 0xFE, 0x00, 0x00], TextEncoding::Utf32Le),
    ];
    for (bytes, encoding) in cases {
        assert_eq!(ByteOrderMark::detect(bytes).map(|b| b.encoding()), Ok(encoding));
        assert_eq!(ByteOrderMark::try_detect(bytes).map(|b| b.encoding()), Some(encoding));
    }
}

#[test]
fn test_unknown_mark() {
    let bytes = [0xDE, 0xAD, 0xBE, 0xEF];
    assert_eq!(ByteOrderMark::detect(&bytes), Err(BufferError::UnrecognizedPreamble(bytes)));
    assert_eq!(ByteOrderMark::try_detect(&bytes), None);
}

#[test]
fn test_mark_followed_by_text() {
    let mut bytes = ByteOrderMark::UTF8.as_bytes().to_vec();
    bytes.extend_from_slice(b"abc");
    let bom = ByteOrderMark::detect(&bytes).unwrap();
    assert_eq!(bom, ByteOrderMark::UTF8);
    assert_eq!(bom.len(), 3);
}

// =============================================================================
// DECODING FOREIGN BLOBS
// =============================================================================

#[test]
fn test_blob_without_mark() {
    let bytes = raw_blob(3, &[], b"abc");
    let text = Utf8TextRef::from_bytes(&bytes).unwrap();
    assert_eq!(text.as_str(), "abc");
    assert_eq!(text.preamble(), None);

    let points: Vec<u32> = CodePoints::new(&bytes).unwrap().map(Result::unwrap).collect();
    assert_eq!(points, vec![0x61, 0x62, 0x63]);
}

#[test]
fn test_blob_with_foreign_mark() {
    let bytes = raw_blob(1, &[0xFE, 0xFF], &[0x00, 0x41]);
    assert_eq!(
        Utf8TextRef::from_bytes(&bytes),
        Err(BufferError::UnsupportedEncoding(TextEncoding::Utf16Be))
    );
    assert!(CodePoints::new(&bytes).is_err());
}

#[test]
fn test_blob_length_checks() {
    let bytes = raw_blob(4, ByteOrderMark::UTF8.as_bytes(), b"abc");
    assert_eq!(
        Utf8TextRef::from_bytes(&bytes),
        Err(BufferError::LengthMismatch { declared: 4, decoded: 3 })
    );

    let bytes = raw_blob(-1, ByteOrderMark::UTF8.as_bytes(), b"abc");
    assert_eq!(Utf8TextRef::from_bytes(&bytes), Err(BufferError::NegativeLength(-1)));

    let mut bytes = raw_blob(3, ByteOrderMark::UTF8.as_bytes(), b"abc");
    bytes.pop();
    assert_eq!(Utf8TextRef::from_bytes(&bytes), Err(BufferError::MissingTerminator));
}

#[test]
fn test_trailing_bytes_after_terminator() {
    let mut bytes = raw_blob(2, ByteOrderMark::UTF8.as_bytes(), b"hi");
    bytes.extend_from_slice(b"garbage");
    let text = Utf8TextRef::from_bytes(&bytes).unwrap();
    assert_eq!(text.as_str(), "hi");
    assert_eq!(text.as_bytes().len(), BLOB_PREFIX + 2 + 1);

    let owned = text.to_owned_text();
    assert_eq!(owned.as_text_ref(), text);
}

#[test]
fn test_decoder_errors_and_reset() {
    // 0xFF is never a lead byte
    let bytes = raw_blob(2, &[], &[b'a', 0xFF]);
    let mut points = CodePoints::new(&bytes).unwrap();
    assert_eq!(points.next(), Some(Ok(0x61)));
    assert_eq!(points.next(), Some(Err(BufferError::InvalidLeadByte { byte: 0xFF, offset: 1 })));
    assert_eq!(points.next(), None);

    points.reset();
    assert_eq!(points.next(), Some(Ok(0x61)));

    // two-byte lead cut short by the terminator
    let bytes = raw_blob(1, &[], &[0xC3]);
    let mut points = CodePoints::new(&bytes).unwrap();
    assert_eq!(points.next(), Some(Err(BufferError::TruncatedSequence { offset: 0 })));

    let bytes = raw_blob(1, &[], &[0xC3, 0x41]);
    let mut points = CodePoints::new(&bytes).unwrap();
    assert_eq!(
        points.next(),
        Some(Err(BufferError::InvalidContinuationByte { byte: 0x41, offset: 1 }))
    );
}

#[test]
fn test_restartable_iteration() {
    let text = Utf8Text::new("añb").unwrap();
    let mut points = text.code_points();
    let first: Vec<u32> = points.by_ref().map(Result::unwrap).collect();
    assert_eq!(points.next(), None);
    points.reset();
    let second: Vec<u32> = points.map(Result::unwrap).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}
