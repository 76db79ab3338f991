//! Errors for node buffers, text blobs and property blocks.

use thiserror::Error;

use crate::text::TextEncoding;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    // --- Text blobs ---
    #[error("Unrecognized byte-order-mark: {0:02X?}")]
    UnrecognizedPreamble([u8; 4]),

    #[error("Unsupported text encoding {0:?} (blobs carry UTF-8 only)")]
    UnsupportedEncoding(TextEncoding),

    #[error("Invalid UTF-8 lead byte 0x{byte:02X} at payload offset {offset}")]
    InvalidLeadByte { byte: u8, offset: usize },

    #[error("Invalid UTF-8 continuation byte 0x{byte:02X} at payload offset {offset}")]
    InvalidContinuationByte { byte: u8, offset: usize },

    #[error("UTF-8 sequence starting at payload offset {offset} runs into the terminator")]
    TruncatedSequence { offset: usize },

    #[error("Text blob has no zero terminator")]
    MissingTerminator,

    #[error("Text blob declares a negative length: {0}")]
    NegativeLength(i32),

    #[error("Text blob declares {declared} code points but holds {decoded}")]
    LengthMismatch { declared: usize, decoded: usize },

    #[error("Text payload is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },

    #[error("Text contains a NUL character at byte {offset}")]
    InteriorNul { offset: usize },

    #[error("Text has {chars} code points, more than a blob can count")]
    TextTooLong { chars: usize },

    // --- Value decoding ---
    #[error("Invalid length unit tag: {0}")]
    InvalidLengthUnit(u8),

    #[error("Invalid box layout direction: {0}")]
    InvalidDirection(u8),

    #[error("Invalid alignment bits: 0x{0:02X}")]
    InvalidAlignment(u8),

    // --- Node buffers ---
    #[error("Buffer too small: {len} bytes, need at least {needed}")]
    BufferTooSmall { len: usize, needed: usize },

    #[error("Declared total size {total} outside 8..={len}")]
    TotalSizeOutOfRange { total: u64, len: usize },

    #[error("Record at offset {offset} ends at {end}, past the buffer end {total}")]
    RecordOverrun { offset: usize, end: usize, total: usize },

    #[error("Record at offset {offset} declares a negative child count: {count}")]
    NegativeChildCount { offset: usize, count: i32 },

    #[error("Record at offset {offset}: {child_count} child ids do not fit in {size} payload bytes")]
    ChildListOverrun { offset: usize, child_count: usize, size: u32 },

    #[error("Offset {0} is not the start of a node record")]
    InvalidOffset(u64),

    #[error("Record payload is {available} bytes, {needed} needed for {kind}")]
    PayloadTooSmall { kind: &'static str, needed: usize, available: usize },

    #[error("Record payload of {0} bytes does not fit the 32-bit size field")]
    PayloadTooLarge(usize),

    // --- Producer contract ---
    #[error("Duplicate node id {0}")]
    DuplicateNodeId(u32),

    #[error("Node {parent} lists child {child}, which is not in the buffer")]
    UnknownChild { parent: u32, child: u32 },

    #[error("{kind} nodes accept at most {max} children, got {count}")]
    TooManyChildren { kind: &'static str, max: usize, count: usize },

    // --- Property blocks ---
    #[error("Property block handle for {0} is unbound")]
    UnboundPropertyBlock(&'static str),

    #[error("{block} block at offset {offset} runs past the buffer end {total}")]
    BlockOutOfRange { block: &'static str, offset: u64, total: usize },
}

pub type Result<T> = std::result::Result<T, BufferError>;
