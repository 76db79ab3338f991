//! UTF-8 text blobs: encoding, byte-order marks, code-point decoding and
//! terminal measurement.

mod blob;
mod bom;
mod code_points;
pub mod measure;

pub use blob::{encode_into, encoded_len, TextBlob, Utf8Text, Utf8TextRef, BLOB_PREFIX};
pub use bom::{ByteOrderMark, TextEncoding};
pub use code_points::CodePoints;
