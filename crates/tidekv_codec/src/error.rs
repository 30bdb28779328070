//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while decoding codec primitives.
///
/// All variants indicate malformed input, never a transient condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The buffer ended before the field could be fully read.
    #[error("unexpected end of input while reading {what}: need {need} bytes, have {have}")]
    UnexpectedEof {
        /// Name of the field being read.
        what: &'static str,
        /// Bytes required to complete the read.
        need: usize,
        /// Bytes remaining in the buffer.
        have: usize,
    },

    /// A varint ran past its maximum encoded length.
    #[error("varint exceeds maximum encoded length")]
    VarintOverflow,

    /// Unknown record type tag.
    #[error("invalid record type tag: 0x{code:02x}")]
    InvalidRecordType {
        /// The unrecognized tag byte.
        code: u8,
    },
}

impl CodecError {
    /// Creates an unexpected-EOF error for a named field.
    pub fn eof(what: &'static str, need: usize, have: usize) -> Self {
        Self::UnexpectedEof { what, need, have }
    }
}
