//! Error types for binlog decoding.
//!
//! All decode entry points return [`DecodeResult`]; malformed input is
//! never a panic. Invariant checks that compare independently derivable
//! values (header vs. last-entry timestamp, offset arithmetic) are
//! `debug_assert!`s instead: a violation there means an encode-side bug,
//! not bad external input.

use thiserror::Error;
use tidekv_codec::{CodecError, RecordType};

/// Result type for binlog decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors raised while decoding binlog records.
///
/// Every variant indicates corruption, a version mismatch, or a
/// programmer error; none are retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A codec primitive (varint, fixed int, record envelope) failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The record carries a type tag other than binlog.
    #[error("not a binlog record: type tag {actual:?}")]
    WrongRecordType {
        /// The type tag actually present.
        actual: RecordType,
    },

    /// The key's chunk id or db id is not the reserved binlog constant.
    #[error("chunk id 0x{chunk_id:08x} or db id 0x{db_id:08x} is not the reserved binlog id")]
    ReservedKeyMismatch {
        /// Chunk id found in the key.
        chunk_id: u32,
        /// Db id found in the key.
        db_id: u32,
    },

    /// The primary key is not exactly 8 bytes.
    #[error("invalid binlog key length: {len} (expected 8)")]
    InvalidKeyLength {
        /// Length of the primary key found.
        len: usize,
    },

    /// The secondary key is not empty.
    #[error("binlog key has a non-empty secondary key ({len} bytes)")]
    NonEmptySecondaryKey {
        /// Length of the secondary key found.
        len: usize,
    },

    /// Unknown operation kind tag in an entry.
    #[error("invalid operation kind tag: 0x{code:02x}")]
    InvalidOpKind {
        /// The unrecognized tag byte.
        code: u8,
    },

    /// Unknown group flag in a value header.
    #[error("invalid group flag: 0x{code:04x}")]
    InvalidGroupFlag {
        /// The unrecognized flag value.
        code: u16,
    },

    /// The buffer ended before a named field could be read.
    #[error("truncated buffer while reading {what}")]
    Truncated {
        /// Name of the field being read.
        what: &'static str,
    },

    /// A declared field length exceeds the remaining buffer.
    #[error("declared length {declared} exceeds remaining buffer {remaining}")]
    LengthOverrun {
        /// The length the field declared.
        declared: usize,
        /// Bytes actually remaining.
        remaining: usize,
    },

    /// Entries did not exactly fill the declared payload.
    #[error("payload consumption mismatch: consumed {consumed} of {expected} bytes")]
    TrailingPayload {
        /// Bytes consumed by entry decoding.
        consumed: usize,
        /// Total payload length.
        expected: usize,
    },

    /// The wire stream's leading format version byte is unknown.
    #[error("wire format version mismatch: found 0x{found:02x}")]
    WireVersionMismatch {
        /// The version byte found.
        found: u8,
    },
}
