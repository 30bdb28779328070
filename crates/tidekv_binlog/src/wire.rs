//! Wire framing for shipping raw binlog records between nodes.
//!
//! A stream is a single format-version byte followed by zero or more
//! framed records:
//!
//! ```text
//! | version (u8) | [ key_len (u32 BE) | key | val_len (u32 BE) | val ]* |
//! ```
//!
//! The length prefixes let a reader skip or re-extract records without
//! parsing their internals. This version byte is distinct from any
//! format versioning inside the key/value codecs themselves.

use crate::error::{DecodeError, DecodeResult};
use crate::raw::RawBinlogRecord;
use tidekv_codec::fixed;

/// Current wire stream format version.
pub const WIRE_FORMAT_VERSION: u8 = 0x01;

/// Byte length of the stream header.
pub const WIRE_HEADER_LEN: usize = 1;

/// Writes the stream format version byte.
///
/// Returns the number of bytes written.
pub fn write_format_version(buf: &mut Vec<u8>) -> usize {
    buf.push(WIRE_FORMAT_VERSION);
    WIRE_HEADER_LEN
}

/// Validates the leading format version byte.
///
/// Returns the number of bytes consumed, or `None` if the buffer is
/// empty or carries an unknown version. `None` is a sentinel, not an
/// error value: the caller aborts the stream without error-channel
/// control flow.
pub fn read_format_version(buf: &[u8]) -> Option<usize> {
    match buf.first() {
        Some(&WIRE_FORMAT_VERSION) => Some(WIRE_HEADER_LEN),
        _ => None,
    }
}

/// Appends one framed record: size-prefixed key bytes, then
/// size-prefixed value bytes.
///
/// Returns the number of bytes written.
pub fn write_record(buf: &mut Vec<u8>, record: &RawBinlogRecord) -> usize {
    let start = buf.len();
    fixed::put_u32(buf, record.key_bytes().len() as u32);
    buf.extend_from_slice(record.key_bytes());
    fixed::put_u32(buf, record.value_bytes().len() as u32);
    buf.extend_from_slice(record.value_bytes());
    buf.len() - start
}

/// Re-extracts one framed record from the front of `buf` without
/// parsing its internals.
///
/// Returns the record and the number of bytes consumed.
pub fn read_record(buf: &[u8]) -> DecodeResult<(RawBinlogRecord, usize)> {
    let (key, consumed_key) = read_sized(buf, "framed key")?;
    let (value, consumed_value) = read_sized(&buf[consumed_key..], "framed value")?;
    Ok((
        RawBinlogRecord::new(key, value),
        consumed_key + consumed_value,
    ))
}

fn read_sized(buf: &[u8], what: &'static str) -> DecodeResult<(Vec<u8>, usize)> {
    let len = fixed::read_u32(buf).map_err(|_| DecodeError::Truncated { what })? as usize;
    let remaining = buf.len() - 4;
    if remaining < len {
        return Err(DecodeError::LengthOverrun {
            declared: len,
            remaining,
        });
    }
    Ok((buf[4..4 + len].to_vec(), 4 + len))
}
