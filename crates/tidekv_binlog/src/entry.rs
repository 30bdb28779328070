//! Operation entries: one logical write inside a transaction's batch.
//!
//! # Layout
//!
//! ```text
//! | op (u8) | varint timestamp | varint key_len | key | varint val_len | val |
//! ```
//!
//! Entries are concatenated back-to-back inside a binlog value's payload
//! with no separator; each entry's length-prefixed fields are the only
//! framing.

use crate::error::{DecodeError, DecodeResult};
use tidekv_codec::varint;

/// Kind of logical write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpKind {
    /// No operation (placeholder).
    None = 0x00,
    /// Set a key to a new value.
    Set = 0x01,
    /// Delete a key.
    Delete = 0x02,
}

impl OpKind {
    /// Converts the op kind to its wire tag.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Converts a wire tag back to an op kind.
    ///
    /// Unknown tags fail closed.
    pub fn from_byte(b: u8) -> DecodeResult<Self> {
        match b {
            0x00 => Ok(Self::None),
            0x01 => Ok(Self::Set),
            0x02 => Ok(Self::Delete),
            code => Err(DecodeError::InvalidOpKind { code }),
        }
    }
}

/// One logical write operation within a binlog record's batch.
///
/// The key and value bytes are the affected logical record's key and new
/// payload, opaque to this layer. Entries are immutable once encoded and
/// decoded lazily, one at a time, while scanning a binlog value payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationEntry {
    /// The operation kind.
    pub op: OpKind,
    /// Commit-time logical clock of this individual write.
    pub timestamp: u64,
    /// Affected key bytes.
    pub key: Vec<u8>,
    /// New value payload (empty for deletes).
    pub value: Vec<u8>,
}

impl OperationEntry {
    /// Creates a new entry.
    pub fn new(op: OpKind, timestamp: u64, key: Vec<u8>, value: Vec<u8>) -> Self {
        Self {
            op,
            timestamp,
            key,
            value,
        }
    }

    /// Creates a set entry.
    pub fn set(timestamp: u64, key: Vec<u8>, value: Vec<u8>) -> Self {
        Self::new(OpKind::Set, timestamp, key, value)
    }

    /// Creates a delete entry.
    pub fn delete(timestamp: u64, key: Vec<u8>) -> Self {
        Self::new(OpKind::Delete, timestamp, key, Vec::new())
    }

    /// Upper bound on the encoded size of this entry, computable without
    /// encoding.
    ///
    /// Callers use this to pre-size a destination buffer before writing
    /// multiple entries back-to-back.
    pub fn max_encoded_len(&self) -> usize {
        1 + 3 * varint::MAX_ENCODED_LEN + self.key.len() + self.value.len()
    }

    /// Appends this entry's encoding to `buf`.
    ///
    /// Returns the exact number of bytes appended.
    pub fn encode_into(&self, buf: &mut Vec<u8>) -> usize {
        let start = buf.len();
        buf.push(self.op.as_byte());
        varint::encode(self.timestamp, buf);
        varint::encode(self.key.len() as u64, buf);
        buf.extend_from_slice(&self.key);
        varint::encode(self.value.len() as u64, buf);
        buf.extend_from_slice(&self.value);
        buf.len() - start
    }

    /// Encodes this entry into a fresh buffer.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.max_encoded_len());
        self.encode_into(&mut buf);
        buf
    }

    /// Decodes one entry from the front of `buf`.
    ///
    /// Returns the entry and the exact number of bytes consumed so the
    /// caller can advance a cursor over a concatenated sequence.
    pub fn decode(buf: &[u8]) -> DecodeResult<(Self, usize)> {
        if buf.is_empty() {
            return Err(DecodeError::Truncated { what: "entry op" });
        }
        let op = OpKind::from_byte(buf[0])?;
        let mut offset = 1;

        let (timestamp, consumed) = varint::decode_forward(&buf[offset..])?;
        offset += consumed;

        let (key_len, consumed) = varint::decode_forward(&buf[offset..])?;
        offset += consumed;
        let key_len = key_len as usize;
        if buf.len() - offset < key_len {
            return Err(DecodeError::LengthOverrun {
                declared: key_len,
                remaining: buf.len() - offset,
            });
        }
        let key = buf[offset..offset + key_len].to_vec();
        offset += key_len;

        let (val_len, consumed) = varint::decode_forward(&buf[offset..])?;
        offset += consumed;
        let val_len = val_len as usize;
        if buf.len() - offset < val_len {
            return Err(DecodeError::LengthOverrun {
                declared: val_len,
                remaining: buf.len() - offset,
            });
        }
        let value = buf[offset..offset + val_len].to_vec();
        offset += val_len;

        Ok((
            Self {
                op,
                timestamp,
                key,
                value,
            },
            offset,
        ))
    }
}
