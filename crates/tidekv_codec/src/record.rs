//! Generic storage record key/value format.
//!
//! Every persisted record, ordinary data and binlog alike, uses the same
//! envelope: the key carries the chunk id, database id, record type, and
//! the primary/secondary key bytes; the value carries the record type, a
//! version stamp, and an opaque payload.
//!
//! # Key layout
//!
//! ```text
//! | chunk_id (u32 BE) | db_id (u32 BE) | type (u8) | varint pk_len | pk | sk... |
//! ```
//!
//! The secondary key runs to the end of the buffer. Keys that share the
//! fixed prefix and have equal-length primary keys compare
//! lexicographically by primary key bytes, so big-endian fixed-width ids
//! scan in numeric order.
//!
//! # Value layout
//!
//! ```text
//! | type (u8) | varint version | payload... |
//! ```

use crate::error::{CodecError, CodecResult};
use crate::{fixed, varint};

/// Type tag of a storage record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RecordType {
    /// Ordinary key-value data.
    Data = 0x01,
    /// Engine metadata.
    Meta = 0x02,
    /// Replication log record.
    Binlog = 0x03,
}

impl RecordType {
    /// Converts the record type to its wire tag.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Converts a wire tag back to a record type.
    ///
    /// Unknown tags fail closed.
    pub fn from_byte(b: u8) -> CodecResult<Self> {
        match b {
            0x01 => Ok(Self::Data),
            0x02 => Ok(Self::Meta),
            0x03 => Ok(Self::Binlog),
            code => Err(CodecError::InvalidRecordType { code }),
        }
    }
}

/// The key half of a storage record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    /// Partition (shard) this record belongs to.
    pub chunk_id: u32,
    /// Logical database within the chunk.
    pub db_id: u32,
    /// Record type tag.
    pub record_type: RecordType,
    /// Primary key bytes.
    pub primary_key: Vec<u8>,
    /// Secondary key bytes (empty for most record types).
    pub secondary_key: Vec<u8>,
}

impl RecordKey {
    /// Creates a new record key.
    pub fn new(
        chunk_id: u32,
        db_id: u32,
        record_type: RecordType,
        primary_key: Vec<u8>,
        secondary_key: Vec<u8>,
    ) -> Self {
        Self {
            chunk_id,
            db_id,
            record_type,
            primary_key,
            secondary_key,
        }
    }

    /// Encodes the key to storage bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(
            4 + 4
                + 1
                + varint::encoded_len(self.primary_key.len() as u64)
                + self.primary_key.len()
                + self.secondary_key.len(),
        );
        fixed::put_u32(&mut buf, self.chunk_id);
        fixed::put_u32(&mut buf, self.db_id);
        buf.push(self.record_type.as_byte());
        varint::encode(self.primary_key.len() as u64, &mut buf);
        buf.extend_from_slice(&self.primary_key);
        buf.extend_from_slice(&self.secondary_key);
        buf
    }

    /// Decodes a key from storage bytes.
    pub fn decode(buf: &[u8]) -> CodecResult<Self> {
        let chunk_id = fixed::read_u32(buf)?;
        let db_id = fixed::read_u32(&buf[4..])?;
        let type_byte = *buf
            .get(8)
            .ok_or_else(|| CodecError::eof("record type", 9, buf.len()))?;
        let record_type = RecordType::from_byte(type_byte)?;

        let mut offset = 9;
        let (pk_len, consumed) = varint::decode_forward(&buf[offset..])?;
        offset += consumed;
        let pk_len = pk_len as usize;
        if buf.len() - offset < pk_len {
            return Err(CodecError::eof(
                "primary key",
                pk_len,
                buf.len() - offset,
            ));
        }
        let primary_key = buf[offset..offset + pk_len].to_vec();
        offset += pk_len;
        let secondary_key = buf[offset..].to_vec();

        Ok(Self {
            chunk_id,
            db_id,
            record_type,
            primary_key,
            secondary_key,
        })
    }
}

/// The value half of a storage record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordValue {
    /// Record type tag; must match the key's tag.
    pub record_type: RecordType,
    /// Version stamp of the payload encoding.
    pub version: u64,
    /// Opaque payload bytes.
    pub payload: Vec<u8>,
}

impl RecordValue {
    /// Creates a new record value.
    pub fn new(record_type: RecordType, version: u64, payload: Vec<u8>) -> Self {
        Self {
            record_type,
            version,
            payload,
        }
    }

    /// Encodes the value to storage bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf =
            Vec::with_capacity(1 + varint::encoded_len(self.version) + self.payload.len());
        buf.push(self.record_type.as_byte());
        varint::encode(self.version, &mut buf);
        buf.extend_from_slice(&self.payload);
        buf
    }

    /// Decodes a value from storage bytes.
    pub fn decode(buf: &[u8]) -> CodecResult<Self> {
        let record_type = Self::decode_type_raw(buf)?;
        let (version, consumed) = varint::decode_forward(&buf[1..])?;
        let payload = buf[1 + consumed..].to_vec();
        Ok(Self {
            record_type,
            version,
            payload,
        })
    }

    /// Peeks the record type tag without decoding the rest of the value.
    pub fn decode_type_raw(buf: &[u8]) -> CodecResult<RecordType> {
        let type_byte = *buf
            .first()
            .ok_or_else(|| CodecError::eof("record type", 1, 0))?;
        RecordType::from_byte(type_byte)
    }

    /// Returns the byte length of the value header (type tag plus
    /// version varint) for an encoded value.
    pub fn decode_header_size(buf: &[u8]) -> CodecResult<usize> {
        Self::decode_type_raw(buf)?;
        let (_, consumed) = varint::decode_forward(&buf[1..])?;
        Ok(1 + consumed)
    }
}

/// A storage record: key plus value, in decoded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The record key.
    pub key: RecordKey,
    /// The record value.
    pub value: RecordValue,
}

impl Record {
    /// Creates a new record.
    pub fn new(key: RecordKey, value: RecordValue) -> Self {
        Self { key, value }
    }

    /// Consumes the record, returning its key and value.
    pub fn into_parts(self) -> (RecordKey, RecordValue) {
        (self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_key() -> RecordKey {
        RecordKey::new(
            7,
            2,
            RecordType::Data,
            b"user:1001".to_vec(),
            b"idx".to_vec(),
        )
    }

    #[test]
    fn record_type_roundtrip() {
        for t in [RecordType::Data, RecordType::Meta, RecordType::Binlog] {
            assert_eq!(RecordType::from_byte(t.as_byte()).unwrap(), t);
        }
    }

    #[test]
    fn record_type_fails_closed() {
        assert_eq!(
            RecordType::from_byte(0x7F),
            Err(CodecError::InvalidRecordType { code: 0x7F })
        );
    }

    #[test]
    fn key_roundtrip() {
        let key = sample_key();
        let decoded = RecordKey::decode(&key.encode()).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn key_with_empty_secondary() {
        let key = RecordKey::new(1, 1, RecordType::Binlog, vec![0u8; 8], Vec::new());
        let decoded = RecordKey::decode(&key.encode()).unwrap();
        assert_eq!(decoded.secondary_key, Vec::<u8>::new());
    }

    #[test]
    fn key_layout() {
        let key = RecordKey::new(1, 2, RecordType::Data, vec![0xAA], vec![0xBB]);
        let encoded = key.encode();
        assert_eq!(
            encoded,
            vec![0, 0, 0, 1, 0, 0, 0, 2, 0x01, 0x01, 0xAA, 0xBB]
        );
    }

    #[test]
    fn key_truncated_primary_fails() {
        let key = sample_key();
        let encoded = key.encode();
        // Cut into the primary key bytes.
        assert!(RecordKey::decode(&encoded[..10]).is_err());
    }

    #[test]
    fn value_roundtrip() {
        let value = RecordValue::new(RecordType::Binlog, 3, vec![1, 2, 3, 4]);
        let decoded = RecordValue::decode(&value.encode()).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn value_header_size() {
        let value = RecordValue::new(RecordType::Data, 0, vec![9, 9]);
        let encoded = value.encode();
        // type (1) + version varint (1)
        assert_eq!(RecordValue::decode_header_size(&encoded).unwrap(), 2);
        assert_eq!(
            RecordValue::decode_type_raw(&encoded).unwrap(),
            RecordType::Data
        );
    }

    #[test]
    fn value_empty_buffer_fails() {
        assert!(RecordValue::decode(&[]).is_err());
        assert!(RecordValue::decode_type_raw(&[]).is_err());
    }

    #[test]
    fn record_into_parts() {
        let record = Record::new(
            sample_key(),
            RecordValue::new(RecordType::Data, 1, vec![5]),
        );
        let (key, value) = record.into_parts();
        assert_eq!(key.chunk_id, 7);
        assert_eq!(value.payload, vec![5]);
    }
}
