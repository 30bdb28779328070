//! Binlog record keys.
//!
//! A binlog record is identified by a monotonically increasing 64-bit
//! binlog id, embedded as the primary key of a generic storage record
//! under reserved chunk/db ids. The id is encoded big-endian so that
//! key-ordered iteration over the store yields records in id order.

use crate::error::{DecodeError, DecodeResult};
use tidekv_codec::{fixed, RecordKey, RecordType};

/// Reserved chunk id for binlog records.
pub const BINLOG_CHUNK_ID: u32 = 0xFFFF_FF01;

/// Reserved db id for binlog records.
pub const BINLOG_DB_ID: u32 = 0xFFFF_FF01;

/// The key of one binlog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinlogKey {
    binlog_id: u64,
}

impl BinlogKey {
    /// Creates a key for the given binlog id.
    pub fn new(binlog_id: u64) -> Self {
        Self { binlog_id }
    }

    /// Returns the binlog id.
    pub fn binlog_id(&self) -> u64 {
        self.binlog_id
    }

    /// Encodes to generic-record key bytes.
    ///
    /// The primary key is the 8-byte big-endian binlog id; the secondary
    /// key is empty.
    pub fn encode(&self) -> Vec<u8> {
        let mut primary_key = Vec::with_capacity(8);
        fixed::put_u64(&mut primary_key, self.binlog_id);
        RecordKey::new(
            BINLOG_CHUNK_ID,
            BINLOG_DB_ID,
            RecordType::Binlog,
            primary_key,
            Vec::new(),
        )
        .encode()
    }

    /// Decodes from raw storage key bytes.
    pub fn decode(raw: &[u8]) -> DecodeResult<Self> {
        let record_key = RecordKey::decode(raw)?;
        Self::from_record_key(&record_key)
    }

    /// Decodes from an already-parsed [`RecordKey`].
    ///
    /// Fails if the record type is not binlog, the chunk/db ids are not
    /// the reserved constants, the primary key is not exactly 8 bytes,
    /// or the secondary key is non-empty.
    pub fn from_record_key(record_key: &RecordKey) -> DecodeResult<Self> {
        if record_key.record_type != RecordType::Binlog {
            return Err(DecodeError::WrongRecordType {
                actual: record_key.record_type,
            });
        }
        if record_key.chunk_id != BINLOG_CHUNK_ID || record_key.db_id != BINLOG_DB_ID {
            return Err(DecodeError::ReservedKeyMismatch {
                chunk_id: record_key.chunk_id,
                db_id: record_key.db_id,
            });
        }
        if record_key.primary_key.len() != 8 {
            return Err(DecodeError::InvalidKeyLength {
                len: record_key.primary_key.len(),
            });
        }
        if !record_key.secondary_key.is_empty() {
            return Err(DecodeError::NonEmptySecondaryKey {
                len: record_key.secondary_key.len(),
            });
        }
        let binlog_id = fixed::read_u64(&record_key.primary_key)?;
        Ok(Self { binlog_id })
    }
}
