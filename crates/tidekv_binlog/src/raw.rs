//! Lazily-interpreted binlog records.
//!
//! A [`RawBinlogRecord`] holds an already-encoded key/value pair, e.g.
//! read straight from storage or about to be relayed to a replica. No
//! decoding happens at construction; each accessor re-decodes just the
//! half it needs and caches nothing.
//!
//! The accessors are a deliberate lossy fast path: on decode failure
//! they return a documented sentinel instead of an error. Callers that
//! need guaranteed-valid data must use
//! [`DecodedBinlogRecord`](crate::DecodedBinlogRecord) instead, which
//! fails hard on the same bytes.

use crate::key::BinlogKey;
use crate::value::BinlogValue;
use bytes::Bytes;
use tidekv_codec::Record;
use tracing::warn;

/// Sentinel for a transaction id that was never assigned.
///
/// Returned by [`RawBinlogRecord::binlog_id`] when the key bytes do not
/// decode; never a valid id.
pub const TXN_ID_UNINITIALIZED: u64 = u64::MAX;

/// An encoded binlog record: raw key bytes plus raw value bytes.
///
/// Owns both buffers exclusively; cheap to move and clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBinlogRecord {
    key: Bytes,
    value: Bytes,
}

impl RawBinlogRecord {
    /// Wraps already-encoded key/value bytes.
    pub fn new(key: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Encodes a decoded generic [`Record`] into raw form.
    pub fn from_record(record: Record) -> Self {
        let (key, value) = record.into_parts();
        Self::new(key.encode(), value.encode())
    }

    /// The encoded key bytes.
    pub fn key_bytes(&self) -> &[u8] {
        &self.key
    }

    /// The encoded value bytes.
    pub fn value_bytes(&self) -> &[u8] {
        &self.value
    }

    /// Consumes the record, returning its two buffers.
    pub fn into_parts(self) -> (Bytes, Bytes) {
        (self.key, self.value)
    }

    /// Best-effort binlog id; [`TXN_ID_UNINITIALIZED`] if the key does
    /// not decode.
    pub fn binlog_id(&self) -> u64 {
        match BinlogKey::decode(&self.key) {
            Ok(key) => key.binlog_id(),
            Err(err) => {
                warn!(%err, "failed to decode binlog key, returning sentinel");
                TXN_ID_UNINITIALIZED
            }
        }
    }

    /// Best-effort version epoch; `u64::MAX` if the value header does
    /// not decode.
    pub fn version_epoch(&self) -> u64 {
        match BinlogValue::decode(&self.value) {
            Ok(value) => value.header.version_epoch,
            Err(err) => {
                warn!(%err, "failed to decode binlog value, returning sentinel");
                u64::MAX
            }
        }
    }

    /// Best-effort timestamp; `0` if the value header does not decode.
    pub fn timestamp(&self) -> u64 {
        match BinlogValue::decode(&self.value) {
            Ok(value) => value.header.timestamp,
            Err(err) => {
                warn!(%err, "failed to decode binlog value, returning sentinel");
                0
            }
        }
    }

    /// Best-effort chunk id; `0` if the value header does not decode.
    pub fn chunk_id(&self) -> u64 {
        match BinlogValue::decode(&self.value) {
            Ok(value) => u64::from(value.header.chunk_id),
            Err(err) => {
                warn!(%err, "failed to decode binlog value, returning sentinel");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::OperationEntry;
    use crate::value::{BinlogHeader, GroupFlag};

    fn sample_raw() -> RawBinlogRecord {
        let key = BinlogKey::new(42).encode();
        let header = BinlogHeader::new(9, GroupFlag::Start, 1000, 55, 6);
        let entries = vec![OperationEntry::set(55, b"k".to_vec(), b"v".to_vec())];
        let value = BinlogValue::encode(&header, &entries);
        RawBinlogRecord::new(key, value)
    }

    #[test]
    fn accessors_decode_on_demand() {
        let raw = sample_raw();
        assert_eq!(raw.binlog_id(), 42);
        assert_eq!(raw.version_epoch(), 6);
        assert_eq!(raw.timestamp(), 55);
        assert_eq!(raw.chunk_id(), 9);
    }

    #[test]
    fn corrupt_key_yields_sentinel() {
        let raw = RawBinlogRecord::new(vec![0xFF, 0x00], sample_raw().value);
        assert_eq!(raw.binlog_id(), TXN_ID_UNINITIALIZED);
    }

    #[test]
    fn corrupt_value_yields_sentinels() {
        let raw = RawBinlogRecord::new(sample_raw().key, vec![0x03]);
        assert_eq!(raw.version_epoch(), u64::MAX);
        assert_eq!(raw.timestamp(), 0);
        assert_eq!(raw.chunk_id(), 0);
    }

    #[test]
    fn from_record_matches_direct_encoding() {
        use tidekv_codec::{RecordKey, RecordType, RecordValue};

        let key = RecordKey::new(
            crate::key::BINLOG_CHUNK_ID,
            crate::key::BINLOG_DB_ID,
            RecordType::Binlog,
            7u64.to_be_bytes().to_vec(),
            Vec::new(),
        );
        let value = RecordValue::new(RecordType::Binlog, 0, vec![0u8; 30]);
        let raw = RawBinlogRecord::from_record(Record::new(key.clone(), value.clone()));
        assert_eq!(raw.key_bytes(), key.encode().as_slice());
        assert_eq!(raw.value_bytes(), value.encode().as_slice());
        assert_eq!(raw.binlog_id(), 7);
    }

    #[test]
    fn into_parts_returns_buffers() {
        let raw = sample_raw();
        let expected_key = raw.key_bytes().to_vec();
        let (key, value) = raw.into_parts();
        assert_eq!(key.as_ref(), expected_key.as_slice());
        assert!(!value.is_empty());
    }
}
