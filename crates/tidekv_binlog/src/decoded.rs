//! Fully materialized binlog records.
//!
//! [`DecodedBinlogRecord`] is the strict refinement of a
//! [`RawBinlogRecord`](crate::RawBinlogRecord): same bytes, structured
//! view. Decoding validates the key, the value header, and every entry,
//! and rejects records whose entries do not exactly fill the payload;
//! truncated or corrupted log segments never decode silently.

use crate::entry::OperationEntry;
use crate::error::{DecodeError, DecodeResult};
use crate::key::BinlogKey;
use crate::value::{BinlogHeader, BinlogValue, GroupFlag};

/// One binlog record, fully decoded and validated.
///
/// Built once per record; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBinlogRecord {
    key: BinlogKey,
    header: BinlogHeader,
    entries: Vec<OperationEntry>,
}

impl DecodedBinlogRecord {
    /// Decodes a record from its encoded key and value bytes.
    ///
    /// The value payload is scanned entry by entry with an advancing
    /// cursor; any entry failure propagates, and a cursor that does not
    /// land exactly on the payload end is a
    /// [`DecodeError::TrailingPayload`].
    pub fn decode(key_bytes: &[u8], value_bytes: &[u8]) -> DecodeResult<Self> {
        let key = BinlogKey::decode(key_bytes)?;
        let value = BinlogValue::decode(value_bytes)?;

        let mut entries = Vec::new();
        let payload = &value.payload;
        let mut offset = 0;
        while offset < payload.len() {
            let (entry, consumed) = OperationEntry::decode(&payload[offset..])?;
            offset += consumed;
            entries.push(entry);
        }
        if offset != payload.len() {
            return Err(DecodeError::TrailingPayload {
                consumed: offset,
                expected: payload.len(),
            });
        }

        Ok(Self {
            key,
            header: value.header,
            entries,
        })
    }

    /// The binlog id from the key.
    pub fn binlog_id(&self) -> u64 {
        self.key.binlog_id()
    }

    /// The chunk id from the value header.
    pub fn chunk_id(&self) -> u32 {
        self.header.chunk_id
    }

    /// The transaction id from the value header.
    pub fn txn_id(&self) -> u64 {
        self.header.txn_id
    }

    /// The group flag from the value header.
    pub fn flag(&self) -> GroupFlag {
        self.header.flag
    }

    /// The version epoch from the value header.
    pub fn version_epoch(&self) -> u64 {
        self.header.version_epoch
    }

    /// The decoded value header.
    pub fn header(&self) -> &BinlogHeader {
        &self.header
    }

    /// The decoded entries, in application order.
    pub fn entries(&self) -> &[OperationEntry] {
        &self.entries
    }

    /// The commit timestamp: the last entry's timestamp.
    ///
    /// Checked against the header timestamp in diagnostic builds; a
    /// mismatch means a corrupted or hand-edited record.
    pub fn timestamp(&self) -> u64 {
        debug_assert!(!self.entries.is_empty(), "binlog record has no entries");
        let last = self.entries.last().map(|e| e.timestamp).unwrap_or(0);
        debug_assert_eq!(
            last, self.header.timestamp,
            "header/entry timestamp mismatch"
        );
        last
    }
}
