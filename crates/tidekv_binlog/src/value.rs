//! Binlog value codec: fixed header plus a batch of operation entries.
//!
//! # Layout
//!
//! The storage value of one binlog record is a generic [`RecordValue`]
//! tagged [`RecordType::Binlog`] whose payload is:
//!
//! ```text
//! | chunk_id (u32 BE) | flag (u16 BE) | txn_id (u64 BE) | timestamp (u64 BE)
//! | version_epoch (u64 BE) | entry* |
//! ```
//!
//! Entries are concatenated with no padding. Decoding here stops at the
//! header and keeps the entry bytes opaque; materializing the entries is
//! [`DecodedBinlogRecord`](crate::DecodedBinlogRecord)'s job.

use crate::entry::OperationEntry;
use crate::error::{DecodeError, DecodeResult};
use tidekv_codec::{fixed, RecordType, RecordValue};

/// Marks a physical binlog record's position within one logical
/// transaction that may span multiple records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum GroupFlag {
    /// A middle record of a multi-record transaction.
    Mid = 0x0000,
    /// The first (or only) record of a transaction.
    Start = 0x0001,
    /// The last record of a multi-record transaction.
    End = 0x0002,
}

impl GroupFlag {
    /// Converts the flag to its wire value.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Converts a wire value back to a flag.
    ///
    /// Unknown values fail closed.
    pub fn from_u16(v: u16) -> DecodeResult<Self> {
        match v {
            0x0000 => Ok(Self::Mid),
            0x0001 => Ok(Self::Start),
            0x0002 => Ok(Self::End),
            code => Err(DecodeError::InvalidGroupFlag { code }),
        }
    }
}

/// The fixed-size header of a binlog value.
///
/// Derived `PartialEq` compares all five fields, which is the header
/// identity used by layers that compare records without materializing
/// entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinlogHeader {
    /// Chunk the logged transaction applied to.
    pub chunk_id: u32,
    /// Position of this record within its transaction group.
    pub flag: GroupFlag,
    /// Transaction id allocated by the transaction manager.
    pub txn_id: u64,
    /// Commit timestamp; equals the last entry's timestamp.
    pub timestamp: u64,
    /// Leadership epoch stamp, used to detect stale writers after a
    /// failover.
    pub version_epoch: u64,
}

impl BinlogHeader {
    /// Encoded size of the header: chunk_id (4) + flag (2) + txn_id (8)
    /// + timestamp (8) + version_epoch (8).
    pub const ENCODED_LEN: usize = 4 + 2 + 8 + 8 + 8;

    /// Creates a new header.
    pub fn new(
        chunk_id: u32,
        flag: GroupFlag,
        txn_id: u64,
        timestamp: u64,
        version_epoch: u64,
    ) -> Self {
        Self {
            chunk_id,
            flag,
            txn_id,
            timestamp,
            version_epoch,
        }
    }

    /// Appends the fixed-width header encoding to `buf`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        let start = buf.len();
        fixed::put_u32(buf, self.chunk_id);
        fixed::put_u16(buf, self.flag.as_u16());
        fixed::put_u64(buf, self.txn_id);
        fixed::put_u64(buf, self.timestamp);
        fixed::put_u64(buf, self.version_epoch);
        debug_assert_eq!(buf.len() - start, Self::ENCODED_LEN);
    }

    /// Encodes the header into a fresh buffer.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::ENCODED_LEN);
        self.encode_into(&mut buf);
        buf
    }

    /// Decodes a header from the front of `buf`.
    pub fn decode(buf: &[u8]) -> DecodeResult<Self> {
        if buf.len() < Self::ENCODED_LEN {
            return Err(DecodeError::Truncated {
                what: "binlog value header",
            });
        }
        let chunk_id = fixed::read_u32(buf)?;
        let flag = GroupFlag::from_u16(fixed::read_u16(&buf[4..])?)?;
        let txn_id = fixed::read_u64(&buf[6..])?;
        let timestamp = fixed::read_u64(&buf[14..])?;
        let version_epoch = fixed::read_u64(&buf[22..])?;
        Ok(Self {
            chunk_id,
            flag,
            txn_id,
            timestamp,
            version_epoch,
        })
    }
}

/// The value half of one binlog record: header plus the undecoded entry
/// payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinlogValue {
    /// The fixed header.
    pub header: BinlogHeader,
    /// Encoded entry bytes, not yet materialized.
    pub payload: Vec<u8>,
}

impl BinlogValue {
    /// Encodes a header and its batch of entries into storage value
    /// bytes.
    ///
    /// Entries are written in sequence order immediately after the fixed
    /// header, then the whole payload is wrapped in a [`RecordValue`]
    /// tagged [`RecordType::Binlog`].
    ///
    /// The batch must be non-empty and the header timestamp must equal
    /// the last entry's timestamp; both are encode-side invariants
    /// checked in diagnostic builds.
    pub fn encode(header: &BinlogHeader, entries: &[OperationEntry]) -> Vec<u8> {
        debug_assert!(!entries.is_empty(), "binlog batch must not be empty");
        debug_assert_eq!(
            entries.last().map(|e| e.timestamp),
            Some(header.timestamp),
            "header timestamp must equal the last entry's timestamp"
        );

        let max_len = BinlogHeader::ENCODED_LEN
            + entries.iter().map(OperationEntry::max_encoded_len).sum::<usize>();
        let mut payload = Vec::with_capacity(max_len);
        header.encode_into(&mut payload);
        for entry in entries {
            entry.encode_into(&mut payload);
        }

        RecordValue::new(RecordType::Binlog, 0, payload).encode()
    }

    /// Decodes storage value bytes into a header plus opaque payload.
    ///
    /// Fails if the generic-record unwrap fails, the type tag is not
    /// binlog, or the payload is shorter than the fixed header.
    pub fn decode(storage_value: &[u8]) -> DecodeResult<Self> {
        let record_type = RecordValue::decode_type_raw(storage_value)?;
        if record_type != RecordType::Binlog {
            return Err(DecodeError::WrongRecordType {
                actual: record_type,
            });
        }
        let record_value = RecordValue::decode(storage_value)?;
        let header = BinlogHeader::decode(&record_value.payload)?;
        let payload = record_value.payload[BinlogHeader::ENCODED_LEN..].to_vec();
        Ok(Self { header, payload })
    }
}
