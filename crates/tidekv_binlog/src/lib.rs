//! # tidekv Binlog
//!
//! Binary codecs for the replication log (binlog) of the tidekv storage
//! engine. The binlog is the durable, ordered record of every committed
//! write transaction; secondaries replay it to reconstruct the primary's
//! state, and point-in-time recovery and incremental backup read it.
//!
//! This crate provides:
//! - [`BinlogKey`]: the storage key identifying one binlog record
//! - [`OperationEntry`]: one logical write inside a transaction's batch
//! - [`BinlogHeader`] / [`BinlogValue`]: the record's fixed header plus
//!   its batch of entries
//! - [`RawBinlogRecord`]: lazily-interpreted encoded key/value pair for
//!   relaying records without a full decode
//! - [`wire`]: version-tagged, length-prefixed framing for shipping raw
//!   records between nodes
//! - [`DecodedBinlogRecord`]: the fully materialized, validated form
//!
//! This is a pure codec crate with no I/O: every encode/decode call is
//! self-contained and side-effect-free, so independent records may be
//! processed concurrently without coordination.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod decoded;
pub mod entry;
pub mod error;
pub mod key;
pub mod raw;
pub mod value;
pub mod wire;

pub use decoded::DecodedBinlogRecord;
pub use entry::{OpKind, OperationEntry};
pub use error::{DecodeError, DecodeResult};
pub use key::{BinlogKey, BINLOG_CHUNK_ID, BINLOG_DB_ID};
pub use raw::{RawBinlogRecord, TXN_ID_UNINITIALIZED};
pub use value::{BinlogHeader, BinlogValue, GroupFlag};
