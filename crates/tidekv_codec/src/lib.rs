//! # tidekv Codec
//!
//! Storage record and integer codec primitives for tidekv.
//!
//! This crate provides:
//! - LEB128 varint encoding for unsigned 64-bit integers
//! - Fixed-width big-endian integer encoding (order-preserving)
//! - The generic storage record key/value format used for both ordinary
//!   data and replication-log records
//!
//! All codecs are pure functions over byte buffers: no I/O, no shared
//! state, safe to call from any number of threads.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod fixed;
pub mod record;
pub mod varint;

pub use error::{CodecError, CodecResult};
pub use record::{Record, RecordKey, RecordType, RecordValue};
