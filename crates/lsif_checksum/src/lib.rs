//! Single-pass multi-digest checksums for uploaded artifacts.
//!
//! [`ChecksumFanout`] is a [`Write`](std::io::Write) sink that feeds every
//! byte to several digest accumulators at once, so a stream of unknown
//! length is hashed with every algorithm in one pass.

#![warn(missing_docs)]

pub mod algorithm;
pub mod fanout;

pub use algorithm::{Algorithm, ComplianceMode};
pub use fanout::{checksum_reader, ChecksumFanout, Checksums};
