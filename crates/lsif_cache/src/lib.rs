//! Identifier-keyed caches for out-of-core LSIF processing.
//!
//! An [`IdCache`] maps vertex identifiers to serializable values. Values live
//! either in memory or in temporary files on disk, so that a dump with
//! millions of vertices can be indexed in a single streaming pass without
//! holding the graph in memory.

#![warn(missing_docs)]

pub mod backend;
pub mod cache;
pub mod error;
pub mod file;

pub use backend::{Backend, BackendError, MemoryBackend};
pub use cache::{CacheOptions, IdCache, Storage};
pub use error::CacheError;
pub use file::FileBackend;
