//! Streaming hover resolution for LSIF dumps.
//!
//! Records are fed one at a time to a [`ReferenceResolver`], which keeps
//! reference-to-result-set edges and delegates everything else to a
//! [`HoverIndex`]. After the stream has been consumed, hover contents for a
//! reference are answered by chasing identifiers through two independent
//! caches, so neither side ever holds the whole graph in memory.

#![warn(missing_docs)]

pub mod error;
pub mod hovers;
pub mod ingest;
pub mod payload;
pub mod record;
pub mod references;

pub use error::IndexError;
pub use hovers::HoverIndex;
pub use ingest::{ingest, IngestStats};
pub use payload::{HoverPayload, HoverSegment};
pub use record::{RecordKind, HOVER_EDGE, HOVER_RESULT, REFERENCES_EDGE};
pub use references::ReferenceResolver;
