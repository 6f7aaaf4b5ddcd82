//! Error types for record ingestion and hover queries.

use lsif_cache::CacheError;

/// Errors that can occur while reading records or answering queries.
///
/// Misses are never errors: queries report them as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// A record's payload did not match the shape its label requires.
    #[error("failed to decode '{label}' record: {source}")]
    Decode {
        /// The record label.
        label: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// An edge record carried no target vertex.
    #[error("'{label}' record is missing '{field}'")]
    MissingField {
        /// The record label.
        label: String,
        /// The absent field.
        field: &'static str,
    },

    /// A cache operation failed.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Reading the input stream failed.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// An error raised while processing a specific input line.
    #[error("line {line}: {source}")]
    AtLine {
        /// The 1-based line number.
        line: usize,
        /// The error raised for that line.
        source: Box<IndexError>,
    },
}
