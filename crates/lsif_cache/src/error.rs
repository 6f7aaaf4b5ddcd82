//! Error types for cache operations.

use lsif_common::Id;

/// Errors that can occur during cache operations.
///
/// `NotFound` is the only variant that callers routinely recover from: it is
/// the normal outcome of looking up an identifier that was never stored.
/// Every other variant is fatal to the current operation.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// No value was ever stored for the identifier.
    #[error("no entry for id {id} in cache '{store}'")]
    NotFound {
        /// The cache name.
        store: String,
        /// The identifier that was looked up.
        id: Id,
    },

    /// An I/O error occurred in the underlying storage.
    #[error("cache '{store}' I/O error: {source}")]
    Io {
        /// The cache name.
        store: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A value could not be encoded or decoded.
    #[error("cache '{store}' serialization error: {reason}")]
    Serialization {
        /// The cache name.
        store: String,
        /// Description of the serialization failure.
        reason: String,
    },

    /// Stored bytes failed integrity validation.
    #[error("cache '{store}' entry {id} is corrupt: {reason}")]
    Corrupt {
        /// The cache name.
        store: String,
        /// The identifier whose entry is corrupt.
        id: Id,
        /// Description of the corruption.
        reason: String,
    },

    /// The cache was used after it was closed.
    #[error("cache '{store}' is closed")]
    Closed {
        /// The cache name.
        store: String,
    },

    /// Releasing the cache's resources failed.
    #[error("failed to close cache '{store}': {source}")]
    Close {
        /// The cache name.
        store: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl CacheError {
    /// Returns `true` if this is a miss rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = CacheError::NotFound {
            store: "references".to_string(),
            id: Id::from_raw(2),
        };
        assert_eq!(err.to_string(), "no entry for id 2 in cache 'references'");
        assert!(err.is_not_found());
    }

    #[test]
    fn io_error_display() {
        let err = CacheError::Io {
            store: "hovers".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        let msg = err.to_string();
        assert!(msg.contains("cache 'hovers' I/O error"));
        assert!(msg.contains("disk full"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn corrupt_display() {
        let err = CacheError::Corrupt {
            store: "hovers".to_string(),
            id: Id::from_raw(9),
            reason: "checksum mismatch".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("entry 9 is corrupt"));
        assert!(msg.contains("checksum mismatch"));
    }

    #[test]
    fn serialization_display() {
        let err = CacheError::Serialization {
            store: "links".to_string(),
            reason: "unexpected end".to_string(),
        };
        assert!(err.to_string().contains("unexpected end"));
    }

    #[test]
    fn closed_display() {
        let err = CacheError::Closed {
            store: "links".to_string(),
        };
        assert_eq!(err.to_string(), "cache 'links' is closed");
        assert!(!err.is_not_found());
    }

    #[test]
    fn close_display() {
        let err = CacheError::Close {
            store: "links".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().starts_with("failed to close cache 'links'"));
    }
}
