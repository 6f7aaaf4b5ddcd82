//! Storage backends behind [`IdCache`](crate::IdCache).
//!
//! A backend is an opaque byte store keyed by [`Id`]. It knows nothing about
//! the values it holds; encoding and decoding happen in the cache layer.

use std::collections::HashMap;

use lsif_common::Id;

/// Errors raised by a storage backend.
///
/// The cache layer attaches the store name and identifier before surfacing
/// these as [`CacheError`](crate::CacheError).
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The underlying storage failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Stored bytes failed validation.
    #[error("{0}")]
    Corrupt(String),
}

/// An identifier-keyed byte store.
///
/// `put` overwrites any previous value for the same identifier. `get` returns
/// `Ok(None)` for identifiers that were never stored.
pub trait Backend: Send {
    /// Short name of the backend, used in log output.
    fn kind(&self) -> &'static str;

    /// Stores `value` under `id`, replacing any previous value.
    fn put(&mut self, id: Id, value: &[u8]) -> Result<(), BackendError>;

    /// Returns the bytes stored under `id`, if any.
    fn get(&self, id: Id) -> Result<Option<Vec<u8>>, BackendError>;

    /// Returns the number of distinct identifiers stored.
    fn len(&self) -> usize;

    /// Returns `true` when no identifier has been stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Releases the backend's resources.
    fn close(self: Box<Self>) -> std::io::Result<()>;
}

/// A backend holding every value in a hash map.
///
/// Suitable for small dumps and tests. Memory use grows with the number of
/// entries, unlike [`FileBackend`](crate::FileBackend).
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<Id, Vec<u8>>,
}

impl MemoryBackend {
    /// Creates an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for MemoryBackend {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn put(&mut self, id: Id, value: &[u8]) -> Result<(), BackendError> {
        self.entries.insert(id, value.to_vec());
        Ok(())
    }

    fn get(&self, id: Id) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.entries.get(&id).cloned())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn close(self: Box<Self>) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get() {
        let mut backend = MemoryBackend::new();
        backend.put(Id::from_raw(3), b"three").unwrap();
        assert_eq!(backend.get(Id::from_raw(3)).unwrap().unwrap(), b"three");
    }

    #[test]
    fn missing_is_none() {
        let backend = MemoryBackend::new();
        assert!(backend.get(Id::from_raw(1)).unwrap().is_none());
    }

    #[test]
    fn overwrite_keeps_len() {
        let mut backend = MemoryBackend::new();
        backend.put(Id::from_raw(1), b"a").unwrap();
        backend.put(Id::from_raw(1), b"b").unwrap();
        assert_eq!(backend.len(), 1);
        assert_eq!(backend.get(Id::from_raw(1)).unwrap().unwrap(), b"b");
    }

    #[test]
    fn is_empty_tracks_len() {
        let mut backend = MemoryBackend::new();
        assert!(backend.is_empty());
        backend.put(Id::from_raw(1), b"a").unwrap();
        assert!(!backend.is_empty());
    }

    #[test]
    fn close_succeeds() {
        let backend: Box<dyn Backend> = Box::new(MemoryBackend::new());
        assert_eq!(backend.kind(), "memory");
        backend.close().unwrap();
    }
}
