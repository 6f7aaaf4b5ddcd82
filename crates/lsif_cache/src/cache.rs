//! Identifier-keyed cache of serializable values.
//!
//! `IdCache` ties a storage [`Backend`] to a value type. Values are encoded
//! with bincode on write and decoded on read; the backend only ever sees
//! bytes.

use std::path::PathBuf;

use lsif_common::Id;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::{Backend, BackendError, MemoryBackend};
use crate::error::CacheError;
use crate::file::FileBackend;

/// Where a cache keeps its values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Storage {
    /// Values are held in a hash map.
    Memory,
    /// Values are written to temporary files.
    #[default]
    Disk,
}

/// Options controlling how caches are opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheOptions {
    /// The storage backend to use.
    pub storage: Storage,
    /// Directory for disk-backed caches. The system temporary directory is
    /// used when `None`.
    pub dir: Option<PathBuf>,
}

impl CacheOptions {
    /// Options for an in-memory cache.
    pub fn memory() -> Self {
        Self {
            storage: Storage::Memory,
            dir: None,
        }
    }

    /// Options for a disk-backed cache rooted at `dir`.
    pub fn disk_in(dir: impl Into<PathBuf>) -> Self {
        Self {
            storage: Storage::Disk,
            dir: Some(dir.into()),
        }
    }
}

/// A store mapping [`Id`]s to values of type `V`.
///
/// The cache follows a build-then-query lifecycle: it is populated during a
/// single streaming pass and queried afterwards. Writes for the same
/// identifier overwrite each other. Once [`close`](Self::close) has been
/// called every further operation fails with [`CacheError::Closed`].
pub struct IdCache<V> {
    name: String,
    default: V,
    backend: Option<Box<dyn Backend>>,
}

impl<V> IdCache<V>
where
    V: Serialize + DeserializeOwned + Clone,
{
    /// Opens a cache named `name` with the storage selected by `options`.
    ///
    /// `name` is used for file naming and diagnostics only; two caches with
    /// the same name never share entries. `default` is returned by
    /// [`entry_or_default`](Self::entry_or_default) on a miss.
    pub fn open(
        name: impl Into<String>,
        default: V,
        options: &CacheOptions,
    ) -> Result<Self, CacheError> {
        let name = name.into();
        let backend: Box<dyn Backend> = match options.storage {
            Storage::Memory => Box::new(MemoryBackend::new()),
            Storage::Disk => {
                let backend = FileBackend::create(&name, options.dir.as_deref()).map_err(|e| {
                    CacheError::Io {
                        store: name.clone(),
                        source: e,
                    }
                })?;
                Box::new(backend)
            }
        };
        tracing::debug!(store = %name, backend = backend.kind(), "opened cache");

        Ok(Self {
            name,
            default,
            backend: Some(backend),
        })
    }

    /// Creates an in-memory cache.
    pub fn in_memory(name: impl Into<String>, default: V) -> Self {
        Self {
            name: name.into(),
            default,
            backend: Some(Box::new(MemoryBackend::new())),
        }
    }

    /// Returns the cache name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value used for misses in [`entry_or_default`](Self::entry_or_default).
    pub fn default_value(&self) -> &V {
        &self.default
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.backend.is_none()
    }

    /// Returns the number of distinct identifiers stored.
    pub fn len(&self) -> Result<usize, CacheError> {
        Ok(self.backend()?.len())
    }

    /// Returns `true` if no identifier has been stored.
    pub fn is_empty(&self) -> Result<bool, CacheError> {
        Ok(self.backend()?.is_empty())
    }

    /// Stores `value` under `id`, replacing any previous value.
    pub fn set_entry(&mut self, id: Id, value: &V) -> Result<(), CacheError> {
        let bytes = bincode::serde::encode_to_vec(value, bincode::config::standard()).map_err(
            |e| CacheError::Serialization {
                store: self.name.clone(),
                reason: e.to_string(),
            },
        )?;

        let name = &self.name;
        let backend = self.backend.as_mut().ok_or_else(|| CacheError::Closed {
            store: name.clone(),
        })?;
        backend
            .put(id, &bytes)
            .map_err(|e| backend_error(name, id, e))
    }

    /// Returns the value stored under `id`.
    ///
    /// Fails with [`CacheError::NotFound`] if nothing was stored, and with
    /// [`CacheError::Corrupt`] or [`CacheError::Serialization`] if the stored
    /// bytes cannot be turned back into a `V`.
    pub fn entry(&self, id: Id) -> Result<V, CacheError> {
        let bytes = self
            .backend()?
            .get(id)
            .map_err(|e| backend_error(&self.name, id, e))?
            .ok_or_else(|| CacheError::NotFound {
                store: self.name.clone(),
                id,
            })?;

        let (value, read) =
            bincode::serde::decode_from_slice::<V, _>(&bytes, bincode::config::standard())
                .map_err(|e| CacheError::Serialization {
                    store: self.name.clone(),
                    reason: e.to_string(),
                })?;
        if read != bytes.len() {
            return Err(CacheError::Corrupt {
                store: self.name.clone(),
                id,
                reason: format!("{} trailing bytes after value", bytes.len() - read),
            });
        }
        Ok(value)
    }

    /// Returns the value stored under `id`, or the default value on a miss.
    ///
    /// Only [`CacheError::NotFound`] is absorbed; every other error is
    /// propagated.
    pub fn entry_or_default(&self, id: Id) -> Result<V, CacheError> {
        match self.entry(id) {
            Err(e) if e.is_not_found() => {
                tracing::trace!(store = %self.name, %id, "cache miss");
                Ok(self.default.clone())
            }
            other => other,
        }
    }

    /// Returns the value stored under `id`, or `None` on a miss.
    pub fn try_entry(&self, id: Id) -> Result<Option<V>, CacheError> {
        match self.entry(id) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Releases the cache's storage.
    ///
    /// Must be called exactly once; a second call fails with
    /// [`CacheError::Closed`].
    pub fn close(&mut self) -> Result<(), CacheError> {
        let backend = self.backend.take().ok_or_else(|| CacheError::Closed {
            store: self.name.clone(),
        })?;
        let kind = backend.kind();
        let entries = backend.len();
        backend.close().map_err(|e| CacheError::Close {
            store: self.name.clone(),
            source: e,
        })?;
        tracing::debug!(store = %self.name, backend = kind, entries, "closed cache");
        Ok(())
    }

    fn backend(&self) -> Result<&dyn Backend, CacheError> {
        self.backend.as_deref().ok_or_else(|| CacheError::Closed {
            store: self.name.clone(),
        })
    }
}

fn backend_error(store: &str, id: Id, err: BackendError) -> CacheError {
    match err {
        BackendError::Io(source) => CacheError::Io {
            store: store.to_string(),
            source,
        },
        BackendError::Corrupt(reason) => CacheError::Corrupt {
            store: store.to_string(),
            id,
            reason,
        },
    }
}
