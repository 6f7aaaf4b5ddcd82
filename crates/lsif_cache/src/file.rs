//! Disk-backed storage using a fixed-slot index file and an append-only
//! data file.
//!
//! Each identifier owns a 16-byte slot in the index file at offset
//! `id * SLOT_SIZE`:
//!
//! | bytes  | field                                   |
//! |--------|-----------------------------------------|
//! | 0..8   | offset of the value in the data file    |
//! | 8..12  | value length plus one (0 means absent)  |
//! | 12..16 | fingerprint of the value's content hash |
//!
//! Writing past the end of the index file leaves zero-filled slots behind,
//! which read back as absent. Overwrites append the new value and repoint the
//! slot, so memory use never depends on the number of identifiers.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use lsif_common::{ContentHash, Id};
use tempfile::NamedTempFile;

use crate::backend::{Backend, BackendError};

/// Size in bytes of one index slot.
const SLOT_SIZE: u64 = 16;

/// A decoded index slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    offset: u64,
    len: u32,
    fingerprint: u32,
}

impl Slot {
    fn encode(&self) -> [u8; SLOT_SIZE as usize] {
        let mut out = [0u8; SLOT_SIZE as usize];
        out[..8].copy_from_slice(&self.offset.to_le_bytes());
        out[8..12].copy_from_slice(&(self.len + 1).to_le_bytes());
        out[12..].copy_from_slice(&self.fingerprint.to_le_bytes());
        out
    }

    fn decode(raw: &[u8; SLOT_SIZE as usize]) -> Option<Self> {
        let len_plus_one = u32::from_le_bytes([raw[8], raw[9], raw[10], raw[11]]);
        if len_plus_one == 0 {
            return None;
        }
        let mut offset = [0u8; 8];
        offset.copy_from_slice(&raw[..8]);
        Some(Self {
            offset: u64::from_le_bytes(offset),
            len: len_plus_one - 1,
            fingerprint: u32::from_le_bytes([raw[12], raw[13], raw[14], raw[15]]),
        })
    }
}

/// A backend storing values in two temporary files.
///
/// Both files are removed when the backend is closed or dropped.
pub struct FileBackend {
    index: NamedTempFile,
    data: NamedTempFile,
    index_len: u64,
    data_len: u64,
    entries: usize,
}

impl FileBackend {
    /// Creates the index and data files in `dir`, or in the system temporary
    /// directory when `dir` is `None`. `name` prefixes both file names.
    pub fn create(name: &str, dir: Option<&Path>) -> std::io::Result<Self> {
        let dir = dir.map_or_else(std::env::temp_dir, Path::to_path_buf);
        std::fs::create_dir_all(&dir)?;

        let index = tempfile::Builder::new()
            .prefix(&format!("{name}-index-"))
            .suffix(".lsif")
            .tempfile_in(&dir)?;
        let data = tempfile::Builder::new()
            .prefix(&format!("{name}-data-"))
            .suffix(".lsif")
            .tempfile_in(&dir)?;

        Ok(Self {
            index,
            data,
            index_len: 0,
            data_len: 0,
            entries: 0,
        })
    }

    /// Returns the path of the index file.
    pub fn index_path(&self) -> &Path {
        self.index.path()
    }

    /// Returns the path of the data file.
    pub fn data_path(&self) -> &Path {
        self.data.path()
    }

    fn slot_position(id: Id) -> u64 {
        u64::from(id.as_raw()) * SLOT_SIZE
    }

    fn read_slot(&self, id: Id) -> std::io::Result<Option<Slot>> {
        let pos = Self::slot_position(id);
        if pos + SLOT_SIZE > self.index_len {
            return Ok(None);
        }
        let mut raw = [0u8; SLOT_SIZE as usize];
        read_exact_at(self.index.as_file(), pos, &mut raw)?;
        Ok(Slot::decode(&raw))
    }
}

fn read_exact_at(mut file: &File, pos: u64, buf: &mut [u8]) -> std::io::Result<()> {
    file.seek(SeekFrom::Start(pos))?;
    file.read_exact(buf)
}

fn write_all_at(mut file: &File, pos: u64, buf: &[u8]) -> std::io::Result<()> {
    file.seek(SeekFrom::Start(pos))?;
    file.write_all(buf)
}

impl Backend for FileBackend {
    fn kind(&self) -> &'static str {
        "file"
    }

    fn put(&mut self, id: Id, value: &[u8]) -> Result<(), BackendError> {
        let len = u32::try_from(value.len())
            .ok()
            .filter(|len| *len < u32::MAX)
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("value of {} bytes exceeds the slot limit", value.len()),
                )
            })?;

        let was_present = self.read_slot(id)?.is_some();

        let offset = self.data_len;
        write_all_at(self.data.as_file(), offset, value)?;
        self.data_len += u64::from(len);

        let slot = Slot {
            offset,
            len,
            fingerprint: ContentHash::from_bytes(value).fingerprint(),
        };
        let pos = Self::slot_position(id);
        write_all_at(self.index.as_file(), pos, &slot.encode())?;
        self.index_len = self.index_len.max(pos + SLOT_SIZE);

        if !was_present {
            self.entries += 1;
        }
        Ok(())
    }

    fn get(&self, id: Id) -> Result<Option<Vec<u8>>, BackendError> {
        let Some(slot) = self.read_slot(id)? else {
            return Ok(None);
        };

        let end = slot.offset.checked_add(u64::from(slot.len)).ok_or_else(|| {
            BackendError::Corrupt(format!(
                "slot range overflows ({} + {})",
                slot.offset, slot.len
            ))
        })?;
        if end > self.data_len {
            return Err(BackendError::Corrupt(format!(
                "slot points past the end of the data file ({} + {} > {})",
                slot.offset, slot.len, self.data_len
            )));
        }

        let mut buf = vec![0u8; slot.len as usize];
        read_exact_at(self.data.as_file(), slot.offset, &mut buf)?;

        let actual = ContentHash::from_bytes(&buf).fingerprint();
        if actual != slot.fingerprint {
            return Err(BackendError::Corrupt(format!(
                "checksum mismatch: expected {:08x}, got {actual:08x}",
                slot.fingerprint
            )));
        }

        Ok(Some(buf))
    }

    fn len(&self) -> usize {
        self.entries
    }

    fn close(self: Box<Self>) -> std::io::Result<()> {
        let FileBackend { index, data, .. } = *self;
        index.close()?;
        data.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_backend() -> (tempfile::TempDir, FileBackend) {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::create("test", Some(dir.path())).unwrap();
        (dir, backend)
    }

    #[test]
    fn slot_encode_decode() {
        let slot = Slot {
            offset: 1234,
            len: 0,
            fingerprint: 0xdead_beef,
        };
        assert_eq!(Slot::decode(&slot.encode()), Some(slot));
        assert_eq!(Slot::decode(&[0u8; SLOT_SIZE as usize]), None);
    }

    #[test]
    fn write_and_read_back() {
        let (_dir, mut backend) = make_backend();
        backend.put(Id::from_raw(5), b"hover text").unwrap();
        assert_eq!(backend.get(Id::from_raw(5)).unwrap().unwrap(), b"hover text");
    }

    #[test]
    fn holes_read_as_absent() {
        let (_dir, mut backend) = make_backend();
        backend.put(Id::from_raw(10), b"ten").unwrap();
        assert!(backend.get(Id::from_raw(3)).unwrap().is_none());
        assert!(backend.get(Id::from_raw(11)).unwrap().is_none());
        assert!(backend.get(Id::from_raw(1_000_000)).unwrap().is_none());
    }

    #[test]
    fn empty_value_is_present() {
        let (_dir, mut backend) = make_backend();
        backend.put(Id::from_raw(1), b"").unwrap();
        assert_eq!(backend.get(Id::from_raw(1)).unwrap().unwrap(), b"");
    }

    #[test]
    fn overwrite_repoints_slot() {
        let (_dir, mut backend) = make_backend();
        backend.put(Id::from_raw(2), b"first").unwrap();
        backend.put(Id::from_raw(4), b"other").unwrap();
        backend.put(Id::from_raw(2), b"second value").unwrap();
        assert_eq!(backend.get(Id::from_raw(2)).unwrap().unwrap(), b"second value");
        assert_eq!(backend.get(Id::from_raw(4)).unwrap().unwrap(), b"other");
        assert_eq!(backend.len(), 2);
    }

    #[test]
    fn tampered_data_is_corrupt() {
        let (_dir, mut backend) = make_backend();
        backend.put(Id::from_raw(1), b"original").unwrap();
        write_all_at(backend.data.as_file(), 0, b"tampered").unwrap();

        let err = backend.get(Id::from_raw(1)).unwrap_err();
        match err {
            BackendError::Corrupt(reason) => assert!(reason.contains("checksum mismatch")),
            other => panic!("expected corruption, got {other:?}"),
        }
    }

    #[test]
    fn dangling_slot_is_corrupt() {
        let (_dir, mut backend) = make_backend();
        backend.put(Id::from_raw(1), b"value").unwrap();
        let bogus = Slot {
            offset: 4096,
            len: 8,
            fingerprint: 0,
        };
        write_all_at(backend.index.as_file(), SLOT_SIZE, &bogus.encode()).unwrap();

        assert!(matches!(
            backend.get(Id::from_raw(1)),
            Err(BackendError::Corrupt(_))
        ));
    }

    #[test]
    fn overflowing_slot_is_corrupt() {
        let (_dir, mut backend) = make_backend();
        backend.put(Id::from_raw(1), b"value").unwrap();
        let bogus = Slot {
            offset: u64::MAX - 2,
            len: 8,
            fingerprint: 0,
        };
        write_all_at(backend.index.as_file(), SLOT_SIZE, &bogus.encode()).unwrap();

        match backend.get(Id::from_raw(1)) {
            Err(BackendError::Corrupt(reason)) => assert!(reason.contains("overflows")),
            other => panic!("expected corruption, got {other:?}"),
        }
    }

    #[test]
    fn files_use_name_prefix_and_are_removed_on_close() {
        let (dir, backend) = make_backend();
        let index_path = backend.index_path().to_path_buf();
        let data_path = backend.data_path().to_path_buf();
        assert!(index_path.starts_with(dir.path()));
        let file_name = index_path.file_name().unwrap().to_string_lossy().to_string();
        assert!(file_name.starts_with("test-index-"));
        assert!(index_path.exists());
        assert!(data_path.exists());

        Box::new(backend).close().unwrap();
        assert!(!index_path.exists());
        assert!(!data_path.exists());
    }

    #[test]
    fn create_makes_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("cache");
        let backend = FileBackend::create("nested", Some(&nested)).unwrap();
        assert!(backend.index_path().starts_with(&nested));
    }
}
