//! Content hashing for cache entry integrity checks.

use std::fmt;

/// A 128-bit content hash computed using XXH3.
///
/// Cache backends record a hash of every encoded value so that a torn or
/// overwritten entry is reported as corruption instead of being decoded into
/// garbage.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Computes a content hash from a byte slice using XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }

    /// Returns a 32-bit fingerprint of the hash, suitable for fixed-width
    /// index slots.
    pub fn fingerprint(&self) -> u32 {
        u32::from_le_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}
