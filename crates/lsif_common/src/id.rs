//! Canonical vertex and edge identifiers.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A unique identifier for a vertex or edge in an LSIF dump.
///
/// Identifiers are assigned monotonically by the indexer that produced the
/// dump and are the only key type used by the caches. Zero is reserved as the
/// unset value. See [`lenient`] for decoding the string form some indexers
/// emit.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(u32);

impl Id {
    /// The reserved unset identifier.
    pub const UNSET: Id = Id(0);

    /// Creates an `Id` from a raw `u32`.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw `u32` value of this identifier.
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// Returns `true` for the reserved unset identifier.
    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Id {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.0)
    }
}

/// Error returned when a string is not a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier '{input}': expected a non-negative integer no larger than {max}", max = u32::MAX)]
pub struct ParseIdError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(Id).map_err(|_| ParseIdError {
            input: s.to_string(),
        })
    }
}

/// Lenient decoding of identifiers as they appear in dumps.
///
/// Indexers emit identifiers either as JSON numbers or as decimal strings.
/// These functions accept both and are meant for `#[serde(deserialize_with)]`
/// on wire records; the canonical [`Id`] encoding stays a plain number.
pub mod lenient {
    use super::*;

    struct LenientId(Id);

    impl<'de> Deserialize<'de> for LenientId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct NumberOrString;

            impl<'de> Visitor<'de> for NumberOrString {
                type Value = LenientId;

                fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                    formatter.write_str("a non-negative integer or a decimal string")
                }

                fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                    u32::try_from(v)
                        .map(|raw| LenientId(Id(raw)))
                        .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
                }

                fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                    u32::try_from(v)
                        .map(|raw| LenientId(Id(raw)))
                        .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
                }

                fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                    v.parse::<Id>()
                        .map(LenientId)
                        .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }

            deserializer.deserialize_any(NumberOrString)
        }
    }

    /// Decodes a single identifier.
    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Id, D::Error> {
        LenientId::deserialize(deserializer).map(|l| l.0)
    }

    /// Decodes an optional identifier.
    pub fn option<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Id>, D::Error> {
        Option::<LenientId>::deserialize(deserializer).map(|l| l.map(|l| l.0))
    }

    /// Decodes a list of identifiers.
    pub fn vec<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Id>, D::Error> {
        Vec::<LenientId>::deserialize(deserializer).map(|ids| ids.into_iter().map(|l| l.0).collect())
    }
}
