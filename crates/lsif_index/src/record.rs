//! Decoding of the LSIF records this crate understands.

use lsif_common::id::lenient;
use lsif_common::Id;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;

use crate::error::IndexError;

/// Label of the edge linking a reference to its result set.
pub const REFERENCES_EDGE: &str = "textDocument/references";

/// Label of the edge linking a result set to a hover result.
pub const HOVER_EDGE: &str = "textDocument/hover";

/// Label of the vertex carrying hover contents.
pub const HOVER_RESULT: &str = "hoverResult";

/// What a record turned out to be after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// A reference edge was stored.
    Reference,
    /// Hover contents were stored.
    HoverDefinition,
    /// A result set was linked to hover contents.
    HoverLink,
    /// The label is not one this crate handles.
    Ignored,
}

/// The part of every record needed for dispatch.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub label: String,
}

/// An edge record. Targets come either as a single `inV` or a list `inVs`.
#[derive(Debug, Deserialize)]
pub(crate) struct Edge {
    #[serde(rename = "outV", deserialize_with = "lenient::id")]
    pub out_v: Id,
    #[serde(rename = "inV", default, deserialize_with = "lenient::option")]
    pub in_v: Option<Id>,
    #[serde(rename = "inVs", default, deserialize_with = "lenient::vec")]
    pub in_vs: Vec<Id>,
}

impl Edge {
    /// Returns every target of the edge, failing if there is none.
    pub fn targets(&self, label: &str) -> Result<Vec<Id>, IndexError> {
        let targets: Vec<Id> = self.in_v.iter().chain(&self.in_vs).copied().collect();
        if targets.is_empty() {
            return Err(IndexError::MissingField {
                label: label.to_string(),
                field: "inV",
            });
        }
        Ok(targets)
    }
}

/// A `hoverResult` vertex. Only the contents are kept, undecoded.
#[derive(Debug, Deserialize)]
pub(crate) struct HoverResultVertex {
    #[serde(deserialize_with = "lenient::id")]
    pub id: Id,
    pub result: HoverResultBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HoverResultBody {
    pub contents: Box<RawValue>,
}

/// Decodes `line` as a `T`, tagging failures with `label`.
pub(crate) fn decode<T: DeserializeOwned>(label: &str, line: &[u8]) -> Result<T, IndexError> {
    serde_json::from_slice(line).map_err(|source| IndexError::Decode {
        label: label.to_string(),
        source,
    })
}
