//! Reference-to-result-set resolution.

use lsif_cache::{CacheOptions, IdCache};
use lsif_common::Id;

use crate::error::IndexError;
use crate::hovers::HoverIndex;
use crate::payload::HoverPayload;
use crate::record::{self, Edge, RecordKind, REFERENCES_EDGE};

/// Cache name for reference edges, keyed by reference id.
const REFERENCE_STORE: &str = "references";

/// Answers "which hover applies to this reference?" for a streamed dump.
///
/// Wraps a [`HoverIndex`] and adds one record type: the reference edge,
/// which maps a reference to the result set holding its metadata.
pub struct ReferenceResolver {
    references: IdCache<Id>,
    hovers: HoverIndex,
}

impl ReferenceResolver {
    /// Opens the reference cache and the hover index with the given storage
    /// options.
    pub fn open(options: &CacheOptions) -> Result<Self, IndexError> {
        Ok(Self {
            references: IdCache::open(REFERENCE_STORE, Id::UNSET, options)?,
            hovers: HoverIndex::open(options)?,
        })
    }

    /// Creates a resolver backed entirely by memory.
    pub fn in_memory() -> Self {
        Self {
            references: IdCache::in_memory(REFERENCE_STORE, Id::UNSET),
            hovers: HoverIndex::in_memory(),
        }
    }

    /// Processes one record.
    ///
    /// Reference edges store `inV -> outV`; a later edge for the same
    /// reference replaces the earlier one. Every other record is passed to
    /// the hover index unchanged.
    pub fn read(&mut self, label: &str, line: &[u8]) -> Result<RecordKind, IndexError> {
        if label != REFERENCES_EDGE {
            return self.hovers.read(label, line);
        }

        let edge: Edge = record::decode(label, line)?;
        for reference in edge.targets(label)? {
            self.references.set_entry(reference, &edge.out_v)?;
        }
        Ok(RecordKind::Reference)
    }

    /// Returns the result set recorded for `reference`, if any.
    pub fn result_set_for(&self, reference: Id) -> Result<Option<Id>, IndexError> {
        Ok(self.references.try_entry(reference)?)
    }

    /// Returns the hover payload for `reference`, if any.
    ///
    /// A reference without a recorded result set, or whose result set has no
    /// hover, yields `Ok(None)`.
    pub fn hover_for(&self, reference: Id) -> Result<Option<HoverPayload>, IndexError> {
        match self.result_set_for(reference)? {
            Some(result_set) => self.hovers.for_result_set(result_set),
            None => Ok(None),
        }
    }

    /// Returns the wrapped hover index.
    pub fn hovers(&self) -> &HoverIndex {
        &self.hovers
    }

    /// Closes the reference cache, then the hover index. If the first close
    /// fails the hover index is left open and the error is returned.
    pub fn close(&mut self) -> Result<(), IndexError> {
        self.references.close()?;
        self.hovers.close()
    }
}
