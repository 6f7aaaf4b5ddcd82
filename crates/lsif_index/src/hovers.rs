//! Hover contents keyed by result set.

use lsif_cache::{CacheOptions, IdCache};
use lsif_common::Id;

use crate::error::IndexError;
use crate::payload::HoverPayload;
use crate::record::{self, Edge, HoverResultVertex, RecordKind, HOVER_EDGE, HOVER_RESULT};

/// Cache name for hover payloads, keyed by `hoverResult` id.
const PAYLOAD_STORE: &str = "hover-payloads";

/// Cache name for result set links, keyed by result set id.
const LINK_STORE: &str = "hover-links";

/// Accumulates hover payloads while a dump is streamed.
///
/// A `hoverResult` vertex defines contents once; `textDocument/hover` edges
/// then attach it to any number of result sets. The two are kept in separate
/// caches and joined at query time, so shared contents are stored once.
pub struct HoverIndex {
    payloads: IdCache<HoverPayload>,
    links: IdCache<Id>,
}

impl HoverIndex {
    /// Opens the payload and link caches with the given storage options.
    pub fn open(options: &CacheOptions) -> Result<Self, IndexError> {
        Ok(Self {
            payloads: IdCache::open(PAYLOAD_STORE, HoverPayload::default(), options)?,
            links: IdCache::open(LINK_STORE, Id::UNSET, options)?,
        })
    }

    /// Creates an index backed entirely by memory.
    pub fn in_memory() -> Self {
        Self {
            payloads: IdCache::in_memory(PAYLOAD_STORE, HoverPayload::default()),
            links: IdCache::in_memory(LINK_STORE, Id::UNSET),
        }
    }

    /// Processes one record.
    ///
    /// `hoverResult` vertices and `textDocument/hover` edges update the
    /// index; every other label is ignored.
    pub fn read(&mut self, label: &str, line: &[u8]) -> Result<RecordKind, IndexError> {
        match label {
            HOVER_RESULT => {
                let vertex: HoverResultVertex = record::decode(label, line)?;
                let payload = HoverPayload::from_json(vertex.result.contents.get());
                self.payloads.set_entry(vertex.id, &payload)?;
                Ok(RecordKind::HoverDefinition)
            }
            HOVER_EDGE => {
                let edge: Edge = record::decode(label, line)?;
                // A hover edge points at exactly one hoverResult.
                let hover_result = edge.targets(label)?[0];
                self.links.set_entry(edge.out_v, &hover_result)?;
                Ok(RecordKind::HoverLink)
            }
            _ => Ok(RecordKind::Ignored),
        }
    }

    /// Returns the hover payload attached to `result_set`, if any.
    ///
    /// A result set with no hover edge, or whose edge points at contents that
    /// were never defined, yields `Ok(None)`.
    pub fn for_result_set(&self, result_set: Id) -> Result<Option<HoverPayload>, IndexError> {
        let Some(hover_result) = self.links.try_entry(result_set)? else {
            return Ok(None);
        };
        Ok(self.payloads.try_entry(hover_result)?)
    }

    /// Returns the number of hover payloads defined so far.
    pub fn payload_count(&self) -> Result<usize, IndexError> {
        Ok(self.payloads.len()?)
    }

    /// Closes the link cache, then the payload cache. Stops at the first
    /// failure.
    pub fn close(&mut self) -> Result<(), IndexError> {
        self.links.close()?;
        self.payloads.close()?;
        Ok(())
    }
}
