//! Line-by-line ingestion of newline-delimited LSIF dumps.

use std::io::BufRead;

use crate::error::IndexError;
use crate::record::{self, Envelope, RecordKind};
use crate::references::ReferenceResolver;

/// Counters collected during ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Non-blank lines processed.
    pub lines: usize,
    /// Reference edges stored.
    pub references: usize,
    /// Hover payloads stored.
    pub hovers_defined: usize,
    /// Result sets linked to hover payloads.
    pub hover_links: usize,
}

impl IngestStats {
    fn record(&mut self, kind: RecordKind) {
        self.lines += 1;
        match kind {
            RecordKind::Reference => self.references += 1,
            RecordKind::HoverDefinition => self.hovers_defined += 1,
            RecordKind::HoverLink => self.hover_links += 1,
            RecordKind::Ignored => {}
        }
    }
}

/// Feeds every record in `reader` to `resolver`.
///
/// Each line is decoded just far enough to find its label before being
/// dispatched. Blank lines are skipped. The first error aborts ingestion and
/// is reported with its 1-based line number; the resolver is left open so
/// the caller decides whether to close it.
pub fn ingest<R: BufRead>(
    resolver: &mut ReferenceResolver,
    reader: R,
) -> Result<IngestStats, IndexError> {
    let mut stats = IngestStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let at_line = |source: IndexError| IndexError::AtLine {
            line: line_no,
            source: Box::new(source),
        };

        let line = line.map_err(|e| at_line(e.into()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let envelope: Envelope = record::decode("<unknown>", trimmed.as_bytes()).map_err(at_line)?;
        let kind = resolver
            .read(&envelope.label, trimmed.as_bytes())
            .map_err(at_line)?;
        tracing::trace!(line = line_no, label = %envelope.label, ?kind, "record");
        stats.record(kind);
    }

    tracing::debug!(
        lines = stats.lines,
        references = stats.references,
        hovers_defined = stats.hovers_defined,
        hover_links = stats.hover_links,
        "ingested dump"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsif_common::Id;

    #[test]
    fn counts_each_record_kind() {
        let dump = r#"
{"id":1,"type":"vertex","label":"resultSet"}
{"id":2,"type":"vertex","label":"range"}
{"id":3,"type":"edge","label":"textDocument/references","outV":1,"inV":2}
{"id":4,"type":"vertex","label":"hoverResult","result":{"contents":"doc"}}

{"id":5,"type":"edge","label":"textDocument/hover","outV":1,"inV":4}
"#;
        let mut resolver = ReferenceResolver::in_memory();
        let stats = ingest(&mut resolver, dump.as_bytes()).unwrap();
        assert_eq!(
            stats,
            IngestStats {
                lines: 5,
                references: 1,
                hovers_defined: 1,
                hover_links: 1,
            }
        );
        assert!(resolver.hover_for(Id::from_raw(2)).unwrap().is_some());
    }

    #[test]
    fn error_reports_line_number() {
        let dump = "{\"id\":1,\"label\":\"resultSet\"}\n{\"id\":2,\"label\":\"textDocument/references\",\"outV\":\"x\",\"inV\":1}\n";
        let mut resolver = ReferenceResolver::in_memory();
        let err = ingest(&mut resolver, dump.as_bytes()).unwrap_err();
        match err {
            IndexError::AtLine { line, source } => {
                assert_eq!(line, 2);
                assert!(matches!(*source, IndexError::Decode { .. }));
            }
            other => panic!("expected line error, got {other:?}"),
        }
    }

    #[test]
    fn line_without_label_is_rejected() {
        let mut resolver = ReferenceResolver::in_memory();
        let err = ingest(&mut resolver, "{\"id\":1}\n".as_bytes()).unwrap_err();
        assert!(matches!(err, IndexError::AtLine { line: 1, .. }));
    }

    #[test]
    fn empty_input_is_empty_stats() {
        let mut resolver = ReferenceResolver::in_memory();
        let stats = ingest(&mut resolver, "".as_bytes()).unwrap();
        assert_eq!(stats, IngestStats::default());
    }
}
