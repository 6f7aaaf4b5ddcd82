//! `lsif hover`: ingest a dump and resolve hover contents for references.

use std::fs::File;
use std::io::{BufReader, Write};

use lsif_common::Id;
use lsif_index::{ingest, IndexError, ReferenceResolver};
use serde::Serialize;

use crate::settings::cache_options;
use crate::{GlobalArgs, HoverArgs};

/// One output line per queried reference.
#[derive(Debug, Serialize)]
struct HoverLine {
    reference: Id,
    #[serde(rename = "resultSet")]
    result_set: Option<Id>,
    hover: Option<serde_json::Value>,
}

/// Runs the `lsif hover` command.
///
/// Ingests the whole dump first, then answers each `--reference` in order.
/// The caches are closed before returning, including when ingestion fails.
pub fn run(args: &HoverArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let file = File::open(&args.dump)
        .map_err(|e| format!("failed to open '{}': {e}", args.dump.display()))?;

    let options = cache_options(&global.config, args.memory);
    let mut resolver = ReferenceResolver::open(&options)?;

    let stats = match ingest(&mut resolver, BufReader::new(file)) {
        Ok(stats) => stats,
        Err(e) => {
            if let Err(close_err) = resolver.close() {
                tracing::warn!("failed to release caches after ingest error: {close_err}");
            }
            return Err(e.into());
        }
    };

    if !global.quiet {
        eprintln!(
            "   Ingested {} records: {} references, {} hovers, {} hover links",
            stats.lines, stats.references, stats.hovers_defined, stats.hover_links
        );
    }

    let written = write_hovers(&resolver, &args.references);
    resolver.close()?;
    written?;
    Ok(0)
}

fn write_hovers(
    resolver: &ReferenceResolver,
    references: &[Id],
) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for &reference in references {
        let line = resolve(resolver, reference)?;
        serde_json::to_writer(&mut out, &line)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn resolve(resolver: &ReferenceResolver, reference: Id) -> Result<HoverLine, IndexError> {
    let result_set = resolver.result_set_for(reference)?;
    let hover = match resolver.hover_for(reference)? {
        Some(payload) => Some(payload.to_value().map_err(|source| IndexError::Decode {
            label: lsif_index::HOVER_RESULT.to_string(),
            source,
        })?),
        None => None,
    };
    Ok(HoverLine {
        reference,
        result_set,
        hover,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsif_index::REFERENCES_EDGE;

    #[test]
    fn resolved_line_serializes_hover() {
        let mut resolver = ReferenceResolver::in_memory();
        let dump = r#"{"id":4,"label":"hoverResult","result":{"contents":"docs"}}
{"label":"textDocument/hover","outV":1,"inV":4}
{"label":"textDocument/references","outV":1,"inV":2}
"#;
        ingest(&mut resolver, dump.as_bytes()).unwrap();

        let line = resolve(&resolver, Id::from_raw(2)).unwrap();
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"{"reference":2,"resultSet":1,"hover":"docs"}"#);
    }

    #[test]
    fn unresolved_line_has_nulls() {
        let mut resolver = ReferenceResolver::in_memory();
        resolver
            .read(
                REFERENCES_EDGE,
                br#"{"label":"textDocument/references","outV":1,"inV":2}"#,
            )
            .unwrap();

        let json = serde_json::to_string(&resolve(&resolver, Id::from_raw(3)).unwrap()).unwrap();
        assert_eq!(json, r#"{"reference":3,"resultSet":null,"hover":null}"#);

        let json = serde_json::to_string(&resolve(&resolver, Id::from_raw(2)).unwrap()).unwrap();
        assert_eq!(json, r#"{"reference":2,"resultSet":1,"hover":null}"#);
    }
}
