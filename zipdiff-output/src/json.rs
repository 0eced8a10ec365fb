//! JSON report renderer.

use crate::{OutputRenderer, RenderSink, write_failed};
use serde::Serialize;
use std::io::Write;
use zipdiff_core::{DifferenceSet, EntryMetadata, Result, ZipDiffError, strip_prefix_segments};

/// Writes a pretty-printed JSON report with full entry metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[derive(Debug, Serialize)]
struct Report<'a> {
    source: &'a str,
    target: &'a str,
    added: Vec<EntryReport<'a>>,
    removed: Vec<EntryReport<'a>>,
    changed: Vec<ChangeReport<'a>>,
    total: usize,
}

#[derive(Debug, Serialize)]
struct EntryReport<'a> {
    name: &'a str,
    is_dir: bool,
    size: u64,
    compressed_size: u64,
    crc32: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChangeReport<'a> {
    name: &'a str,
    source: EntryReport<'a>,
    target: EntryReport<'a>,
}

impl<'a> EntryReport<'a> {
    fn new(name: &'a str, entry: &EntryMetadata) -> Self {
        Self {
            name,
            is_dir: entry.is_dir,
            size: entry.size,
            compressed_size: entry.compressed_size,
            crc32: format!("{:08x}", entry.crc32),
            modified: entry.modified.map(|t| t.to_string()),
        }
    }
}

impl<'a> Report<'a> {
    fn new(diff: &'a DifferenceSet, output_skip: usize) -> Self {
        let strip = |name: &'a String| strip_prefix_segments(name, output_skip);

        Self {
            source: diff.source_display(),
            target: diff.target_display(),
            added: diff
                .added()
                .iter()
                .map(|(name, entry)| EntryReport::new(strip(name), entry))
                .collect(),
            removed: diff
                .removed()
                .iter()
                .map(|(name, entry)| EntryReport::new(strip(name), entry))
                .collect(),
            changed: diff
                .changed()
                .iter()
                .map(|(name, change)| ChangeReport {
                    name: strip(name),
                    source: EntryReport::new(strip(name), &change.source),
                    target: EntryReport::new(strip(name), &change.target),
                })
                .collect(),
            total: diff.total(),
        }
    }
}

impl OutputRenderer for JsonRenderer {
    fn render(&self, sink: &mut dyn RenderSink, output_skip: usize, diff: &DifferenceSet) -> Result<()> {
        let report = Report::new(diff, output_skip);
        serde_json::to_writer_pretty(&mut *sink, &report)
            .map_err(|e| ZipDiffError::render(format!("cannot serialize report: {e}")))?;
        writeln!(sink).map_err(write_failed)
    }
}
