//! ZIP rebuild renderer.
//!
//! Produces a new archive holding the added and changed entries of the
//! target archive, re-read from disk. Entries found inside nested archives
//! have no standalone location in the target and are left out.
//!
//! The archive is written directly into the sink and entry contents stream
//! through a fixed-size buffer, so no entry is held in memory whole.

use crate::{OutputRenderer, RenderSink, write_failed};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};
use zipdiff_core::{
    DifferenceSet, EntryMetadata, Result, ZipDiffError, is_nested_name, strip_prefix_segments,
};

/// Rebuilds an archive of added and changed entries from the target archive.
#[derive(Debug, Clone)]
pub struct ArchiveRenderer {
    archive: PathBuf,
}

impl ArchiveRenderer {
    /// Create a renderer reading entry contents from `archive`.
    pub fn new(archive: impl Into<PathBuf>) -> Self {
        Self {
            archive: archive.into(),
        }
    }

    /// The archive entry contents are read from.
    pub fn archive(&self) -> &Path {
        &self.archive
    }
}

impl OutputRenderer for ArchiveRenderer {
    fn render(
        &self,
        sink: &mut dyn RenderSink,
        output_skip: usize,
        diff: &DifferenceSet,
    ) -> Result<()> {
        let selected = select_entries(diff);
        debug!(entries = selected.len(), "selected entries for rebuild");

        let file =
            File::open(&self.archive).map_err(|e| ZipDiffError::archive_open(&self.archive, e))?;
        let mut source = ZipArchive::new(BufReader::new(file))
            .map_err(|e| ZipDiffError::archive_open(&self.archive, e))?;

        let mut writer = ZipWriter::new(sink);
        let copied = rebuild(&mut source, &mut writer, &selected, output_skip)?;
        writer.finish().map_err(ZipDiffError::render)?;

        info!(
            archive = %self.archive.display(),
            entries = copied,
            "rebuilt archive of added and changed entries"
        );
        Ok(())
    }
}

/// Added and changed entries, as seen in the target, that live directly in
/// the target archive.
fn select_entries(diff: &DifferenceSet) -> Vec<&EntryMetadata> {
    let mut selected: Vec<&EntryMetadata> = diff
        .added()
        .values()
        .chain(diff.changed().values().map(|change| &change.target))
        .filter(|entry| !is_nested_name(&entry.name))
        .collect();
    selected.sort_by(|a, b| a.name.cmp(&b.name));
    selected
}

/// Copy `entries` into `writer`, returning how many were written.
fn rebuild<R: Read + Seek, W: Write + Seek>(
    source: &mut ZipArchive<R>,
    writer: &mut ZipWriter<W>,
    entries: &[&EntryMetadata],
    output_skip: usize,
) -> Result<usize> {
    let mut written = BTreeSet::new();

    for entry in entries {
        let name = strip_prefix_segments(&entry.name, output_skip);
        if name.is_empty() {
            debug!(entry = entry.name.as_str(), "entry collapsed by output prefix skip");
            continue;
        }
        if !written.insert(name) {
            warn!(entry = name, "output name already written, skipping");
            continue;
        }

        copy_entry(source, writer, entry, name)?;
    }

    Ok(written.len())
}

fn copy_entry<R: Read + Seek, W: Write + Seek>(
    source: &mut ZipArchive<R>,
    writer: &mut ZipWriter<W>,
    entry: &EntryMetadata,
    output_name: &str,
) -> Result<()> {
    let mut file = source.by_name(&entry.archive_path).map_err(|e| match e {
        ZipError::FileNotFound => ZipDiffError::entry_not_found(&entry.archive_path),
        other => ZipDiffError::archive_read(&entry.archive_path, other),
    })?;

    let method = match file.compression() {
        CompressionMethod::Stored => CompressionMethod::Stored,
        _ => CompressionMethod::Deflated,
    };
    let mut options = SimpleFileOptions::default().compression_method(method);
    if let Some(time) = file.last_modified() {
        options = options.last_modified_time(time);
    }

    if entry.is_dir() {
        writer
            .add_directory(output_name, options)
            .map_err(ZipDiffError::render)?;
        return Ok(());
    }

    writer
        .start_file(output_name, options)
        .map_err(ZipDiffError::render)?;
    copy_contents(&mut file, writer, &entry.archive_path)?;
    Ok(())
}

/// Size of the buffer entry contents stream through.
const COPY_BUFFER_SIZE: usize = 8 * 1024;

/// Stream `reader` into `writer`. Read failures belong to the entry `name`,
/// write failures to the output.
fn copy_contents<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    name: &str,
) -> Result<u64> {
    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;

    loop {
        let count = match reader.read(&mut buffer) {
            Ok(0) => return Ok(total),
            Ok(count) => count,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ZipDiffError::archive_read(name, e)),
        };
        writer.write_all(&buffer[..count]).map_err(write_failed)?;
        total += count as u64;
    }
}
