//! Recursive flattening of ZIP archives into [`ArchiveTree`]s.
//!
//! Every entry of the archive becomes one tree entry keyed by its normalized
//! name. Entries whose content is itself a ZIP archive are additionally
//! flattened under `name!inner` keys, recursively.

use crate::detect::ArchiveFormat;
use crate::filter::NameFilter;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use tracing::{debug, info, trace, warn};
use zip::ZipArchive;
use zip::result::ZipError;
use zipdiff_core::{
    ArchiveTree, EntryMetadata, Result, Timestamp, ZipDiffError, nested_prefix,
    strip_prefix_segments,
};

/// Default limit on how many archives deep nested content is flattened.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 32;

/// Options for building one archive tree.
#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// Leading path segments stripped from top-level entry names.
    /// Nested archives are always flattened with no stripping.
    pub skip_prefixes: usize,
    /// Only entries whose raw name matches are kept.
    pub name_filter: Option<NameFilter>,
    /// Archives nested deeper than this are kept as plain entries.
    /// Zero disables nested flattening.
    pub max_nesting_depth: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            skip_prefixes: 0,
            name_filter: None,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl TreeOptions {
    /// Create default options (no stripping, no filter).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the nesting depth limit.
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Builder method to set the number of stripped segments.
    pub fn with_skip_prefixes(mut self, count: usize) -> Self {
        self.skip_prefixes = count;
        self
    }

    /// Builder method to set the name filter.
    pub fn with_name_filter(mut self, filter: NameFilter) -> Self {
        self.name_filter = Some(filter);
        self
    }
}

/// Builds flattened trees from ZIP archives.
#[derive(Debug, Clone, Default)]
pub struct ArchiveTreeBuilder {
    options: TreeOptions,
}

impl ArchiveTreeBuilder {
    /// Create a builder with the given options.
    pub fn new(options: TreeOptions) -> Self {
        Self { options }
    }

    /// The options this builder applies.
    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Build the tree of the archive at `path`. The tree is labelled with
    /// the path as given.
    pub fn build(&self, path: &Path) -> Result<ArchiveTree> {
        let file = File::open(path).map_err(|e| ZipDiffError::archive_open(path, e))?;
        let mut archive =
            ZipArchive::new(BufReader::new(file)).map_err(|e| ZipDiffError::archive_open(path, e))?;

        self.build_from_archive(&mut archive, path.display().to_string())
    }

    /// Build the tree of an archive held by any seekable reader.
    pub fn build_from_reader<R: Read + Seek>(
        &self,
        reader: R,
        label: impl Into<String>,
    ) -> Result<ArchiveTree> {
        let label = label.into();
        let mut archive =
            ZipArchive::new(reader).map_err(|e| ZipDiffError::archive_open(&label, e))?;

        self.build_from_archive(&mut archive, label)
    }

    fn build_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        label: String,
    ) -> Result<ArchiveTree> {
        let mut flattener = Flattener {
            filter: self.options.name_filter.as_ref(),
            max_depth: self.options.max_nesting_depth,
            tree: ArchiveTree::new(Some(label)),
        };
        flattener.flatten(archive, "", self.options.skip_prefixes)?;

        info!(
            archive = flattener.tree.label().unwrap_or_default(),
            entries = flattener.tree.len(),
            "built archive tree"
        );
        Ok(flattener.tree)
    }
}

/// Build the tree of the archive at `path`.
pub fn build_tree(path: &Path, options: &TreeOptions) -> Result<ArchiveTree> {
    ArchiveTreeBuilder::new(options.clone()).build(path)
}

/// Build the tree of an archive held by any seekable reader.
pub fn build_tree_from_reader<R: Read + Seek>(
    reader: R,
    label: impl Into<String>,
    options: &TreeOptions,
) -> Result<ArchiveTree> {
    ArchiveTreeBuilder::new(options.clone()).build_from_reader(reader, label)
}

/// Working state of one build.
struct Flattener<'a> {
    filter: Option<&'a NameFilter>,
    max_depth: usize,
    tree: ArchiveTree,
}

/// A nested archive being flattened, with the index of its next entry.
struct NestedFrame {
    archive: ZipArchive<Cursor<Vec<u8>>>,
    prefix: String,
    next: usize,
}

impl Flattener<'_> {
    fn flatten<R: Read + Seek>(
        &mut self,
        archive: &mut ZipArchive<R>,
        prefix: &str,
        skip: usize,
    ) -> Result<()> {
        for index in 0..archive.len() {
            let Some((name, content)) = self.process_entry(archive, index, prefix, skip)? else {
                continue;
            };
            if let Some(content) = content {
                self.flatten_nested(name, content)?;
            }
        }

        Ok(())
    }

    /// Flatten the content of entry `name` and everything nested in it,
    /// depth first, on an explicit stack.
    fn flatten_nested(&mut self, name: String, content: Vec<u8>) -> Result<()> {
        let mut stack: Vec<NestedFrame> = Vec::new();
        self.push_nested(&mut stack, name, content);

        while let Some(frame) = stack.last_mut() {
            if frame.next >= frame.archive.len() {
                stack.pop();
                continue;
            }
            let index = frame.next;
            frame.next += 1;

            let entry = self.process_entry(&mut frame.archive, index, &frame.prefix, 0)?;
            if let Some((name, Some(content))) = entry {
                self.push_nested(&mut stack, name, content);
            }
        }

        Ok(())
    }

    fn push_nested(&self, stack: &mut Vec<NestedFrame>, name: String, content: Vec<u8>) {
        let Some(archive) = open_nested(content) else {
            return;
        };

        if stack.len() >= self.max_depth {
            warn!(
                entry = name.as_str(),
                depth = stack.len(),
                "nesting depth limit reached, keeping archive as a plain entry"
            );
            return;
        }

        debug!(entry = name.as_str(), entries = archive.len(), "flattening nested archive");
        stack.push(NestedFrame {
            archive,
            prefix: nested_prefix(&name),
            next: 0,
        });
    }

    /// Record one entry. Returns its normalized name and, when the content
    /// starts with a ZIP signature, the fully buffered content.
    fn process_entry<R: Read + Seek>(
        &mut self,
        archive: &mut ZipArchive<R>,
        index: usize,
        prefix: &str,
        skip: usize,
    ) -> Result<Option<(String, Option<Vec<u8>>)>> {
        let raw = archive
            .by_index_raw(index)
            .map_err(|e| ZipDiffError::archive_read(format!("{prefix}#{index}"), e))?;
        let raw_name = raw.name().to_string();

        if let Some(filter) = self.filter {
            if !filter.matches(&raw_name) {
                debug!(entry = raw_name.as_str(), "entry does not match filter, excluding");
                return Ok(None);
            }
        }

        let full_name = format!("{prefix}{raw_name}");
        let name = strip_prefix_segments(&full_name, skip).to_string();
        if name.is_empty() {
            debug!(entry = full_name.as_str(), "entry collapsed by prefix skip");
            return Ok(None);
        }

        let metadata = EntryMetadata {
            name: name.clone(),
            archive_path: raw_name,
            is_dir: raw.is_dir(),
            size: raw.size(),
            compressed_size: raw.compressed_size(),
            crc32: raw.crc32(),
            modified: raw.last_modified().map(|t| {
                Timestamp::new(t.year(), t.month(), t.day(), t.hour(), t.minute(), t.second())
            }),
        };
        let is_dir = metadata.is_dir;
        drop(raw);

        trace!(entry = name.as_str(), "processing entry");
        if let Some(previous) = self.tree.insert(metadata) {
            warn!(
                entry = name.as_str(),
                replaced = previous.archive_path.as_str(),
                "duplicate entry name, keeping the later one"
            );
        }

        if is_dir {
            return Ok(Some((name, None)));
        }

        let content = match archive.by_index(index) {
            Ok(mut file) => buffer_if_archive(&mut file, &name)?,
            Err(ZipError::UnsupportedArchive(reason)) => {
                debug!(entry = name.as_str(), reason, "content not readable, keeping as leaf");
                None
            }
            Err(e) => return Err(ZipDiffError::archive_read(&name, e)),
        };

        Ok(Some((name, content)))
    }
}

/// Read the whole entry if its leading bytes are a ZIP signature.
///
/// Entry streams are forward-only, so the signature bytes are kept and the
/// rest is appended to them.
fn buffer_if_archive<R: Read>(file: &mut R, name: &str) -> Result<Option<Vec<u8>>> {
    let (format, mut buffer) =
        ArchiveFormat::detect(file).map_err(|e| ZipDiffError::archive_read(name, e))?;
    if !format.is_archive() {
        return Ok(None);
    }

    file.read_to_end(&mut buffer)
        .map_err(|e| ZipDiffError::archive_read(name, e))?;
    Ok(Some(buffer))
}

/// Open buffered content as a nested archive. Content that does not parse,
/// or parses without a readable first entry, is not an archive.
fn open_nested(content: Vec<u8>) -> Option<ZipArchive<Cursor<Vec<u8>>>> {
    let mut archive = ZipArchive::new(Cursor::new(content)).ok()?;
    if archive.len() == 0 || archive.by_index_raw(0).is_err() {
        return None;
    }
    Some(archive)
}
