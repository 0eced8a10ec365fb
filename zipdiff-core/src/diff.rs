//! Structural comparison of two archive trees.

use crate::differences::{ChangedEntry, DifferenceSet};
use crate::entry::EntryMetadata;
use crate::tree::ArchiveTree;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Which header fields decide whether two entries are equal.
///
/// Directory flag, uncompressed size and compressed size are always
/// compared; timestamps and CRC-32 are optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparePolicy {
    /// Compare modification times.
    pub compare_timestamps: bool,
    /// Compare CRC-32 checksums.
    pub compare_crc: bool,
}

impl Default for ComparePolicy {
    fn default() -> Self {
        Self {
            compare_timestamps: false,
            compare_crc: true,
        }
    }
}

impl ComparePolicy {
    /// Builder method to toggle timestamp comparison.
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.compare_timestamps = enabled;
        self
    }

    /// Builder method to toggle CRC comparison.
    pub fn with_crc(mut self, enabled: bool) -> Self {
        self.compare_crc = enabled;
        self
    }

    /// Whether two entries are equal on every enabled field.
    pub fn entries_match(&self, a: &EntryMetadata, b: &EntryMetadata) -> bool {
        a.is_dir == b.is_dir
            && a.size == b.size
            && a.compressed_size == b.compressed_size
            && (!self.compare_timestamps || a.modified == b.modified)
            && (!self.compare_crc || a.crc32 == b.crc32)
    }
}

/// Classify every name of `source` and `target` as added, removed, changed
/// or unchanged.
pub fn compare_trees(
    source: &ArchiveTree,
    target: &ArchiveTree,
    policy: &ComparePolicy,
) -> DifferenceSet {
    let mut added = BTreeMap::new();
    let mut removed = BTreeMap::new();
    let mut changed = BTreeMap::new();

    for (name, old) in source {
        match target.get(name) {
            None => {
                removed.insert(name.clone(), old.clone());
            }
            Some(new) if !policy.entries_match(old, new) => {
                debug!(entry = name.as_str(), "entry changed");
                changed.insert(name.clone(), ChangedEntry::new(old.clone(), new.clone()));
            }
            Some(_) => {}
        }
    }

    for (name, new) in target {
        if !source.contains(name) {
            added.insert(name.clone(), new.clone());
        }
    }

    info!(
        added = added.len(),
        removed = removed.len(),
        changed = changed.len(),
        "compared archive trees"
    );

    DifferenceSet::new(
        source.label().map(str::to_string),
        target.label().map(str::to_string),
        added,
        removed,
        changed,
    )
}
