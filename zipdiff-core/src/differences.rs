//! The result of comparing two archive trees.

use crate::entry::EntryMetadata;
use crate::path::strip_prefix_segments;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

/// Label used when the source archive has no name.
pub const DEFAULT_SOURCE_LABEL: &str = "filename1.zip";

/// Label used when the target archive has no name.
pub const DEFAULT_TARGET_LABEL: &str = "filename2.zip";

/// Metadata of an entry present in both archives with differing headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedEntry {
    /// Entry as found in the source archive.
    pub source: EntryMetadata,
    /// Entry as found in the target archive.
    pub target: EntryMetadata,
}

impl ChangedEntry {
    /// Pair up both sides of a changed entry.
    pub fn new(source: EntryMetadata, target: EntryMetadata) -> Self {
        Self { source, target }
    }

    /// The same pair seen from the other direction.
    pub fn swapped(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }
}

/// Classified differences between a source and a target archive.
///
/// Every name of either tree is in at most one of the three groups; names
/// whose metadata matched are not retained. All groups iterate in
/// lexicographic name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DifferenceSet {
    source_label: Option<String>,
    target_label: Option<String>,
    added: BTreeMap<String, EntryMetadata>,
    removed: BTreeMap<String, EntryMetadata>,
    changed: BTreeMap<String, ChangedEntry>,
}

impl DifferenceSet {
    /// Assemble a difference set from its classified groups.
    pub fn new(
        source_label: Option<String>,
        target_label: Option<String>,
        added: BTreeMap<String, EntryMetadata>,
        removed: BTreeMap<String, EntryMetadata>,
        changed: BTreeMap<String, ChangedEntry>,
    ) -> Self {
        Self {
            source_label,
            target_label,
            added,
            removed,
            changed,
        }
    }

    /// Entries only present in the target archive.
    pub fn added(&self) -> &BTreeMap<String, EntryMetadata> {
        &self.added
    }

    /// Entries only present in the source archive.
    pub fn removed(&self) -> &BTreeMap<String, EntryMetadata> {
        &self.removed
    }

    /// Entries present in both archives whose metadata differs.
    pub fn changed(&self) -> &BTreeMap<String, ChangedEntry> {
        &self.changed
    }

    /// True iff any group is non-empty.
    pub fn has_differences(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty() || !self.changed.is_empty()
    }

    /// Total number of classified names.
    pub fn total(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }

    /// Label of the source archive, if known.
    pub fn source_label(&self) -> Option<&str> {
        self.source_label.as_deref()
    }

    /// Label of the target archive, if known.
    pub fn target_label(&self) -> Option<&str> {
        self.target_label.as_deref()
    }

    /// Label of the source archive, or a placeholder.
    pub fn source_display(&self) -> &str {
        self.source_label().unwrap_or(DEFAULT_SOURCE_LABEL)
    }

    /// Label of the target archive, or a placeholder.
    pub fn target_display(&self) -> &str {
        self.target_label().unwrap_or(DEFAULT_TARGET_LABEL)
    }

    /// Plain-text summary with `output_skip` leading segments stripped from
    /// every listed name.
    pub fn summary(&self, output_skip: usize) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_summary(&mut out, output_skip);
        out
    }

    fn write_summary(&self, out: &mut String, output_skip: usize) -> fmt::Result {
        let target = self.target_display();

        writeln!(out, "{} file(s) added to {}", self.added.len(), target)?;
        for name in self.added.keys() {
            writeln!(out, "\t[added] {}", strip_prefix_segments(name, output_skip))?;
        }

        writeln!(out, "{} file(s) removed from {}", self.removed.len(), target)?;
        for name in self.removed.keys() {
            writeln!(out, "\t[removed] {}", strip_prefix_segments(name, output_skip))?;
        }

        writeln!(out, "{} file(s) changed", self.changed.len())?;
        for (name, change) in &self.changed {
            writeln!(
                out,
                "\t[changed] {} (size: {} : {})",
                strip_prefix_segments(name, output_skip),
                change.source.size,
                change.target.size
            )?;
        }

        write!(out, "Total differences: {}", self.total())
    }
}

impl fmt::Display for DifferenceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DifferenceSet {
        let mut added = BTreeMap::new();
        added.insert("app/new.txt".to_string(), EntryMetadata::file("app/new.txt", 3));
        let mut removed = BTreeMap::new();
        removed.insert("app/old.txt".to_string(), EntryMetadata::file("app/old.txt", 4));
        let mut changed = BTreeMap::new();
        changed.insert(
            "app/mod.txt".to_string(),
            ChangedEntry::new(
                EntryMetadata::file("app/mod.txt", 10),
                EntryMetadata::file("app/mod.txt", 12),
            ),
        );
        DifferenceSet::new(
            Some("a.zip".to_string()),
            Some("b.zip".to_string()),
            added,
            removed,
            changed,
        )
    }

    #[test]
    fn test_empty_has_no_differences() {
        let diff = DifferenceSet::default();
        assert!(!diff.has_differences());
        assert_eq!(diff.total(), 0);
        assert_eq!(diff.source_display(), DEFAULT_SOURCE_LABEL);
        assert_eq!(diff.target_display(), DEFAULT_TARGET_LABEL);
    }

    #[test]
    fn test_summary_format() {
        let expected = "1 file(s) added to b.zip\n\
                        \t[added] app/new.txt\n\
                        1 file(s) removed from b.zip\n\
                        \t[removed] app/old.txt\n\
                        1 file(s) changed\n\
                        \t[changed] app/mod.txt (size: 10 : 12)\n\
                        Total differences: 3";
        let diff = sample();
        assert!(diff.has_differences());
        assert_eq!(diff.to_string(), expected);
    }

    #[test]
    fn test_summary_strips_output_prefix() {
        let summary = sample().summary(1);
        assert!(summary.contains("\t[added] new.txt\n"));
        assert!(summary.contains("\t[removed] old.txt\n"));
        assert!(summary.contains("\t[changed] mod.txt (size: 10 : 12)\n"));
    }

    #[test]
    fn test_changed_entry_swapped() {
        let change = ChangedEntry::new(EntryMetadata::file("x", 1), EntryMetadata::file("x", 2));
        let swapped = change.swapped();
        assert_eq!(swapped.source.size, 2);
        assert_eq!(swapped.target.size, 1);
    }
}
