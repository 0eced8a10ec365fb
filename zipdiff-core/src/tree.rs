//! Flattened archive trees.

use crate::entry::EntryMetadata;
use std::collections::BTreeMap;
use std::collections::btree_map;

/// A flattened archive: normalized name -> entry metadata.
///
/// Nested archives contribute their entries under `outer!inner` names, so a
/// tree is always a single flat map. Trees are built once and only read
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveTree {
    label: Option<String>,
    entries: BTreeMap<String, EntryMetadata>,
}

impl ArchiveTree {
    /// Create an empty tree.
    pub fn new(label: Option<String>) -> Self {
        Self {
            label,
            entries: BTreeMap::new(),
        }
    }

    /// Create a tree from already normalized entries. Later duplicates win.
    pub fn from_entries(
        label: Option<String>,
        entries: impl IntoIterator<Item = EntryMetadata>,
    ) -> Self {
        let mut tree = Self::new(label);
        for entry in entries {
            tree.insert(entry);
        }
        tree
    }

    /// Insert an entry under its name, returning the entry it replaced.
    pub fn insert(&mut self, entry: EntryMetadata) -> Option<EntryMetadata> {
        self.entries.insert(entry.name.clone(), entry)
    }

    /// Label of the archive this tree was built from (usually its path).
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Look up an entry by normalized name.
    pub fn get(&self, name: &str) -> Option<&EntryMetadata> {
        self.entries.get(name)
    }

    /// Check whether a normalized name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalized names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in lexicographic name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, EntryMetadata> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ArchiveTree {
    type Item = (&'a String, &'a EntryMetadata);
    type IntoIter = btree_map::Iter<'a, String, EntryMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut tree = ArchiveTree::new(Some("a.zip".to_string()));
        assert!(tree.insert(EntryMetadata::file("x", 1)).is_none());
        let replaced = tree.insert(EntryMetadata::file("x", 2));

        assert_eq!(replaced.map(|e| e.size), Some(1));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get("x").map(|e| e.size), Some(2));
        assert_eq!(tree.label(), Some("a.zip"));
    }

    #[test]
    fn test_names_are_sorted() {
        let tree = ArchiveTree::from_entries(
            None,
            vec![
                EntryMetadata::file("b", 1),
                EntryMetadata::file("a!c", 1),
                EntryMetadata::file("a", 1),
            ],
        );
        let names: Vec<_> = tree.names().collect();
        assert_eq!(names, vec!["a", "a!c", "b"]);
        assert!(tree.contains("a!c"));
        assert!(!tree.is_empty());
    }
}
