//! # zipdiff Core
//!
//! Core components for comparing ZIP archives structurally.
//!
//! This crate is independent of any particular ZIP reader and provides:
//!
//! - [`entry`]: Entry metadata and ZIP timestamps
//! - [`tree`]: Flattened archive trees keyed by normalized name
//! - [`path`]: Prefix stripping and nested-archive naming
//! - [`diff`]: The comparison policy and tree diff
//! - [`differences`]: The classified result of a comparison
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI                                                     │
//! │     argument parsing, logging, output destination       │
//! ├─────────────────────────────────────────────────────────┤
//! │ Output                                                  │
//! │     text, XML, HTML, JSON and ZIP rebuild renderers     │
//! ├─────────────────────────────────────────────────────────┤
//! │ Archive                                                 │
//! │     signature detection, recursive tree builder         │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate)                                       │
//! │     metadata, trees, diff engine, difference sets       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use zipdiff_core::{ArchiveTree, ComparePolicy, EntryMetadata, compare_trees};
//!
//! let old = ArchiveTree::from_entries(None, vec![EntryMetadata::file("A", 2048)]);
//! let new = ArchiveTree::from_entries(
//!     None,
//!     vec![EntryMetadata::file("A", 2048), EntryMetadata::file("B", 2048)],
//! );
//!
//! let diff = compare_trees(&old, &new, &ComparePolicy::default());
//! assert!(diff.added().contains_key("B"));
//! assert!(diff.removed().is_empty());
//! assert!(diff.changed().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod diff;
pub mod differences;
pub mod entry;
pub mod error;
pub mod path;
pub mod tree;

// Re-exports for convenience
pub use diff::{ComparePolicy, compare_trees};
pub use differences::{ChangedEntry, DifferenceSet};
pub use entry::{EntryMetadata, Timestamp};
pub use error::{Result, ZipDiffError};
pub use path::{NESTED_SEPARATOR, is_nested_name, nested_prefix, strip_prefix_segments};
pub use tree::ArchiveTree;
