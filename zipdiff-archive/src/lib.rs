//! # zipdiff Archive
//!
//! Reading side of zipdiff: turns ZIP archives into flattened
//! [`ArchiveTree`](zipdiff_core::ArchiveTree)s.
//!
//! - [`detect`]: ZIP signature detection on entry contents
//! - [`filter`]: Regular-expression inclusion filter on entry names
//! - [`builder`]: Recursive tree builder
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use zipdiff_archive::{TreeOptions, build_tree};
//! use zipdiff_core::{ComparePolicy, compare_trees};
//!
//! let old = build_tree(Path::new("app-1.0.war"), &TreeOptions::new().with_skip_prefixes(1))?;
//! let new = build_tree(Path::new("app-1.1.war"), &TreeOptions::new().with_skip_prefixes(1))?;
//! let diff = compare_trees(&old, &new, &ComparePolicy::default());
//! println!("{}", diff);
//! # Ok::<(), zipdiff_core::ZipDiffError>(())
//! ```
//!
//! ## Nested archives
//!
//! A non-directory entry whose content starts with a ZIP signature and opens
//! as an archive with at least one entry is flattened too: `WEB-INF/lib/a.jar`
//! containing `A.class` yields both `WEB-INF/lib/a.jar` and
//! `WEB-INF/lib/a.jar!A.class`. Content that fails to open is kept as a plain
//! entry, and so is an archive nested deeper than
//! [`TreeOptions::max_nesting_depth`] (default
//! [`DEFAULT_MAX_NESTING_DEPTH`]).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod detect;
pub mod filter;

// Re-exports
pub use builder::{
    ArchiveTreeBuilder, DEFAULT_MAX_NESTING_DEPTH, TreeOptions, build_tree, build_tree_from_reader,
};
pub use detect::ArchiveFormat;
pub use filter::NameFilter;
