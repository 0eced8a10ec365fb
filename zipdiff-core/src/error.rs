//! Error types for zipdiff operations.
//!
//! A comparison run stops at the first error. Nested archives that cannot be
//! confirmed as archives are not errors and never surface here.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for zipdiff operations.
#[derive(Debug, Error)]
pub enum ZipDiffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Missing or malformed configuration (arguments, filter pattern, format keyword).
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Description of the problem.
        message: String,
    },

    /// The archive could not be opened or is not a valid ZIP file.
    #[error("Cannot open archive {}: {message}", path.display())]
    ArchiveOpen {
        /// Path of the archive.
        path: PathBuf,
        /// Reason reported by the reader.
        message: String,
    },

    /// An entry stream could not be read.
    #[error("Cannot read entry {name}: {message}")]
    ArchiveRead {
        /// Name of the entry being read.
        name: String,
        /// Reason reported by the reader.
        message: String,
    },

    /// Entry not found in archive.
    #[error("Entry not found: {name}")]
    EntryNotFound {
        /// Name of the missing entry.
        name: String,
    },

    /// Output could not be produced or written.
    #[error("Render error: {message}")]
    Render {
        /// Description of the failure.
        message: String,
    },
}

/// Result type alias for zipdiff operations.
pub type Result<T> = std::result::Result<T, ZipDiffError>;

impl ZipDiffError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an archive open error.
    pub fn archive_open(path: impl AsRef<Path>, message: impl ToString) -> Self {
        Self::ArchiveOpen {
            path: path.as_ref().to_path_buf(),
            message: message.to_string(),
        }
    }

    /// Create an archive read error.
    pub fn archive_read(name: impl Into<String>, message: impl ToString) -> Self {
        Self::ArchiveRead {
            name: name.into(),
            message: message.to_string(),
        }
    }

    /// Create an entry not found error.
    pub fn entry_not_found(name: impl Into<String>) -> Self {
        Self::EntryNotFound { name: name.into() }
    }

    /// Create a render error.
    pub fn render(message: impl ToString) -> Self {
        Self::Render {
            message: message.to_string(),
        }
    }

    /// Whether this error comes from bad user input rather than I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
