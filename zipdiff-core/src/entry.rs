//! Archive entry metadata.
//!
//! This module defines [`EntryMetadata`], the format-agnostic view of one
//! entry in a flattened archive tree, and [`Timestamp`], the calendar time
//! stored in ZIP headers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Modification time as stored in a ZIP header.
///
/// ZIP keeps MS-DOS date/time fields with two-second resolution and no
/// timezone, so this is a plain calendar value rather than a `SystemTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Year (1980-2107).
    pub year: u16,
    /// Month (1-12).
    pub month: u8,
    /// Day of month (1-31).
    pub day: u8,
    /// Hour (0-23).
    pub hour: u8,
    /// Minute (0-59).
    pub minute: u8,
    /// Second (0-58, even).
    pub second: u8,
}

impl Timestamp {
    /// Create a timestamp from its calendar fields.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Metadata of a single entry in a flattened archive tree.
///
/// `name` is the normalized key used for comparison. `archive_path` is the
/// raw path of the entry inside the archive that physically contains it,
/// which for nested entries is the inner archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMetadata {
    /// Normalized flat name (unique within a tree).
    pub name: String,
    /// Raw path inside the containing archive.
    pub archive_path: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Compressed size in bytes.
    pub compressed_size: u64,
    /// CRC-32 checksum from the header.
    pub crc32: u32,
    /// Last modification time, if the header carries a valid one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<Timestamp>,
}

impl EntryMetadata {
    /// Create a new file entry whose raw path equals its name.
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        Self {
            archive_path: name.clone(),
            name,
            is_dir: false,
            size,
            compressed_size: size,
            crc32: 0,
            modified: None,
        }
    }

    /// Create a new directory entry whose raw path equals its name.
    pub fn directory(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            archive_path: name.clone(),
            name,
            is_dir: true,
            size: 0,
            compressed_size: 0,
            crc32: 0,
            modified: None,
        }
    }

    /// Builder method to set the raw archive path.
    pub fn with_archive_path(mut self, path: impl Into<String>) -> Self {
        self.archive_path = path.into();
        self
    }

    /// Builder method to set compressed size.
    pub fn with_compressed_size(mut self, size: u64) -> Self {
        self.compressed_size = size;
        self
    }

    /// Builder method to set CRC-32.
    pub fn with_crc32(mut self, crc: u32) -> Self {
        self.crc32 = crc;
        self
    }

    /// Builder method to set modification time.
    pub fn with_modified(mut self, time: Timestamp) -> Self {
        self.modified = Some(time);
        self
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

impl fmt::Display for EntryMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_char = if self.is_dir { 'd' } else { '-' };
        write!(
            f,
            "{}{:>10} {:>10} {:08x} {}",
            type_char, self.size, self.compressed_size, self.crc32, self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_file() {
        let entry = EntryMetadata::file("lib/a.txt", 1000)
            .with_compressed_size(500)
            .with_crc32(0xDEADBEEF);

        assert!(!entry.is_dir());
        assert_eq!(entry.size, 1000);
        assert_eq!(entry.compressed_size, 500);
        assert_eq!(entry.archive_path, "lib/a.txt");
        assert_eq!(entry.to_string(), "-      1000        500 deadbeef lib/a.txt");
    }

    #[test]
    fn test_entry_directory() {
        let entry = EntryMetadata::directory("META-INF/");
        assert!(entry.is_dir());
        assert_eq!(entry.size, 0);
    }

    #[test]
    fn test_archive_path_is_independent() {
        let entry = EntryMetadata::file("classes/Foo.class", 10)
            .with_archive_path("app/classes/Foo.class");
        assert_eq!(entry.name, "classes/Foo.class");
        assert_eq!(entry.archive_path, "app/classes/Foo.class");
    }

    #[test]
    fn test_timestamp_display_and_order() {
        let early = Timestamp::new(2020, 1, 2, 3, 4, 6);
        let late = Timestamp::new(2020, 1, 2, 3, 5, 0);
        assert_eq!(early.to_string(), "2020-01-02 03:04:06");
        assert!(early < late);
    }
}
