//! Archive format detection.
//!
//! Entry contents are only worth buffering and probing when their leading
//! bytes carry a ZIP signature, so detection looks at magic bytes alone.

use std::io::Read;
use zipdiff_core::Result;

/// Number of leading bytes needed to recognize a signature.
pub const MAGIC_LEN: usize = 4;

/// Formats recognized when probing entry contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// ZIP family (.zip, .jar, .war, .ear, ...).
    Zip,
    /// Anything else.
    Unknown,
}

impl ArchiveFormat {
    /// Detect format from magic bytes.
    pub fn from_magic(magic: &[u8]) -> Self {
        if magic.len() < MAGIC_LEN || !magic.starts_with(b"PK") {
            return Self::Unknown;
        }

        match &magic[2..4] {
            [0x03, 0x04] => Self::Zip, // Local file header
            [0x05, 0x06] => Self::Zip, // End of central directory (empty archive)
            [0x07, 0x08] => Self::Zip, // Spanned archive marker
            _ => Self::Unknown,
        }
    }

    /// Detect format from a reader, returning the bytes consumed.
    ///
    /// The returned bytes must be replayed by the caller if the stream is
    /// read further, since most entry readers cannot seek back.
    pub fn detect<R: Read>(reader: &mut R) -> Result<(Self, Vec<u8>)> {
        let mut magic = Vec::with_capacity(MAGIC_LEN);
        reader.take(MAGIC_LEN as u64).read_to_end(&mut magic)?;

        let format = Self::from_magic(&magic);
        Ok((format, magic))
    }

    /// Check if this is an archive format that can be flattened.
    pub fn is_archive(&self) -> bool {
        matches!(self, Self::Zip)
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zip => write!(f, "ZIP"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}
