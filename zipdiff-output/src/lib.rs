//! # zipdiff Output
//!
//! Renderers turning a [`DifferenceSet`] into bytes.
//!
//! | Kind   | Renderer             | Output                                        |
//! |--------|----------------------|-----------------------------------------------|
//! | `text` | [`TextRenderer`]     | The plain-text summary                        |
//! | `xml`  | [`XmlRenderer`]      | `<zipdiff>` document                          |
//! | `html` | [`HtmlRenderer`]     | Standalone HTML page                          |
//! | `json` | [`JsonRenderer`]     | Pretty-printed JSON report                    |
//! | `zip`  | [`ArchiveRenderer`]  | New archive with added and changed entries    |
//!
//! Every renderer strips the requested number of leading path segments from
//! the names it emits. This output-side count is independent of the counts
//! used when the trees were built.
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use std::path::Path;
//! use zipdiff_core::{ArchiveTree, ComparePolicy, EntryMetadata, compare_trees};
//! use zipdiff_output::RendererKind;
//!
//! let old = ArchiveTree::from_entries(None, vec![EntryMetadata::file("app/A", 1)]);
//! let new = ArchiveTree::from_entries(None, vec![EntryMetadata::file("app/B", 1)]);
//! let diff = compare_trees(&old, &new, &ComparePolicy::default());
//!
//! let renderer = "text".parse::<RendererKind>()?.renderer(Path::new("new.zip"));
//! let mut out = Cursor::new(Vec::new());
//! renderer.render(&mut out, 1, &diff)?;
//! assert!(String::from_utf8_lossy(out.get_ref()).contains("[added] B"));
//! # Ok::<(), zipdiff_core::ZipDiffError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod archive;
pub mod escape;
pub mod html;
pub mod json;
pub mod text;
pub mod xml;

pub use archive::ArchiveRenderer;
pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use text::TextRenderer;
pub use xml::XmlRenderer;

use std::io::{self, Seek, Write};
use std::path::Path;
use std::str::FromStr;
use zipdiff_core::{DifferenceSet, Result, ZipDiffError};

/// Destination of rendered output.
///
/// Sinks are seekable so the ZIP rebuild can write its archive in place
/// instead of assembling it in memory first. Buffer in a
/// [`Cursor`](std::io::Cursor) for destinations that cannot seek.
pub trait RenderSink: Write + Seek {}

impl<T: Write + Seek + ?Sized> RenderSink for T {}

/// Formats a [`DifferenceSet`] into a sink.
pub trait OutputRenderer {
    /// Write the rendering of `diff` to `sink`, stripping `output_skip`
    /// leading segments from every emitted name.
    fn render(
        &self,
        sink: &mut dyn RenderSink,
        output_skip: usize,
        diff: &DifferenceSet,
    ) -> Result<()>;
}

/// The available renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RendererKind {
    /// Plain-text summary.
    #[default]
    Text,
    /// XML document.
    Xml,
    /// HTML page.
    Html,
    /// JSON report.
    Json,
    /// Rebuilt archive of added and changed entries.
    Zip,
}

/// Keyword accepted for each renderer kind.
pub const RENDERER_KEYWORDS: &[(&str, RendererKind)] = &[
    ("text", RendererKind::Text),
    ("xml", RendererKind::Xml),
    ("html", RendererKind::Html),
    ("json", RendererKind::Json),
    ("zip", RendererKind::Zip),
];

impl RendererKind {
    /// Look up a kind by keyword (case-insensitive).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        RENDERER_KEYWORDS
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(keyword))
            .map(|(_, kind)| *kind)
    }

    /// The keyword of this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Xml => "xml",
            Self::Html => "html",
            Self::Json => "json",
            Self::Zip => "zip",
        }
    }

    /// Pick a kind from the extension of an output file.
    pub fn for_output_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("xml") => Self::Xml,
            Some("html" | "htm") => Self::Html,
            Some("json") => Self::Json,
            Some("zip" | "jar" | "war" | "ear") => Self::Zip,
            _ => Self::Text,
        }
    }

    /// Create the renderer. `target_archive` is where the ZIP rebuild reads
    /// entry contents from; other kinds ignore it.
    pub fn renderer(self, target_archive: &Path) -> Box<dyn OutputRenderer> {
        match self {
            Self::Text => Box::new(TextRenderer),
            Self::Xml => Box::new(XmlRenderer),
            Self::Html => Box::new(HtmlRenderer),
            Self::Json => Box::new(JsonRenderer),
            Self::Zip => Box::new(ArchiveRenderer::new(target_archive)),
        }
    }

    /// Whether the output is binary rather than text.
    pub fn is_binary(self) -> bool {
        matches!(self, Self::Zip)
    }
}

impl FromStr for RendererKind {
    type Err = ZipDiffError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_keyword(s).ok_or_else(|| {
            let known: Vec<_> = RENDERER_KEYWORDS.iter().map(|(k, _)| *k).collect();
            ZipDiffError::configuration(format!(
                "unknown output format '{}', expected one of: {}",
                s,
                known.join(", ")
            ))
        })
    }
}

impl std::fmt::Display for RendererKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Map a sink write failure into a render error.
pub(crate) fn write_failed(err: io::Error) -> ZipDiffError {
    ZipDiffError::render(format!("cannot write output: {err}"))
}
