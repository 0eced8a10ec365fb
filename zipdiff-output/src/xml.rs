//! XML renderer.

use crate::escape::escape_markup;
use crate::{OutputRenderer, RenderSink, write_failed};
use std::io::{self, Write};
use zipdiff_core::{DifferenceSet, Result, strip_prefix_segments};

/// Writes a `<zipdiff>` document listing every difference by name.
///
/// ```text
/// <?xml version="1.0" encoding="UTF-8"?>
/// <zipdiff filename1="old.zip" filename2="new.zip">
/// <differences>
///   <added>B</added>
/// </differences>
/// </zipdiff>
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlRenderer;

impl XmlRenderer {
    fn write_document<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        output_skip: usize,
        diff: &DifferenceSet,
    ) -> io::Result<()> {
        writeln!(sink, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            sink,
            r#"<zipdiff filename1="{}" filename2="{}">"#,
            escape_markup(diff.source_display()),
            escape_markup(diff.target_display())
        )?;
        writeln!(sink, "<differences>")?;

        let groups = [
            ("added", diff.added().keys().collect::<Vec<_>>()),
            ("removed", diff.removed().keys().collect()),
            ("changed", diff.changed().keys().collect()),
        ];
        for (tag, names) in groups {
            for name in names {
                let name = strip_prefix_segments(name, output_skip);
                writeln!(sink, "  <{tag}>{}</{tag}>", escape_markup(name))?;
            }
        }

        writeln!(sink, "</differences>")?;
        writeln!(sink, "</zipdiff>")
    }
}

impl OutputRenderer for XmlRenderer {
    fn render(&self, sink: &mut dyn RenderSink, output_skip: usize, diff: &DifferenceSet) -> Result<()> {
        self.write_document(sink, output_skip, diff)
            .map_err(write_failed)
    }
}
