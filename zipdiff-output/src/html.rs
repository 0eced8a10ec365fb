//! HTML report renderer.

use crate::escape::escape_markup;
use crate::{OutputRenderer, RenderSink, write_failed};
use std::io::{self, Write};
use zipdiff_core::{DifferenceSet, EntryMetadata, Result, strip_prefix_segments};

const STYLE: &str = "body { font-family: sans-serif; margin: 2em; }
table { border-collapse: collapse; }
th, td { border: 1px solid #ccc; padding: 0.2em 0.6em; text-align: left; }
td.size { text-align: right; font-family: monospace; }
.added { color: #1a7f37; }
.removed { color: #cf222e; }
.changed { color: #9a6700; }";

/// Writes a standalone HTML page with one section per kind of difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    fn write_page<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        output_skip: usize,
        diff: &DifferenceSet,
    ) -> io::Result<()> {
        let source = escape_markup(diff.source_display());
        let target = escape_markup(diff.target_display());

        writeln!(sink, "<!DOCTYPE html>")?;
        writeln!(sink, "<html lang=\"en\">")?;
        writeln!(sink, "<head>")?;
        writeln!(sink, "<meta charset=\"utf-8\">")?;
        writeln!(sink, "<title>zipdiff: {source} vs {target}</title>")?;
        writeln!(sink, "<style>\n{STYLE}\n</style>")?;
        writeln!(sink, "</head>")?;
        writeln!(sink, "<body data-filename1=\"{source}\" data-filename2=\"{target}\">")?;
        writeln!(sink, "<h1>Differences between {source} and {target}</h1>")?;

        write_entry_list(sink, "added", "Added", diff.added().keys(), output_skip)?;
        write_entry_list(sink, "removed", "Removed", diff.removed().keys(), output_skip)?;

        writeln!(sink, "<h2 class=\"changed\">Changed ({})</h2>", diff.changed().len())?;
        if !diff.changed().is_empty() {
            writeln!(sink, "<table>")?;
            writeln!(sink, "<tr><th>Name</th><th>Size in {source}</th><th>Size in {target}</th></tr>")?;
            for (name, change) in diff.changed() {
                writeln!(
                    sink,
                    "<tr><td>{}</td><td class=\"size\">{}</td><td class=\"size\">{}</td></tr>",
                    escape_markup(strip_prefix_segments(name, output_skip)),
                    size_cell(&change.source),
                    size_cell(&change.target)
                )?;
            }
            writeln!(sink, "</table>")?;
        }

        writeln!(sink, "<p>Total differences: {}</p>", diff.total())?;
        writeln!(sink, "</body>")?;
        writeln!(sink, "</html>")
    }
}

impl OutputRenderer for HtmlRenderer {
    fn render(&self, sink: &mut dyn RenderSink, output_skip: usize, diff: &DifferenceSet) -> Result<()> {
        self.write_page(sink, output_skip, diff)
            .map_err(write_failed)
    }
}

fn write_entry_list<'a, W: Write + ?Sized>(
    sink: &mut W,
    class: &str,
    heading: &str,
    names: impl ExactSizeIterator<Item = &'a String>,
    output_skip: usize,
) -> io::Result<()> {
    let count = names.len();
    writeln!(sink, "<h2 class=\"{class}\">{heading} ({count})</h2>")?;
    if count == 0 {
        return Ok(());
    }

    writeln!(sink, "<ul>")?;
    for name in names {
        writeln!(
            sink,
            "<li>{}</li>",
            escape_markup(strip_prefix_segments(name, output_skip))
        )?;
    }
    writeln!(sink, "</ul>")
}

fn size_cell(entry: &EntryMetadata) -> String {
    if entry.is_dir() {
        "-".to_string()
    } else {
        entry.size.to_string()
    }
}
