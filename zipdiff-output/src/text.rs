//! Plain-text summary renderer.

use crate::{OutputRenderer, RenderSink, write_failed};
use std::io::Write;
use zipdiff_core::{DifferenceSet, Result};

/// Writes the plain-text summary followed by a newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl OutputRenderer for TextRenderer {
    fn render(&self, sink: &mut dyn RenderSink, output_skip: usize, diff: &DifferenceSet) -> Result<()> {
        writeln!(sink, "{}", diff.summary(output_skip)).map_err(write_failed)
    }
}
