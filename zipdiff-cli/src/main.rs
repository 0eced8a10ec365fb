//! zipdiff CLI - compare the contents of two ZIP archives.
//!
//! Handles ZIP, JAR, WAR and EAR files, including archives nested inside them.

mod logging;
mod output;

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::{debug, info};
use zipdiff_archive::{NameFilter, TreeOptions, build_tree};
use zipdiff_core::{ComparePolicy, Result, compare_trees};
use zipdiff_output::RendererKind;

#[derive(Parser)]
#[command(name = "zipdiff")]
#[command(author, version, about = "Compare the contents of two ZIP archives")]
#[command(long_about = "
Compares two ZIP archives entry by entry and reports which entries were
added, removed or changed. Archives nested inside the inputs (jar files
inside a war, for example) are compared too; their entries are reported as
outer!inner.

Entries are matched by name and compared on size, compressed size and CRC-32.
Modification times are compared only with --timestamps.

Examples:
  zipdiff app-1.0.war app-1.1.war
  zipdiff --skip-prefix1 1 --skip-prefix2 1 old.zip new.zip
  zipdiff -r '.*\\.class' old.jar new.jar
  zipdiff -o report.html old.zip new.zip
  zipdiff -f zip -o patch.zip old.zip new.zip
")]
struct Cli {
    /// First archive, the baseline
    source: PathBuf,

    /// Second archive, compared against the first
    target: PathBuf,

    /// Leading path segments stripped from entry names of the first archive
    #[arg(long = "skip-prefix1", value_name = "N", default_value_t = 0)]
    skip_prefix1: usize,

    /// Leading path segments stripped from entry names of the second archive
    #[arg(long = "skip-prefix2", value_name = "N", default_value_t = 0)]
    skip_prefix2: usize,

    /// Leading path segments stripped from names in the output
    #[arg(long, value_name = "N", default_value_t = 0)]
    skip_output_prefix: usize,

    /// Also compare modification times
    #[arg(short, long)]
    timestamps: bool,

    /// Do not compare CRC-32 checksums
    #[arg(long)]
    no_crc: bool,

    /// Only compare entries whose whole name matches this regular expression
    #[arg(short = 'r', long, value_name = "REGEX")]
    filter: Option<String>,

    /// Output format (text, xml, html, json, zip) - inferred from the output file extension if not specified
    #[arg(short, long, value_name = "KIND")]
    format: Option<String>,

    /// Output file, '-' for standard output
    #[arg(short, long, default_value = output::STDOUT)]
    output: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn renderer_kind(&self) -> Result<RendererKind> {
        match &self.format {
            Some(keyword) => keyword.parse(),
            None => Ok(RendererKind::for_output_path(&self.output)),
        }
    }

    fn tree_options(&self, skip_prefixes: usize, filter: Option<&NameFilter>) -> TreeOptions {
        let options = TreeOptions::new().with_skip_prefixes(skip_prefixes);
        match filter {
            Some(filter) => options.with_name_filter(filter.clone()),
            None => options,
        }
    }

    fn compare_policy(&self) -> ComparePolicy {
        ComparePolicy::default()
            .with_timestamps(self.timestamps)
            .with_crc(!self.no_crc)
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Configuration is validated before any archive is opened.
    let kind = cli.renderer_kind()?;
    let filter = cli.filter.as_deref().map(NameFilter::new).transpose()?;
    debug!(format = %kind, filter = ?cli.filter, "configuration accepted");

    let source = build_tree(&cli.source, &cli.tree_options(cli.skip_prefix1, filter.as_ref()))?;
    let target = build_tree(&cli.target, &cli.tree_options(cli.skip_prefix2, filter.as_ref()))?;
    let diff = compare_trees(&source, &target, &cli.compare_policy());

    let renderer = kind.renderer(&cli.target);
    output::write_rendered(&cli.output, |sink| {
        renderer.render(sink, cli.skip_output_prefix, &diff)
    })?;

    info!(
        differences = diff.total(),
        output = %cli.output.display(),
        "comparison complete"
    );
    Ok(())
}
