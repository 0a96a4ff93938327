use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use lcov_summary::report::{JsonFormatter, SummaryFormatter, TextFormatter};
use lcov_summary::Summary;

/// lcov-summary — Summarize an LCOV coverage report.
#[derive(Parser)]
#[command(name = "lcov-summary", version, about)]
struct Cli {
    /// Path to the LCOV file, or "-" to read from stdin.
    file: PathBuf,

    /// Emit the summary as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let summary = read_summary(&cli.file)?;

    let formatter: &dyn SummaryFormatter = if cli.json {
        &JsonFormatter
    } else {
        &TextFormatter
    };
    print!("{}", formatter.format(&summary));
    Ok(())
}

fn read_summary(path: &Path) -> Result<Summary> {
    let summary = if path.as_os_str() == "-" {
        lcov_summary::summarize(io::stdin().lock())
    } else {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        lcov_summary::summarize(file)
    };
    summary.context("Failed to parse LCOV data")
}
