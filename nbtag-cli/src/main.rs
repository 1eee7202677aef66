//! nbtag - Notebook tag annotator
//!
//! Scans a directory for Jupyter notebooks and attaches rendering-control
//! metadata to their cells: source markers like `# @title` add tags such as
//! `hide-input`, and code cells whose first line carries `@title` or
//! `@markdown` are flagged to render as collapsed input forms.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nbtag_cli::{run, RunOptions};
use nbtag_common::rules::RuleTable;

/// Command-line arguments for nbtag
#[derive(Parser, Debug)]
#[command(name = "nbtag")]
#[command(about = "Attach rendering tags to notebook cells based on source markers")]
#[command(version)]
struct Args {
    /// Directory to scan for notebooks
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Maximum directory depth to descend (1 = the target directory only)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Report what would change without writing any file
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nbtag=info,nbtag_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting nbtag v{}", env!("CARGO_PKG_VERSION"));
    info!("Scanning {}", args.directory.display());

    let options = RunOptions {
        directory: args.directory,
        max_depth: args.max_depth,
        dry_run: args.dry_run,
    };

    let summary = run(&options, &RuleTable::default())
        .context("Notebook annotation failed")?;

    info!(
        "{} notebooks scanned, {} {}, {} cells tagged, {} form cells",
        summary.files_scanned,
        summary.files_modified,
        if options.dry_run { "would change" } else { "modified" },
        summary.cells_tagged,
        summary.form_cells
    );

    Ok(())
}
