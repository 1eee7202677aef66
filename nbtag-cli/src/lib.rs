//! nbtag-cli library interface
//!
//! Wires scanner, annotator, and writer into the batch run the `nbtag`
//! binary executes; exposed as a library for integration testing.

pub mod annotator;
pub mod scanner;
pub mod writer;

use std::path::PathBuf;

use tracing::{debug, info};

use nbtag_common::error::Result;
use nbtag_common::notebook::Notebook;
use nbtag_common::rules::RuleTable;

use crate::annotator::Annotator;
use crate::scanner::NotebookScanner;

/// Batch run configuration
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory scanned for notebooks
    pub directory: PathBuf,
    /// Recursion limit; 1 scans only the directory itself
    pub max_depth: Option<usize>,
    /// Report what would change without writing any file
    pub dry_run: bool,
}

/// Aggregate statistics over one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub files_modified: usize,
    pub cells_tagged: usize,
    pub form_cells: usize,
}

/// Annotate every notebook under `options.directory`
///
/// Files are processed one at a time in sorted order; the first parse or
/// write error aborts the batch. Documents the annotator does not change
/// are not rewritten.
pub fn run(options: &RunOptions, rules: &RuleTable) -> Result<RunSummary> {
    let mut scanner = NotebookScanner::new();
    if let Some(depth) = options.max_depth {
        scanner = scanner.with_max_depth(depth);
    }

    let notebooks = scanner.scan(&options.directory)?;
    let annotator = Annotator::new(rules.clone());

    let mut summary = RunSummary {
        files_scanned: notebooks.len(),
        ..RunSummary::default()
    };

    for path in &notebooks {
        let mut notebook = Notebook::read(path)?;
        let stats = annotator.annotate(&mut notebook);

        if !stats.is_changed() {
            debug!("No changes: {}", path.display());
            continue;
        }

        if options.dry_run {
            info!(
                "Would update {} ({} cells tagged, {} form cells)",
                path.display(),
                stats.cells_tagged,
                stats.form_cells
            );
        } else {
            writer::write_notebook(path, &notebook)?;
            info!(
                "Updated {} ({} cells tagged, {} form cells)",
                path.display(),
                stats.cells_tagged,
                stats.form_cells
            );
        }

        summary.files_modified += 1;
        summary.cells_tagged += stats.cells_tagged;
        summary.form_cells += stats.form_cells;
    }

    Ok(summary)
}
