//! Notebook file scanner
//!
//! Recursive `.ipynb` discovery under a target directory. Hidden entries
//! and well-known junk directories are skipped; unreadable entries are
//! logged and skipped rather than aborting the scan.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use nbtag_common::error::{Error, Result};

const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Notebook file scanner
pub struct NotebookScanner {
    ignore_patterns: Vec<String>,
    max_depth: Option<usize>,
}

impl NotebookScanner {
    /// Create a scanner with default ignore patterns
    ///
    /// Skips checkpoint copies and common non-content directories.
    pub fn new() -> Self {
        Self {
            ignore_patterns: vec![
                ".ipynb_checkpoints".to_string(),
                ".git".to_string(),
                ".svn".to_string(),
                "node_modules".to_string(),
            ],
            max_depth: None,
        }
    }

    /// Limit recursion depth; depth 1 scans only the target directory itself
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Collect notebook files under `root` in deterministic (sorted) order
    pub fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(Error::NotADirectory(root.to_path_buf()));
        }

        let walker = WalkDir::new(root)
            .follow_links(false)
            .max_depth(self.max_depth.unwrap_or(usize::MAX))
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| self.should_process_entry(entry));

        let mut notebooks = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && is_notebook_file(entry.path()) {
                        notebooks.push(entry.path().to_path_buf());
                    }
                }
                Err(e) => {
                    tracing::warn!("Error accessing entry: {}", e);
                    // Continue scanning, don't abort
                }
            }
        }

        tracing::debug!(
            "Scan complete: {} notebooks found under {}",
            notebooks.len(),
            root.display()
        );

        Ok(notebooks)
    }

    /// Check if entry should be descended into / collected
    fn should_process_entry(&self, entry: &DirEntry) -> bool {
        // The scan root itself is always processed, even when the caller
        // passed a dot-directory like "."
        if entry.depth() == 0 {
            return true;
        }

        let file_name = entry.file_name().to_string_lossy();

        // Hidden entries are never scanned, matching shell-glob behavior
        if file_name.starts_with('.') {
            return false;
        }

        for pattern in &self.ignore_patterns {
            if file_name.as_ref() == pattern {
                return false;
            }
        }

        true
    }
}

impl Default for NotebookScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn is_notebook_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(NOTEBOOK_EXTENSION))
        .unwrap_or(false)
}
