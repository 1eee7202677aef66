//! Common error types for the notebook tag annotator

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for annotator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while discovering, parsing, or rewriting notebooks
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File exists but is not a valid notebook document
    #[error("Failed to parse notebook {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// In-memory document could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Specified scan path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Scan path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Temporary file could not be renamed over the target
    #[error("Failed to replace {path}: {message}")]
    Persist { path: PathBuf, message: String },
}
