//! Atomic notebook write-back
//!
//! The serialized document is written to a temporary file in the target's
//! own directory and renamed over the original, so a crash mid-write never
//! leaves a half-written notebook behind.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use nbtag_common::error::{Error, Result};
use nbtag_common::notebook::Notebook;

/// Replace `path` with the serialized form of `notebook`
pub fn write_notebook(path: &Path, notebook: &Notebook) -> Result<()> {
    let json = notebook.to_json()?;

    // Same directory as the target so the final rename stays on one
    // filesystem
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))?;
    tmp.write_all(json.as_bytes())?;
    tmp.flush()?;

    tmp.persist(path).map_err(|e| Error::Persist {
        path: path.to_path_buf(),
        message: e.error.to_string(),
    })?;

    Ok(())
}
