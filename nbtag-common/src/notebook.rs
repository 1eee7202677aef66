//! Notebook document model and JSON codec
//!
//! Models only the fields the annotator touches (cells, cell metadata,
//! source text); everything else (outputs, execution counts, document
//! metadata, unknown keys) is captured in flattened maps so it survives the
//! read-mutate-write cycle untouched.

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Cell metadata key holding the list of rendering tags
pub const TAGS_KEY: &str = "tags";

/// Cell metadata key holding the display-form flag
pub const CELL_VIEW_KEY: &str = "cellView";

/// `cellView` value marking a cell as a collapsed input form
pub const CELL_VIEW_FORM: &str = "form";

/// A parsed `.ipynb` document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    /// Cells in document order
    pub cells: Vec<Cell>,
    /// Document-level metadata, passed through unmodified
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Declared format version, preserved on write
    pub nbformat: u64,
    pub nbformat_minor: u64,
    /// Any other top-level keys, passed through unmodified
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Notebook {
    /// Read and parse a notebook file
    ///
    /// A file that is not valid JSON or not notebook-shaped yields
    /// [`Error::Parse`] carrying the offending path.
    pub fn read(path: &Path) -> Result<Notebook> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize the document to the JSON text written back to disk
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// One cell of a notebook document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Cell kind: "code", "markdown", "raw", ...
    pub cell_type: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub source: SourceText,
    /// Outputs, execution_count, attachments, and any unknown keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cell {
    pub fn is_code(&self) -> bool {
        self.cell_type == "code"
    }

    /// Current tag list from `metadata.tags` (empty if absent)
    ///
    /// Non-string entries are ignored rather than treated as a parse error;
    /// the annotator never writes them back, matching read-repair behavior
    /// of a missing field.
    pub fn tags(&self) -> Vec<String> {
        match self.metadata.get(TAGS_KEY) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_owned))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Replace `metadata.tags` with the given list
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.metadata.insert(
            TAGS_KEY.to_string(),
            Value::Array(tags.into_iter().map(Value::String).collect()),
        );
    }

    /// Current `metadata.cellView` value, if any
    pub fn cell_view(&self) -> Option<&str> {
        self.metadata.get(CELL_VIEW_KEY).and_then(Value::as_str)
    }

    /// Flag the cell to render as a collapsed input form
    pub fn set_form_view(&mut self) {
        self.metadata.insert(
            CELL_VIEW_KEY.to_string(),
            Value::String(CELL_VIEW_FORM.to_string()),
        );
    }
}

/// Cell source text as stored on disk
///
/// The notebook format stores source either as a single string or as a list
/// of line strings (each keeping its trailing newline). Both shapes parse,
/// and each re-serializes in the shape it was read in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceText {
    Text(String),
    Lines(Vec<String>),
}

impl Default for SourceText {
    fn default() -> Self {
        SourceText::Text(String::new())
    }
}

impl SourceText {
    /// Full source as one string, joining line lists
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            SourceText::Text(text) => Cow::Borrowed(text),
            SourceText::Lines(lines) => Cow::Owned(lines.concat()),
        }
    }

    /// Substring containment over the joined source
    pub fn contains(&self, marker: &str) -> bool {
        match self {
            SourceText::Text(text) => text.contains(marker),
            SourceText::Lines(lines) => {
                // Markers never span line breaks, so per-line checks avoid
                // joining the whole source.
                lines.iter().any(|line| line.contains(marker))
            }
        }
    }

    /// First line of the source, without its line terminator
    ///
    /// `None` for empty source.
    pub fn first_line(&self) -> Option<&str> {
        match self {
            SourceText::Text(text) => text.lines().next(),
            SourceText::Lines(lines) => lines
                .first()
                .map(|line| line.lines().next().unwrap_or("")),
        }
    }
}
