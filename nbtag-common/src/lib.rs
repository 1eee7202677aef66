//! # nbtag Common Library
//!
//! Shared code for the notebook tag annotator:
//! - Notebook document model and JSON codec
//! - Tagging rule table
//! - Common error types

pub mod error;
pub mod notebook;
pub mod rules;

pub use error::{Error, Result};
pub use notebook::{Cell, Notebook, SourceText};
pub use rules::RuleTable;
