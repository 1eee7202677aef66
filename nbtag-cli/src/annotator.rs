//! Cell annotator
//!
//! Applies the rule table to every cell of a notebook: marker substrings in
//! the cell source add rendering tags to `metadata.tags`, and code cells
//! whose first line carries a form marker get `metadata.cellView = "form"`.

use nbtag_common::notebook::{Cell, Notebook, CELL_VIEW_FORM};
use nbtag_common::rules::RuleTable;

/// First-line markers that flag a code cell as an input form
const FORM_MARKERS: [&str; 2] = ["@title", "@markdown"];

/// Per-document annotation statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotateStats {
    /// Cells that gained at least one tag
    pub cells_tagged: usize,
    /// Code cells newly flagged as form cells
    pub form_cells: usize,
}

impl AnnotateStats {
    /// True if the annotator modified the document
    pub fn is_changed(&self) -> bool {
        self.cells_tagged > 0 || self.form_cells > 0
    }
}

/// Notebook cell annotator
pub struct Annotator {
    rules: RuleTable,
}

impl Annotator {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Annotate every cell in document order
    pub fn annotate(&self, notebook: &mut Notebook) -> AnnotateStats {
        let mut stats = AnnotateStats::default();
        for (index, cell) in notebook.cells.iter_mut().enumerate() {
            let (tagged, formed) = self.annotate_cell(cell);
            if tagged {
                stats.cells_tagged += 1;
                tracing::debug!("Cell {} tagged: {:?}", index, cell.tags());
            }
            if formed {
                stats.form_cells += 1;
                tracing::debug!("Cell {} flagged as form cell", index);
            }
        }
        stats
    }

    /// Returns (gained a tag, gained the form flag)
    fn annotate_cell(&self, cell: &mut Cell) -> (bool, bool) {
        let mut tags = cell.tags();
        let existing = tags.len();

        // Rule-table order decides append order when several markers match
        for rule in self.rules.iter() {
            if cell.source.contains(&rule.marker) && !tags.contains(&rule.tag) {
                tags.push(rule.tag.clone());
            }
        }

        let tagged = tags.len() > existing;
        if !tags.is_empty() {
            // Present iff a rule matched or a pre-existing tag existed
            cell.set_tags(tags);
        }

        let mut formed = false;
        if cell.is_code() && cell.cell_view() != Some(CELL_VIEW_FORM) {
            // Only the first source line is inspected; the check is plain
            // substring containment, not comment-aware
            if let Some(first_line) = cell.source.first_line() {
                if FORM_MARKERS.iter().any(|marker| first_line.contains(marker)) {
                    cell.set_form_view();
                    formed = true;
                }
            }
        }

        (tagged, formed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbtag_common::notebook::SourceText;
    use nbtag_common::rules::{TAG_HIDE_INPUT, TAG_REMOVE_CELL};
    use serde_json::{json, Map, Value};

    fn cell(cell_type: &str, source: &str) -> Cell {
        Cell {
            cell_type: cell_type.to_string(),
            metadata: Map::new(),
            source: SourceText::Text(source.to_string()),
            extra: Map::new(),
        }
    }

    fn notebook(cells: Vec<Cell>) -> Notebook {
        Notebook {
            cells,
            metadata: Map::new(),
            nbformat: 4,
            nbformat_minor: 5,
            extra: Map::new(),
        }
    }

    fn annotator() -> Annotator {
        Annotator::new(RuleTable::default())
    }

    #[test]
    fn test_title_cell_gets_tag_and_form_view() {
        let mut nb = notebook(vec![cell("code", "# @title My Form\nx = 1")]);
        let stats = annotator().annotate(&mut nb);

        assert_eq!(stats, AnnotateStats { cells_tagged: 1, form_cells: 1 });
        assert_eq!(nb.cells[0].tags(), vec![TAG_HIDE_INPUT.to_string()]);
        assert_eq!(nb.cells[0].cell_view(), Some("form"));
    }

    #[test]
    fn test_repeated_marker_tags_once() {
        let mut nb = notebook(vec![cell("code", "# @title a\n# @title b\n# @title c\n")]);
        annotator().annotate(&mut nb);
        assert_eq!(nb.cells[0].tags(), vec![TAG_HIDE_INPUT.to_string()]);
    }

    #[test]
    fn test_unmatched_cell_keeps_tags_absent() {
        let mut nb = notebook(vec![cell("code", "print('hello')\n")]);
        let stats = annotator().annotate(&mut nb);

        assert!(!stats.is_changed());
        assert!(!nb.cells[0].metadata.contains_key("tags"));
        assert!(nb.cells[0].cell_view().is_none());
    }

    #[test]
    fn test_pre_existing_tags_kept_without_duplicates() {
        let mut c = cell("code", "# @title Form\n");
        c.metadata.insert("tags".into(), json!([TAG_HIDE_INPUT]));
        let mut nb = notebook(vec![c]);

        let stats = annotator().annotate(&mut nb);
        assert_eq!(nb.cells[0].tags(), vec![TAG_HIDE_INPUT.to_string()]);
        // The tag was already present, so nothing was gained
        assert_eq!(stats.cells_tagged, 0);
    }

    #[test]
    fn test_idempotent() {
        let mut nb = notebook(vec![
            cell("code", "# @title My Form\nx = 1"),
            cell("markdown", "# @title Note"),
        ]);

        let first = annotator().annotate(&mut nb);
        assert!(first.is_changed());

        let after_first = serde_json::to_value(&nb).unwrap();
        let second = annotator().annotate(&mut nb);
        assert!(!second.is_changed());
        assert_eq!(serde_json::to_value(&nb).unwrap(), after_first);
    }

    #[test]
    fn test_form_marker_only_checked_on_first_line() {
        let mut nb = notebook(vec![cell("code", "x = 1\nprint(\"@title\")\n")]);
        annotator().annotate(&mut nb);
        assert!(nb.cells[0].cell_view().is_none());
    }

    #[test]
    fn test_form_marker_need_not_be_a_comment() {
        let mut nb = notebook(vec![cell("code", "print(\"@title\")\nx = 1\n")]);
        annotator().annotate(&mut nb);
        assert_eq!(nb.cells[0].cell_view(), Some("form"));
    }

    #[test]
    fn test_markdown_cell_tagged_but_never_formed() {
        let mut nb = notebook(vec![cell("markdown", "# @title Note")]);
        let stats = annotator().annotate(&mut nb);

        assert_eq!(nb.cells[0].tags(), vec![TAG_HIDE_INPUT.to_string()]);
        assert!(nb.cells[0].cell_view().is_none());
        assert_eq!(stats.form_cells, 0);
    }

    #[test]
    fn test_markdown_form_marker_sets_view_on_code_only() {
        let mut nb = notebook(vec![cell("code", "# @markdown Options\nflag = True\n")]);
        annotator().annotate(&mut nb);
        assert_eq!(nb.cells[0].cell_view(), Some("form"));
    }

    #[test]
    fn test_multiple_rules_append_in_table_order() {
        let rules = RuleTable::new()
            .with_rule("# HIDDEN", TAG_REMOVE_CELL)
            .with_rule("# @title", TAG_HIDE_INPUT);
        let annotator = Annotator::new(rules);

        // Source order is the reverse of table order
        let mut nb = notebook(vec![cell("code", "# @title Form\n# HIDDEN\n")]);
        annotator.annotate(&mut nb);
        assert_eq!(
            nb.cells[0].tags(),
            vec![TAG_REMOVE_CELL.to_string(), TAG_HIDE_INPUT.to_string()]
        );
    }

    #[test]
    fn test_existing_cell_view_overwritten_with_form() {
        let mut c = cell("code", "# @title Form\n");
        c.metadata.insert("cellView".into(), Value::String("code".into()));
        let mut nb = notebook(vec![c]);

        let stats = annotator().annotate(&mut nb);
        assert_eq!(nb.cells[0].cell_view(), Some("form"));
        assert_eq!(stats.form_cells, 1);
    }

    #[test]
    fn test_empty_source_code_cell_is_skipped() {
        let mut nb = notebook(vec![cell("code", "")]);
        let stats = annotator().annotate(&mut nb);
        assert!(!stats.is_changed());
    }
}
