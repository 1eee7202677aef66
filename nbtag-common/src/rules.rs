//! Tagging rule table
//!
//! Maps marker substrings found in cell source to the rendering tag that
//! should be attached to the cell. The table is built explicitly and passed
//! into the annotator; there is no module-level state.

/// Tag hiding a cell's input behind a show button
pub const TAG_HIDE_INPUT: &str = "hide-input";

/// Tag removing the whole cell from rendered output
pub const TAG_REMOVE_CELL: &str = "remove-cell";

/// Tag removing only the cell's input from rendered output
pub const TAG_REMOVE_INPUT: &str = "remove-input";

/// One marker-to-tag rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Substring searched for anywhere in the cell source
    pub marker: String,
    /// Tag appended to `metadata.tags` when the marker is found
    pub tag: String,
}

/// Ordered marker-to-tag mapping
///
/// Markers are unique; iteration order is insertion order and determines
/// the tag-append order when several rules match the same cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Empty table
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; a marker already present is left unchanged
    pub fn with_rule(mut self, marker: &str, tag: &str) -> Self {
        if !self.rules.iter().any(|rule| rule.marker == marker) {
            self.rules.push(Rule {
                marker: marker.to_string(),
                tag: tag.to_string(),
            });
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    /// Standard table: hide the input of `# @title` form cells
    fn default() -> Self {
        RuleTable::new().with_rule("# @title", TAG_HIDE_INPUT)
    }
}
