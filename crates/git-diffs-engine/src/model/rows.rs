//! Row-level representations derived from the hunk model.

use super::LineKind;
use serde::{Deserialize, Serialize};

/// One side of an aligned row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCell {
    pub line_number: Option<u32>,
    pub content: String,
    pub kind: LineKind,
}

impl RowCell {
    pub fn new(line_number: Option<u32>, content: impl Into<String>, kind: LineKind) -> Self {
        Self {
            line_number,
            content: content.into(),
            kind,
        }
    }
}

/// An old-side line and a new-side line rendered on the same terminal row.
///
/// A side is `None` when a deletion run and the addition run following it
/// have different lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub old: Option<RowCell>,
    pub new: Option<RowCell>,
}

impl AlignedRow {
    /// A row showing the same cell on both sides.
    pub fn mirrored(cell: RowCell) -> Self {
        Self {
            old: Some(cell.clone()),
            new: Some(cell),
        }
    }

    /// True for context and header rows.
    pub fn is_shared(&self) -> bool {
        match (&self.old, &self.new) {
            (Some(old), Some(new)) => old.kind.is_shared() && new.kind.is_shared(),
            _ => false,
        }
    }
}

/// A single line of a one-column pane, with a back-reference to its aligned row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedLine {
    pub line_number: Option<u32>,
    pub content: String,
    pub kind: LineKind,
    /// Index into the aligned rows this line was projected from.
    pub source_row: usize,
}
