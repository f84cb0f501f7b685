//! Linearize aligned rows into the single-column line list a pane renders.

use crate::model::{AlignedRow, LineKind, ProjectedLine, RowCell};
use serde::{Deserialize, Serialize};

/// Which side(s) of the diff a single-column projection shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Both sides, interleaved; shared lines appear once.
    #[default]
    Both,
    /// New side only; pure deletions are hidden.
    New,
    /// Old side only; pure additions are hidden.
    Old,
}

impl ViewMode {
    pub fn next(self) -> Self {
        match self {
            ViewMode::Both => ViewMode::New,
            ViewMode::New => ViewMode::Old,
            ViewMode::Old => ViewMode::Both,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ViewMode::Both => ViewMode::Old,
            ViewMode::New => ViewMode::Both,
            ViewMode::Old => ViewMode::New,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Both => "both",
            ViewMode::New => "new",
            ViewMode::Old => "old",
        }
    }
}

/// Project aligned rows for `mode`. Every line keeps the index of the row it
/// came from in `source_row`.
pub fn project(rows: &[AlignedRow], mode: ViewMode) -> Vec<ProjectedLine> {
    let mut lines = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        match mode {
            ViewMode::Both => project_both(row, idx, &mut lines),
            ViewMode::New => lines.extend(project_side(&row.new, &row.old, LineKind::Addition, idx)),
            ViewMode::Old => lines.extend(project_side(&row.old, &row.new, LineKind::Deletion, idx)),
        }
    }

    lines
}

fn project_both(row: &AlignedRow, idx: usize, out: &mut Vec<ProjectedLine>) {
    let identical = match (&row.old, &row.new) {
        (Some(old), Some(new)) => old.content == new.content && old.kind == new.kind,
        _ => false,
    };

    if let Some(old) = &row.old {
        out.push(projected(old, old.line_number, idx));
    }
    if identical {
        return;
    }
    if let Some(new) = &row.new {
        out.push(projected(new, new.line_number, idx));
    }
}

/// Show `own` when it is a change of `own_change` kind or a shared line;
/// otherwise borrow a shared line from the other side under `own`'s number.
fn project_side(
    own: &Option<RowCell>,
    other: &Option<RowCell>,
    own_change: LineKind,
    idx: usize,
) -> Option<ProjectedLine> {
    let own_number = own.as_ref().and_then(|c| c.line_number);

    if let Some(cell) = own {
        if cell.kind == own_change || cell.kind.is_shared() {
            return Some(projected(cell, cell.line_number, idx));
        }
    }

    match other {
        Some(cell) if cell.kind.is_shared() => Some(projected(cell, own_number, idx)),
        _ => None,
    }
}

fn projected(cell: &RowCell, line_number: Option<u32>, source_row: usize) -> ProjectedLine {
    ProjectedLine {
        line_number,
        content: cell.content.clone(),
        kind: cell.kind,
        source_row,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;
    use crate::parser::parse_file_diff;
    use pretty_assertions::assert_eq;

    const TEXT: &str = "@@ -1,4 +1,4 @@\n a\n-b\n-c\n+B\n d\n";

    fn rows() -> Vec<AlignedRow> {
        align(&parse_file_diff(TEXT).hunks)
    }

    fn summary(lines: &[ProjectedLine]) -> Vec<(Option<u32>, &str, LineKind, usize)> {
        lines
            .iter()
            .map(|l| (l.line_number, l.content.as_str(), l.kind, l.source_row))
            .collect()
    }

    #[test]
    fn test_both_mode() {
        let lines = project(&rows(), ViewMode::Both);
        assert_eq!(
            summary(&lines),
            vec![
                (None, "@@ -1,4 +1,4 @@", LineKind::Header, 0),
                (Some(1), "a", LineKind::Context, 1),
                (Some(2), "b", LineKind::Deletion, 2),
                (Some(2), "B", LineKind::Addition, 2),
                (Some(3), "c", LineKind::Deletion, 3),
                (Some(4), "d", LineKind::Context, 4),
            ]
        );
    }

    #[test]
    fn test_new_mode() {
        let lines = project(&rows(), ViewMode::New);
        assert_eq!(
            summary(&lines),
            vec![
                (None, "@@ -1,4 +1,4 @@", LineKind::Header, 0),
                (Some(1), "a", LineKind::Context, 1),
                (Some(2), "B", LineKind::Addition, 2),
                (Some(3), "d", LineKind::Context, 4),
            ]
        );
    }

    #[test]
    fn test_old_mode() {
        let lines = project(&rows(), ViewMode::Old);
        assert_eq!(
            summary(&lines),
            vec![
                (None, "@@ -1,4 +1,4 @@", LineKind::Header, 0),
                (Some(1), "a", LineKind::Context, 1),
                (Some(2), "b", LineKind::Deletion, 2),
                (Some(3), "c", LineKind::Deletion, 3),
                (Some(4), "d", LineKind::Context, 4),
            ]
        );
    }

    #[test]
    fn test_single_side_modes_never_show_the_other_change_kind() {
        let text = "@@ -1,5 +1,5 @@\n-a\n+A\n+A2\n x\n-b\n-c\n+C\n y\n";
        let rows = align(&parse_file_diff(text).hunks);

        assert!(project(&rows, ViewMode::New)
            .iter()
            .all(|l| l.kind != LineKind::Deletion));
        assert!(project(&rows, ViewMode::Old)
            .iter()
            .all(|l| l.kind != LineKind::Addition));
    }

    #[test]
    fn test_borrowed_shared_line_uses_own_number() {
        let rows = vec![AlignedRow {
            old: Some(RowCell::new(Some(7), "shared", LineKind::Context)),
            new: None,
        }];
        let lines = project(&rows, ViewMode::New);
        assert_eq!(summary(&lines), vec![(None, "shared", LineKind::Context, 0)]);
    }

    #[test]
    fn test_empty_rows() {
        for mode in [ViewMode::Both, ViewMode::New, ViewMode::Old] {
            assert!(project(&[], mode).is_empty());
        }
    }

    #[test]
    fn test_mode_cycle() {
        assert_eq!(ViewMode::Both.next().next().next(), ViewMode::Both);
        assert_eq!(ViewMode::Both.prev(), ViewMode::Old);
        assert_eq!(ViewMode::New.label(), "new");
    }

    #[test]
    fn test_projected_lines_serialize() {
        let lines = project(&rows(), ViewMode::New);
        let json = serde_json::to_value(&lines[2]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "line_number": 2,
                "content": "B",
                "kind": "Addition",
                "source_row": 2,
            })
        );
        assert_eq!(serde_json::to_string(&ViewMode::Old).unwrap(), "\"old\"");
    }
}
