//! Pair old-side and new-side lines for dual-pane rendering.
//!
//! Pairing is positional: a run of deletions is zipped index-for-index with
//! the run of additions that follows it. Deleted and added lines are never
//! matched by content similarity, so reordered edits show up stacked in the
//! order they were encountered.

use crate::model::{AlignedRow, DiffLine, Hunk, LineKind, RowCell};

/// Align every hunk into a single sequence of rows.
pub fn align(hunks: &[Hunk]) -> Vec<AlignedRow> {
    let mut aligner = Aligner::default();
    for hunk in hunks {
        for line in &hunk.lines {
            aligner.push(line);
        }
        aligner.flush();
    }
    aligner.rows
}

/// Two buffers of pending change lines and the rows emitted so far.
#[derive(Default)]
struct Aligner<'a> {
    deletions: Vec<&'a DiffLine>,
    additions: Vec<&'a DiffLine>,
    rows: Vec<AlignedRow>,
}

impl<'a> Aligner<'a> {
    fn push(&mut self, line: &'a DiffLine) {
        match line.kind {
            LineKind::Deletion => self.deletions.push(line),
            LineKind::Addition => self.additions.push(line),
            LineKind::Header => {
                self.flush();
                self.rows.push(AlignedRow::mirrored(RowCell::new(
                    None,
                    line.content.clone(),
                    LineKind::Header,
                )));
            }
            LineKind::Context => {
                self.flush();
                let cell = |number| RowCell::new(number, line.content.clone(), LineKind::Context);
                self.rows.push(AlignedRow {
                    old: Some(cell(line.old_line)),
                    new: Some(cell(line.new_line)),
                });
            }
        }
    }

    /// Zip the buffered runs into rows; the shorter run leaves its side empty.
    fn flush(&mut self) {
        let len = self.deletions.len().max(self.additions.len());
        for i in 0..len {
            let old = self
                .deletions
                .get(i)
                .map(|l| RowCell::new(l.old_line, l.content.clone(), LineKind::Deletion));
            let new = self
                .additions
                .get(i)
                .map(|l| RowCell::new(l.new_line, l.content.clone(), LineKind::Addition));
            self.rows.push(AlignedRow { old, new });
        }
        self.deletions.clear();
        self.additions.clear();
    }
}
