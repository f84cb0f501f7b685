//! Scroll and view-mode state of the diff pane.

use crate::align::align;
use crate::model::{AlignedRow, FileDiff, ProjectedLine};
use crate::project::{project, ViewMode};
use std::sync::Arc;

/// State of the diff pane for one file.
#[derive(Debug, Clone)]
pub struct DiffViewState {
    diff: Option<Arc<FileDiff>>,
    rows: Vec<AlignedRow>,
    mode: ViewMode,
    lines: Vec<ProjectedLine>,
    /// First visible projected line.
    offset: usize,
    viewport: usize,
}

impl Default for DiffViewState {
    fn default() -> Self {
        Self::new(ViewMode::default())
    }
}

impl DiffViewState {
    pub fn new(mode: ViewMode) -> Self {
        Self {
            diff: None,
            rows: Vec::new(),
            mode,
            lines: Vec::new(),
            offset: 0,
            viewport: 1,
        }
    }

    /// Show a new diff, scrolled to the top.
    pub fn set_diff(&mut self, diff: Arc<FileDiff>) {
        self.rows = align(&diff.hunks);
        self.lines = project(&self.rows, self.mode);
        self.diff = Some(diff);
        self.offset = 0;
    }

    pub fn clear(&mut self) {
        self.diff = None;
        self.rows.clear();
        self.lines.clear();
        self.offset = 0;
    }

    pub fn diff(&self) -> Option<&FileDiff> {
        self.diff.as_deref()
    }

    pub fn rows(&self) -> &[AlignedRow] {
        &self.rows
    }

    pub fn lines(&self) -> &[ProjectedLine] {
        &self.lines
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Projected lines inside the viewport.
    pub fn visible_lines(&self) -> &[ProjectedLine] {
        let start = self.offset.min(self.lines.len());
        let end = (start + self.viewport).min(self.lines.len());
        &self.lines[start..end]
    }

    /// Aligned row shown at the top of the viewport.
    pub fn top_row(&self) -> Option<usize> {
        self.lines.get(self.offset).map(|line| line.source_row)
    }

    /// Switch view mode, keeping the top row in place.
    pub fn set_mode(&mut self, mode: ViewMode) {
        if mode == self.mode {
            return;
        }
        let anchor = self.top_row();
        self.mode = mode;
        self.lines = project(&self.rows, mode);
        match anchor {
            Some(row) => self.jump_to_row(row),
            None => self.offset = 0,
        }
    }

    pub fn next_mode(&mut self) {
        self.set_mode(self.mode.next());
    }

    pub fn prev_mode(&mut self) {
        self.set_mode(self.mode.prev());
    }

    pub fn set_viewport(&mut self, height: usize) {
        self.viewport = height.max(1);
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.offset = self.offset.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.offset = self.offset.saturating_add(amount).min(self.max_offset());
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport);
    }

    pub fn home(&mut self) {
        self.offset = 0;
    }

    pub fn end(&mut self) {
        self.offset = self.max_offset();
    }

    /// Scroll to the first projected line at or after aligned row `row`.
    pub fn jump_to_row(&mut self, row: usize) {
        let target = self
            .lines
            .iter()
            .position(|line| line.source_row >= row)
            .unwrap_or(self.lines.len().saturating_sub(1));
        self.offset = target.min(self.max_offset());
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_file_diff;
    use pretty_assertions::assert_eq;

    const TEXT: &str = "@@ -1,3 +1,3 @@\n fn main() {\n-    old_call();\n+    new_call();\n }\n";

    fn loaded(viewport: usize) -> DiffViewState {
        let mut state = DiffViewState::default();
        state.set_diff(Arc::new(parse_file_diff(TEXT)));
        state.set_viewport(viewport);
        state
    }

    #[test]
    fn test_set_diff_projects_lines() {
        let state = loaded(10);
        assert_eq!(state.rows().len(), 4);
        assert_eq!(state.lines().len(), 5);
        assert_eq!(state.visible_lines().len(), 5);
        assert_eq!(state.top_row(), Some(0));
    }

    #[test]
    fn test_scroll_clamps() {
        let mut state = loaded(2);

        state.scroll_up(1);
        assert_eq!(state.offset(), 0);

        state.scroll_down(10);
        assert_eq!(state.offset(), 3);

        state.page_up();
        assert_eq!(state.offset(), 1);

        state.end();
        assert_eq!(state.offset(), 3);
        state.home();
        assert_eq!(state.offset(), 0);

        state.page_down();
        assert_eq!(state.offset(), 2);
    }

    #[test]
    fn test_mode_switch_keeps_top_row() {
        let mut state = loaded(2);
        state.scroll_down(3);
        assert_eq!(state.lines()[state.offset()].content, "    new_call();");
        assert_eq!(state.top_row(), Some(2));

        state.set_mode(ViewMode::New);
        assert_eq!(state.lines().len(), 4);
        assert_eq!(state.top_row(), Some(2));
        assert_eq!(state.offset(), 2);

        state.next_mode();
        assert_eq!(state.mode(), ViewMode::Old);
        assert_eq!(state.lines()[state.offset()].content, "    old_call();");
    }

    #[test]
    fn test_jump_to_row() {
        let mut state = loaded(1);
        state.jump_to_row(2);
        assert_eq!(state.offset(), 2);
        assert_eq!(state.top_row(), Some(2));

        // Past the end lands on the last line
        state.jump_to_row(99);
        assert_eq!(state.offset(), 4);
    }

    #[test]
    fn test_empty_and_cleared() {
        let mut state = DiffViewState::default();
        state.scroll_down(5);
        state.jump_to_row(3);
        state.next_mode();
        assert_eq!(state.offset(), 0);
        assert_eq!(state.top_row(), None);

        let mut state = loaded(3);
        state.clear();
        assert!(state.diff().is_none());
        assert!(state.visible_lines().is_empty());
    }
}
