//! Navigation state for the changed-file list.

use crate::index::{build, filter_files, GroupingMode};
use crate::model::{ChangedFile, DisplayItem, ExpandedPaths};
use crate::traits::{normalize_query, FuzzyRanker, SkimRanker};

/// Cursor, grouping and filter state of the changed-file list.
///
/// The cursor only ever rests on a file entry. Headers are skipped when
/// moving, and `None` means the list has nothing selectable.
#[derive(Debug)]
pub struct FileListState<R: FuzzyRanker = SkimRanker> {
    /// Every changed file, in the order the source reported them.
    all_files: Vec<ChangedFile>,
    /// Files left after applying the query.
    files: Vec<ChangedFile>,
    mode: GroupingMode,
    expanded: ExpandedPaths,
    query: String,
    items: Vec<DisplayItem>,
    cursor: Option<usize>,
    /// First visible item.
    offset: usize,
    viewport: usize,
    ranker: R,
    /// Expand every folder when a new file list arrives.
    expand_on_load: bool,
}

impl Default for FileListState<SkimRanker> {
    fn default() -> Self {
        Self::new(SkimRanker::new())
    }
}

impl<R: FuzzyRanker> FileListState<R> {
    pub fn new(ranker: R) -> Self {
        Self {
            all_files: Vec::new(),
            files: Vec::new(),
            mode: GroupingMode::default(),
            expanded: ExpandedPaths::new(),
            query: String::new(),
            items: Vec::new(),
            cursor: None,
            offset: 0,
            viewport: 1,
            ranker,
            expand_on_load: true,
        }
    }

    /// Set the initial grouping mode.
    pub fn with_mode(mut self, mode: GroupingMode) -> Self {
        self.mode = mode;
        self.rebuild();
        self.select_first();
        self
    }

    /// Whether folders start out expanded when files are loaded.
    pub fn with_expand_folders(mut self, expand: bool) -> Self {
        self.expand_on_load = expand;
        self
    }

    /// Replace the file list, resetting folder state, query and cursor.
    pub fn set_files(&mut self, files: Vec<ChangedFile>) {
        self.expanded = if self.expand_on_load {
            ExpandedPaths::all(&files)
        } else {
            ExpandedPaths::new()
        };
        self.all_files = files;
        self.query.clear();
        self.offset = 0;
        self.rebuild();
        self.select_first();
        log::debug!(
            "File list: {} files, {} items",
            self.all_files.len(),
            self.items.len()
        );
    }

    pub fn all_files(&self) -> &[ChangedFile] {
        &self.all_files
    }

    /// Files currently passing the filter.
    pub fn files(&self) -> &[ChangedFile] {
        &self.files
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn mode(&self) -> GroupingMode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn expanded(&self) -> &ExpandedPaths {
        &self.expanded
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Items inside the viewport.
    pub fn visible_items(&self) -> &[DisplayItem] {
        let start = self.offset.min(self.items.len());
        let end = (start + self.viewport).min(self.items.len());
        &self.items[start..end]
    }

    /// The file under the cursor.
    pub fn selected_file(&self) -> Option<&ChangedFile> {
        self.cursor
            .and_then(|i| self.items.get(i))
            .and_then(DisplayItem::file_ref)
    }

    /// Apply a filter query; the cursor moves to the first match.
    ///
    /// Only surrounding whitespace is dropped, inner spaces are matched.
    pub fn set_query(&mut self, query: &str) {
        let query = normalize_query(query, false);
        if query == self.query {
            return;
        }
        self.query = query;
        self.rebuild();
        self.select_first();
    }

    pub fn clear_query(&mut self) {
        self.set_query("");
    }

    pub fn set_mode(&mut self, mode: GroupingMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.rebuild();
        self.select_first();
    }

    pub fn next_mode(&mut self) {
        self.set_mode(self.mode.next());
    }

    pub fn prev_mode(&mut self) {
        self.set_mode(self.mode.prev());
    }

    /// Set the number of visible rows.
    pub fn set_viewport(&mut self, height: usize) {
        self.viewport = height.max(1);
        self.ensure_visible();
    }

    /// Move to the next file entry, skipping headers.
    pub fn cursor_down(&mut self) {
        let start = match self.cursor {
            Some(i) => i + 1,
            None => 0,
        };
        if let Some(next) = (start..self.items.len()).find(|&i| self.is_selectable(i)) {
            self.select(next);
        }
    }

    /// Move to the previous file entry, skipping headers.
    pub fn cursor_up(&mut self) {
        let Some(current) = self.cursor else {
            self.select_first();
            return;
        };
        if let Some(prev) = (0..current).rev().find(|&i| self.is_selectable(i)) {
            self.select(prev);
        }
    }

    pub fn home(&mut self) {
        self.select_first();
    }

    pub fn end(&mut self) {
        let last = (0..self.items.len()).rev().find(|&i| self.is_selectable(i));
        self.cursor = last;
        self.ensure_visible();
    }

    pub fn page_down(&mut self) {
        let target = self.cursor.unwrap_or(0).saturating_add(self.viewport);
        let target = target.min(self.items.len().saturating_sub(1));
        self.select_nearest(target);
    }

    pub fn page_up(&mut self) {
        let target = self.cursor.unwrap_or(0).saturating_sub(self.viewport);
        self.select_nearest(target);
    }

    /// Expand or collapse a folder in the folder grouping.
    ///
    /// Returns the folder's new expanded state.
    pub fn toggle_folder(&mut self, path: &str) -> bool {
        let expanded = self.expanded.toggle(path);
        let anchor = self.cursor.unwrap_or(0);
        self.rebuild();
        self.select_nearest(anchor);
        expanded
    }

    /// Collapse or expand the folder containing the selected file.
    pub fn toggle_current_folder(&mut self) -> Option<bool> {
        if self.mode != GroupingMode::Folder {
            return None;
        }
        let dir = self.selected_file()?.dir()?.to_string();
        Some(self.toggle_folder(&dir))
    }

    /// Expand every folder of the unfiltered list.
    pub fn expand_all(&mut self) {
        self.expanded = ExpandedPaths::all(&self.all_files);
        let anchor = self.cursor.unwrap_or(0);
        self.rebuild();
        self.select_nearest(anchor);
    }

    fn rebuild(&mut self) {
        self.files = filter_files(&self.all_files, &self.query, &self.ranker);
        self.items = build(&self.files, self.mode, &self.expanded);
    }

    fn is_selectable(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|item| !item.is_header())
    }

    fn select(&mut self, index: usize) {
        self.cursor = Some(index);
        self.ensure_visible();
    }

    fn select_first(&mut self) {
        self.cursor = (0..self.items.len()).find(|&i| self.is_selectable(i));
        self.offset = 0;
        self.ensure_visible();
    }

    /// Select the file entry closest to `target`, preferring the one below.
    fn select_nearest(&mut self, target: usize) {
        let len = self.items.len();
        if len == 0 {
            self.cursor = None;
            self.offset = 0;
            return;
        }
        let target = target.min(len - 1);
        let nearest = (0..len).find_map(|distance| {
            let below = target + distance;
            if self.is_selectable(below) {
                return Some(below);
            }
            target
                .checked_sub(distance)
                .filter(|&above| self.is_selectable(above))
        });
        self.cursor = nearest;
        self.ensure_visible();
    }

    /// Adjust the scroll offset so the cursor is inside the viewport.
    fn ensure_visible(&mut self) {
        let Some(cursor) = self.cursor else {
            self.offset = 0;
            return;
        };
        if cursor < self.offset {
            self.offset = cursor;
        } else if cursor >= self.offset + self.viewport {
            self.offset = cursor + 1 - self.viewport;
        }
    }
}
