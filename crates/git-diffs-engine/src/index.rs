//! Alternate groupings of the changed-file list.

use crate::model::{ChangedFile, DisplayItem, ExpandedPaths, FileStatus, FileTreeNode};
use crate::traits::FuzzyRanker;
use serde::{Deserialize, Serialize};

/// How the changed-file list is grouped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMode {
    /// Directory tree with collapsible folders.
    #[default]
    Folder,
    /// Grouped by change type.
    Type,
    /// Flat list in input order.
    Raw,
}

impl GroupingMode {
    pub fn next(self) -> Self {
        match self {
            GroupingMode::Folder => GroupingMode::Type,
            GroupingMode::Type => GroupingMode::Raw,
            GroupingMode::Raw => GroupingMode::Folder,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            GroupingMode::Folder => GroupingMode::Raw,
            GroupingMode::Type => GroupingMode::Folder,
            GroupingMode::Raw => GroupingMode::Type,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupingMode::Folder => "Folder",
            GroupingMode::Type => "Type",
            GroupingMode::Raw => "Raw",
        }
    }
}

/// Type groups in display order. Statuses without a group of their own
/// are listed under Modified.
const TYPE_GROUPS: [(FileStatus, &str); 3] = [
    (FileStatus::Modified, "Modified"),
    (FileStatus::Added, "Added"),
    (FileStatus::Deleted, "Deleted"),
];

fn type_group(status: FileStatus) -> FileStatus {
    match status {
        FileStatus::Added | FileStatus::Deleted => status,
        _ => FileStatus::Modified,
    }
}

/// Build the navigable item list for `files` in `mode`.
///
/// `expanded` only affects the folder grouping.
pub fn build(
    files: &[ChangedFile],
    mode: GroupingMode,
    expanded: &ExpandedPaths,
) -> Vec<DisplayItem> {
    match mode {
        GroupingMode::Folder => FileTreeNode::from_files(files).flatten(expanded),
        GroupingMode::Type => build_type_view(files),
        GroupingMode::Raw => files
            .iter()
            .map(|f| DisplayItem::file(0, f.clone()))
            .collect(),
    }
}

fn build_type_view(files: &[ChangedFile]) -> Vec<DisplayItem> {
    let mut items = Vec::new();

    for (status, label) in TYPE_GROUPS {
        let mut members: Vec<&ChangedFile> = files
            .iter()
            .filter(|f| type_group(f.status) == status)
            .collect();
        if members.is_empty() {
            continue;
        }
        members.sort_by(|a, b| a.path.cmp(&b.path));

        items.push(DisplayItem::type_header(label, members.len()));
        items.extend(members.into_iter().map(|f| DisplayItem::file(1, f.clone())));
    }

    items
}

/// Reduce `files` to the ones matching `query`, best match first.
///
/// An empty query keeps every file in its original order.
pub fn filter_files<R: FuzzyRanker + ?Sized>(
    files: &[ChangedFile],
    query: &str,
    ranker: &R,
) -> Vec<ChangedFile> {
    if query.is_empty() {
        return files.to_vec();
    }

    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    ranker
        .rank(query, &paths)
        .into_iter()
        .filter_map(|m| files.get(m.index).cloned())
        .collect()
}
