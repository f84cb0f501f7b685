//! Items of the navigable changed-file list.

use super::ChangedFile;
use serde::{Deserialize, Serialize};

/// An entry of the changed-file list, indented by `depth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItem {
    pub depth: usize,
    pub kind: DisplayItemKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayItemKind {
    /// A directory in folder mode.
    FolderHeader {
        /// Full directory path, the key into `ExpandedPaths`.
        path: String,
        /// Last path component.
        name: String,
        expanded: bool,
    },
    /// A status group in type mode.
    TypeHeader { label: String, count: usize },
    FileEntry { file: ChangedFile },
}

impl DisplayItem {
    pub fn folder(
        depth: usize,
        path: impl Into<String>,
        name: impl Into<String>,
        expanded: bool,
    ) -> Self {
        Self {
            depth,
            kind: DisplayItemKind::FolderHeader {
                path: path.into(),
                name: name.into(),
                expanded,
            },
        }
    }

    pub fn type_header(label: impl Into<String>, count: usize) -> Self {
        Self {
            depth: 0,
            kind: DisplayItemKind::TypeHeader {
                label: label.into(),
                count,
            },
        }
    }

    pub fn file(depth: usize, file: ChangedFile) -> Self {
        Self {
            depth,
            kind: DisplayItemKind::FileEntry { file },
        }
    }

    /// Headers group other items and can never hold the cursor.
    pub fn is_header(&self) -> bool {
        !matches!(self.kind, DisplayItemKind::FileEntry { .. })
    }

    /// The file behind a file entry.
    pub fn file_ref(&self) -> Option<&ChangedFile> {
        match &self.kind {
            DisplayItemKind::FileEntry { file } => Some(file),
            _ => None,
        }
    }

    /// Text to show for this item (file name in folder mode is chosen by the caller).
    pub fn label(&self) -> String {
        match &self.kind {
            DisplayItemKind::FolderHeader { name, .. } => name.clone(),
            DisplayItemKind::TypeHeader { label, count } => format!("{} ({})", label, count),
            DisplayItemKind::FileEntry { file } => file.path.clone(),
        }
    }

    /// Get the fold icon for this entry.
    pub fn icon(&self) -> &'static str {
        match self.kind {
            DisplayItemKind::FolderHeader { expanded: true, .. } => "▼ ",
            DisplayItemKind::FolderHeader { expanded: false, .. } => "▶ ",
            _ => "  ",
        }
    }

    /// Get indent string based on depth.
    pub fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }
}
