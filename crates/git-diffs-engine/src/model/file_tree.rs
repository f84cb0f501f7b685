//! Directory tree over the changed files, used by the folder grouping.

use super::{ChangedFile, DisplayItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Node in the directory tree.
#[derive(Debug, Clone)]
pub struct FileTreeNode {
    /// Display name (file or directory name).
    pub name: String,
    /// Full directory path for directories, full file path for files.
    pub path: String,
    /// Child nodes (for directories).
    pub children: Vec<FileTreeNode>,
    /// The changed file (for files).
    pub file: Option<ChangedFile>,
}

impl FileTreeNode {
    /// Create a new directory node.
    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            children: Vec::new(),
            file: None,
        }
    }

    /// Create a new file node.
    pub fn file(name: impl Into<String>, file: &ChangedFile) -> Self {
        Self {
            name: name.into(),
            path: file.path.clone(),
            children: Vec::new(),
            file: Some(file.clone()),
        }
    }

    /// Build a directory tree from a flat list of changed files.
    pub fn from_files(files: &[ChangedFile]) -> Self {
        let mut root = FileTreeNode::directory("", "");

        for file in files {
            let parts: Vec<&str> = file.path.split('/').filter(|p| !p.is_empty()).collect();
            root.insert_path(&parts, file);
        }

        // Directories first, then files, both alphabetically
        root.sort_recursive();
        root
    }

    fn insert_path(&mut self, parts: &[&str], file: &ChangedFile) {
        match parts {
            [] => {}
            [name] => self.children.push(FileTreeNode::file(*name, file)),
            [dir_name, rest @ ..] => {
                let child = self
                    .children
                    .iter_mut()
                    .find(|c| c.name == *dir_name && c.is_directory());

                if let Some(dir) = child {
                    dir.insert_path(rest, file);
                } else {
                    let path = if self.path.is_empty() {
                        dir_name.to_string()
                    } else {
                        format!("{}/{}", self.path, dir_name)
                    };
                    let mut new_dir = FileTreeNode::directory(*dir_name, path);
                    new_dir.insert_path(rest, file);
                    self.children.push(new_dir);
                }
            }
        }
    }

    fn sort_recursive(&mut self) {
        self.children.sort_by(|a, b| {
            b.is_directory()
                .cmp(&a.is_directory())
                .then_with(|| a.name.cmp(&b.name))
        });

        for child in &mut self.children {
            child.sort_recursive();
        }
    }

    /// Check if this node is a directory.
    pub fn is_directory(&self) -> bool {
        self.file.is_none()
    }

    /// Flatten the tree into display items, omitting children of collapsed folders.
    pub fn flatten(&self, expanded: &ExpandedPaths) -> Vec<DisplayItem> {
        let mut result = Vec::new();
        for child in &self.children {
            child.flatten_recursive(0, expanded, &mut result);
        }
        result
    }

    fn flatten_recursive(
        &self,
        depth: usize,
        expanded: &ExpandedPaths,
        out: &mut Vec<DisplayItem>,
    ) {
        match &self.file {
            Some(file) => out.push(DisplayItem::file(depth, file.clone())),
            None => {
                let is_expanded = expanded.contains(&self.path);
                out.push(DisplayItem::folder(depth, &self.path, &self.name, is_expanded));
                if is_expanded {
                    for child in &self.children {
                        child.flatten_recursive(depth + 1, expanded, out);
                    }
                }
            }
        }
    }

    /// Full paths of every directory below this node.
    pub fn directory_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for child in self.children.iter().filter(|c| c.is_directory()) {
            paths.push(child.path.clone());
            paths.extend(child.directory_paths());
        }
        paths
    }
}

/// Set of expanded directory paths for the folder grouping.
///
/// Lives as long as one view session and is reset when the file list changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedPaths {
    paths: BTreeSet<String>,
}

impl ExpandedPaths {
    /// Nothing expanded: only top-level folders are shown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every directory containing one of `files` expanded.
    pub fn all(files: &[ChangedFile]) -> Self {
        Self {
            paths: FileTreeNode::from_files(files)
                .directory_paths()
                .into_iter()
                .collect(),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn expand(&mut self, path: impl Into<String>) {
        self.paths.insert(path.into());
    }

    pub fn collapse(&mut self, path: &str) {
        self.paths.remove(path);
    }

    /// Toggle a directory. Returns the new expanded state.
    pub fn toggle(&mut self, path: &str) -> bool {
        if self.paths.remove(path) {
            false
        } else {
            self.paths.insert(path.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
