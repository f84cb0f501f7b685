//! Changed files reported by a name-status + numstat comparison.

use serde::{Deserialize, Serialize};

/// A file touched by the comparison between two revisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Type of change.
    pub status: FileStatus,
    /// Current file path.
    pub path: String,
    /// Previous path, only populated for renames.
    pub old_path: Option<String>,
    /// Number of added lines.
    pub additions: usize,
    /// Number of deleted lines.
    pub deletions: usize,
}

impl ChangedFile {
    /// Create a changed file without line statistics.
    pub fn new(status: FileStatus, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
            old_path: None,
            additions: 0,
            deletions: 0,
        }
    }

    /// Create a renamed file.
    pub fn renamed(old_path: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            old_path: Some(old_path.into()),
            ..Self::new(FileStatus::Renamed, path)
        }
    }

    /// Set the line statistics.
    pub fn with_stats(mut self, additions: usize, deletions: usize) -> Self {
        self.additions = additions;
        self.deletions = deletions;
        self
    }

    /// Final path component.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Directory part of the path, `None` for files at the repository root.
    pub fn dir(&self) -> Option<&str> {
        self.path.rsplit_once('/').map(|(dir, _)| dir)
    }
}

/// File status in the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    Unknown,
}

impl FileStatus {
    /// Map a git status letter (`A`, `M`, `D`, `R`, `C`) to a status.
    pub fn from_letter(letter: char) -> Self {
        match letter {
            'A' => FileStatus::Added,
            'M' => FileStatus::Modified,
            'D' => FileStatus::Deleted,
            'R' => FileStatus::Renamed,
            'C' => FileStatus::Copied,
            _ => FileStatus::Unknown,
        }
    }

    /// Get a single-character representation.
    pub fn as_char(&self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Modified => 'M',
            FileStatus::Deleted => 'D',
            FileStatus::Renamed => 'R',
            FileStatus::Copied => 'C',
            FileStatus::Unknown => '?',
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Modified => "modified",
            FileStatus::Deleted => "deleted",
            FileStatus::Renamed => "renamed",
            FileStatus::Copied => "copied",
            FileStatus::Unknown => "unknown",
        }
    }
}

/// The two revisions a comparison session is run between.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevisionRange {
    pub base: String,
    pub head: String,
}

impl RevisionRange {
    pub fn new(base: impl Into<String>, head: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            head: head.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_letters() {
        for letter in ['A', 'M', 'D', 'R', 'C'] {
            assert_eq!(FileStatus::from_letter(letter).as_char(), letter);
        }
        assert_eq!(FileStatus::from_letter('T'), FileStatus::Unknown);
        assert_eq!(FileStatus::Unknown.as_char(), '?');
    }

    #[test]
    fn test_path_parts() {
        let file = ChangedFile::new(FileStatus::Modified, "src/ui/view.rs");
        assert_eq!(file.file_name(), "view.rs");
        assert_eq!(file.dir(), Some("src/ui"));

        let root = ChangedFile::new(FileStatus::Added, "Cargo.toml");
        assert_eq!(root.file_name(), "Cargo.toml");
        assert_eq!(root.dir(), None);
    }
}
