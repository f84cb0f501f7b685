//! Hunk model produced by the unified diff parser.

use serde::{Deserialize, Serialize};

/// The parsed diff of a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    /// Path from the `---` line, with the `a/` prefix stripped.
    pub old_path: String,
    /// Path from the `+++` line, with the `b/` prefix stripped.
    pub new_path: String,
    /// Change hunks in the order they appear.
    pub hunks: Vec<Hunk>,
    /// Set when git reported the file as binary (no hunks available).
    #[serde(default)]
    pub binary: bool,
}

impl FileDiff {
    /// Create an empty file diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// The path to show for this diff (handles renames and deletions).
    pub fn display_path(&self) -> String {
        match (self.old_path.as_str(), self.new_path.as_str()) {
            ("", new) => new.to_string(),
            (old, "/dev/null") | (old, "") => old.to_string(),
            ("/dev/null", new) => new.to_string(),
            (old, new) if old != new => format!("{} → {}", old, new),
            (_, new) => new.to_string(),
        }
    }

    /// Number of added lines across all hunks.
    pub fn additions(&self) -> usize {
        self.count_kind(LineKind::Addition)
    }

    /// Number of deleted lines across all hunks.
    pub fn deletions(&self) -> usize {
        self.count_kind(LineKind::Deletion)
    }

    /// True when there is nothing to show (unchanged file or pure rename).
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    fn count_kind(&self, kind: LineKind) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == kind)
            .count()
    }
}

/// A contiguous region of changes (hunk).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    /// Raw header line (e.g., "@@ -10,5 +10,7 @@ fn example()").
    pub header: String,
    /// Function context after the closing `@@`, if git emitted one.
    pub section: Option<String>,
    /// Old file starting line.
    pub old_start: u32,
    /// Number of lines in old version.
    pub old_count: u32,
    /// New file starting line.
    pub new_start: u32,
    /// Number of lines in new version.
    pub new_count: u32,
    /// Lines in this hunk, starting with the header line.
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// Create a hunk whose first line echoes `header`.
    pub fn new(
        header: impl Into<String>,
        old_start: u32,
        old_count: u32,
        new_start: u32,
        new_count: u32,
    ) -> Self {
        let header = header.into();
        Self {
            lines: vec![DiffLine::header(header.clone())],
            header,
            section: None,
            old_start,
            old_count,
            new_start,
            new_count,
        }
    }

    /// Lines of the hunk body (everything after the header line).
    pub fn body(&self) -> &[DiffLine] {
        match self.lines.first() {
            Some(first) if first.kind == LineKind::Header => &self.lines[1..],
            _ => &self.lines,
        }
    }
}

/// A single line in the diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    /// Line type.
    pub kind: LineKind,
    /// Line content (without leading +/-/ ).
    pub content: String,
    /// Line number in old file (for Context and Deletion).
    pub old_line: Option<u32>,
    /// Line number in new file (for Context and Addition).
    pub new_line: Option<u32>,
}

impl DiffLine {
    /// Create a new context line.
    pub fn context(content: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: LineKind::Context,
            content: content.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    /// Create a new addition line.
    pub fn addition(content: impl Into<String>, new_line: u32) -> Self {
        Self {
            kind: LineKind::Addition,
            content: content.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    /// Create a new deletion line.
    pub fn deletion(content: impl Into<String>, old_line: u32) -> Self {
        Self {
            kind: LineKind::Deletion,
            content: content.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    /// Create a hunk header line. Headers carry no line numbers.
    pub fn header(content: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Header,
            content: content.into(),
            old_line: None,
            new_line: None,
        }
    }
}

/// Line type in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// Unchanged line.
    Context,
    /// Added line (+).
    Addition,
    /// Removed line (-).
    Deletion,
    /// @@ header line.
    Header,
}

impl LineKind {
    /// Get the prefix character for this line type.
    pub fn prefix(&self) -> char {
        match self {
            LineKind::Context => ' ',
            LineKind::Addition => '+',
            LineKind::Deletion => '-',
            LineKind::Header => '@',
        }
    }

    /// Context and header lines belong to both sides of the diff.
    pub fn is_shared(&self) -> bool {
        matches!(self, LineKind::Context | LineKind::Header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_path() {
        let mut diff = FileDiff::new();
        diff.old_path = "src/old.rs".to_string();
        diff.new_path = "src/new.rs".to_string();
        assert_eq!(diff.display_path(), "src/old.rs → src/new.rs");

        diff.old_path = "src/new.rs".to_string();
        assert_eq!(diff.display_path(), "src/new.rs");

        diff.new_path = "/dev/null".to_string();
        assert_eq!(diff.display_path(), "src/new.rs");

        diff.old_path = "/dev/null".to_string();
        diff.new_path = "added.rs".to_string();
        assert_eq!(diff.display_path(), "added.rs");
    }

    #[test]
    fn test_hunk_starts_with_header() {
        let hunk = Hunk::new("@@ -10,5 +10,7 @@", 10, 5, 10, 7);
        assert_eq!(hunk.lines.len(), 1);
        assert_eq!(hunk.lines[0].kind, LineKind::Header);
        assert_eq!(hunk.lines[0].content, "@@ -10,5 +10,7 @@");
        assert!(hunk.body().is_empty());
    }

    #[test]
    fn test_diff_line_kinds() {
        let ctx = DiffLine::context("unchanged", 5, 5);
        assert_eq!(ctx.kind, LineKind::Context);
        assert_eq!(ctx.old_line, Some(5));
        assert_eq!(ctx.new_line, Some(5));

        let add = DiffLine::addition("new line", 10);
        assert_eq!(add.old_line, None);
        assert_eq!(add.new_line, Some(10));

        let del = DiffLine::deletion("removed line", 8);
        assert_eq!(del.old_line, Some(8));
        assert_eq!(del.new_line, None);

        let header = DiffLine::header("@@ -1 +1 @@");
        assert_eq!(header.old_line, None);
        assert_eq!(header.new_line, None);
    }

    #[test]
    fn test_stats() {
        let mut hunk = Hunk::new("@@ -1,2 +1,2 @@", 1, 2, 1, 2);
        hunk.lines.push(DiffLine::deletion("a", 1));
        hunk.lines.push(DiffLine::addition("b", 1));
        hunk.lines.push(DiffLine::addition("c", 2));
        let diff = FileDiff {
            hunks: vec![hunk],
            ..FileDiff::default()
        };
        assert_eq!(diff.additions(), 2);
        assert_eq!(diff.deletions(), 1);
        assert!(!diff.is_empty());
    }
}
