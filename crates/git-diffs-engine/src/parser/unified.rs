//! Parse unified diff format (as produced by `git diff`).
//!
//! Parsing never fails: malformed lines are skipped and malformed hunk
//! headers fall back to the unified-diff defaults.

use crate::model::{DiffLine, FileDiff, Hunk};
use regex::Regex;
use std::sync::OnceLock;

/// Matches `@@ -a,b +c,d @@ section`, with either count optional.
fn hunk_header_regex() -> &'static Regex {
    static HUNK_HEADER: OnceLock<Regex> = OnceLock::new();
    HUNK_HEADER.get_or_init(|| {
        Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@ ?(.*)$").unwrap()
    })
}

/// Line ranges declared by a hunk header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunkRange {
    pub old_start: u32,
    pub old_count: u32,
    pub new_start: u32,
    pub new_count: u32,
    pub section: Option<String>,
}

impl Default for HunkRange {
    /// Used when a header cannot be parsed: counts default to a single line.
    fn default() -> Self {
        Self {
            old_start: 0,
            old_count: 1,
            new_start: 0,
            new_count: 1,
            section: None,
        }
    }
}

/// Parse a hunk header like "@@ -10,4 +10,15 @@ fn foo()".
///
/// Omitted counts default to 1. Returns `None` when the line is not a
/// recognizable header.
pub fn parse_hunk_header(line: &str) -> Option<HunkRange> {
    let caps = hunk_header_regex().captures(line)?;
    let number = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<u32>().ok());

    let section = caps
        .get(5)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Some(HunkRange {
        old_start: number(1)?,
        old_count: number(2).unwrap_or(1),
        new_start: number(3)?,
        new_count: number(4).unwrap_or(1),
        section,
    })
}

/// A hunk being filled, with the running line-number cursors.
struct OpenHunk {
    hunk: Hunk,
    old_line: u32,
    new_line: u32,
    old_remaining: u32,
    new_remaining: u32,
}

impl OpenHunk {
    fn start(header: &str) -> Self {
        let range = parse_hunk_header(header).unwrap_or_else(|| {
            log::debug!("Unparsable hunk header, using defaults: {}", header);
            HunkRange::default()
        });

        let mut hunk = Hunk::new(
            header,
            range.old_start,
            range.old_count,
            range.new_start,
            range.new_count,
        );
        hunk.section = range.section;

        Self {
            hunk,
            old_line: range.old_start,
            new_line: range.new_start,
            old_remaining: range.old_count,
            new_remaining: range.new_count,
        }
    }

    /// Whether the header's declared counts still expect body lines.
    fn expects_body(&self) -> bool {
        self.old_remaining > 0 || self.new_remaining > 0
    }

    fn push_line(&mut self, line: &str) {
        let mut chars = line.chars();
        match chars.next() {
            None => self.push_context(""),
            Some(' ') => self.push_context(chars.as_str()),
            Some('+') => {
                self.hunk
                    .lines
                    .push(DiffLine::addition(chars.as_str(), self.new_line));
                self.new_line = self.new_line.saturating_add(1);
                self.new_remaining = self.new_remaining.saturating_sub(1);
            }
            Some('-') => {
                self.hunk
                    .lines
                    .push(DiffLine::deletion(chars.as_str(), self.old_line));
                self.old_line = self.old_line.saturating_add(1);
                self.old_remaining = self.old_remaining.saturating_sub(1);
            }
            // "\ No newline at end of file"
            Some('\\') => {}
            Some(_) => log::trace!("Skipping unexpected line in hunk: {}", line),
        }
    }

    fn push_context(&mut self, content: &str) {
        self.hunk
            .lines
            .push(DiffLine::context(content, self.old_line, self.new_line));
        self.old_line = self.old_line.saturating_add(1);
        self.new_line = self.new_line.saturating_add(1);
        self.old_remaining = self.old_remaining.saturating_sub(1);
        self.new_remaining = self.new_remaining.saturating_sub(1);
    }
}

/// Parse the unified diff of a single file.
///
/// # Example
/// ```
/// use git_diffs_engine::parser::parse_file_diff;
///
/// let diff = parse_file_diff("--- a/x.rs\n+++ b/x.rs\n@@ -1 +1 @@\n-old\n+new\n");
/// assert_eq!(diff.new_path, "x.rs");
/// assert_eq!(diff.hunks[0].lines.len(), 3);
/// ```
pub fn parse_file_diff(diff_text: &str) -> FileDiff {
    let mut diff = FileDiff::new();
    let mut current: Option<OpenHunk> = None;

    for line in diff_text.lines() {
        let in_body = current.as_ref().is_some_and(OpenHunk::expects_body);

        if !in_body {
            if line.starts_with("---") {
                if let Some(path) = header_path(line, "a/") {
                    diff.old_path = path;
                }
                continue;
            }
            if line.starts_with("+++") {
                if let Some(path) = header_path(line, "b/") {
                    diff.new_path = path;
                }
                continue;
            }
        }

        if line.starts_with("@@") {
            if let Some(open) = current.take() {
                diff.hunks.push(open.hunk);
            }
            current = Some(OpenHunk::start(line));
            continue;
        }

        match current.as_mut() {
            Some(open) => open.push_line(line),
            None => read_extended_header(line, &mut diff),
        }
    }

    if let Some(open) = current {
        diff.hunks.push(open.hunk);
    }

    log::debug!(
        "Parsed diff for {}: {} hunks",
        diff.display_path(),
        diff.hunks.len()
    );
    diff
}

/// Parse a multi-file `git diff` output, one `FileDiff` per `diff --git` section.
pub fn parse_patch(diff_text: &str) -> Vec<FileDiff> {
    let mut sections: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in diff_text.split_inclusive('\n') {
        if line.starts_with("diff --git ") && !current.is_empty() {
            sections.push(std::mem::take(&mut current));
        }
        current.push_str(line);
    }
    if !current.trim().is_empty() {
        sections.push(current);
    }

    sections.iter().map(|s| parse_file_diff(s)).collect()
}

/// Lines git emits between `diff --git` and the first hunk that carry
/// information even when no `---`/`+++` lines follow.
fn read_extended_header(line: &str, diff: &mut FileDiff) {
    if let Some(path) = line.strip_prefix("rename from ") {
        diff.old_path = path.to_string();
    } else if let Some(path) = line.strip_prefix("rename to ") {
        diff.new_path = path.to_string();
    } else if line.starts_with("Binary files ") && line.ends_with(" differ") {
        diff.binary = true;
    }
}

/// Extract the path of a `---`/`+++` line, dropping the side prefix and any
/// tab-separated timestamp.
fn header_path(line: &str, prefix: &str) -> Option<String> {
    let (_, rest) = line.split_once(' ')?;
    let path = rest.split('\t').next().unwrap_or(rest).trim_end();
    Some(path.strip_prefix(prefix).unwrap_or(path).to_string())
}
