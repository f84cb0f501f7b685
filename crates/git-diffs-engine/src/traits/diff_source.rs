//! Trait for obtaining raw diff text from the version-control tool.

use crate::model::{ChangedFile, RevisionRange};
use crate::parser::{parse_changed_files, parse_name_status};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when asking the collaborator for diff data.
#[derive(Debug, Error)]
pub enum DiffSourceError {
    /// One of the compared revisions does not exist.
    #[error("Revision not found: {0}")]
    RevisionNotFound(String),

    /// The tool ran but reported a failure.
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// The tool produced output that is not valid UTF-8.
    #[error("Invalid UTF-8 in diff output")]
    InvalidUtf8,

    /// The source is not available (e.g., not a repository).
    #[error("Diff source unavailable: {0}")]
    Unavailable(String),
}

/// Provides the raw text the engine parses.
///
/// The engine never runs the version-control tool itself. Implement this
/// trait on top of `git diff` (or anything producing the same formats).
///
/// # Example
///
/// ```ignore
/// struct GitCli {
///     repo: PathBuf,
/// }
///
/// #[async_trait]
/// impl DiffSource for GitCli {
///     async fn raw_diff(&self, range: &RevisionRange, path: &str) -> Result<String, DiffSourceError> {
///         let revs = format!("{}...{}", range.base, range.head);
///         run_git(&self.repo, &["diff", &revs, "--", path]).await
///     }
///     // name_status / numstat similarly
/// }
/// ```
#[async_trait]
pub trait DiffSource: Send + Sync {
    /// Unified diff text for one file between the two revisions.
    async fn raw_diff(&self, range: &RevisionRange, path: &str)
        -> Result<String, DiffSourceError>;

    /// `--name-status` output for the comparison.
    async fn name_status(&self, range: &RevisionRange) -> Result<String, DiffSourceError>;

    /// `--numstat` output for the comparison.
    async fn numstat(&self, range: &RevisionRange) -> Result<String, DiffSourceError>;
}

/// Load the changed-file list for a comparison.
///
/// Missing numstat output only costs the line counts, so that failure is
/// logged and the files are returned with zero statistics.
pub async fn load_changed_files<S: DiffSource + ?Sized>(
    source: &S,
    range: &RevisionRange,
) -> Result<Vec<ChangedFile>, DiffSourceError> {
    let name_status = source.name_status(range).await?;

    let files = match source.numstat(range).await {
        Ok(numstat) => parse_changed_files(&name_status, &numstat),
        Err(e) => {
            log::warn!("Failed to load line statistics: {}", e);
            parse_name_status(&name_status)
        }
    };

    log::info!(
        "Loaded {} changed files between {} and {}",
        files.len(),
        range.base,
        range.head
    );
    Ok(files)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::FileStatus;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory source counting how often diffs are requested.
    #[derive(Default)]
    pub(crate) struct FakeSource {
        pub diffs: HashMap<String, String>,
        pub name_status: String,
        pub numstat: Option<String>,
        pub diff_calls: AtomicUsize,
    }

    #[async_trait]
    impl DiffSource for FakeSource {
        async fn raw_diff(
            &self,
            _range: &RevisionRange,
            path: &str,
        ) -> Result<String, DiffSourceError> {
            self.diff_calls.fetch_add(1, Ordering::SeqCst);
            self.diffs
                .get(path)
                .cloned()
                .ok_or_else(|| DiffSourceError::CommandFailed(format!("no diff for {}", path)))
        }

        async fn name_status(&self, _range: &RevisionRange) -> Result<String, DiffSourceError> {
            Ok(self.name_status.clone())
        }

        async fn numstat(&self, _range: &RevisionRange) -> Result<String, DiffSourceError> {
            self.numstat
                .clone()
                .ok_or_else(|| DiffSourceError::Unavailable("numstat".to_string()))
        }
    }

    #[tokio::test]
    async fn test_load_changed_files() {
        let source = FakeSource {
            name_status: "M\tsrc/main.rs\nR100\ta.go\tb.go\n".to_string(),
            numstat: Some("4\t2\tsrc/main.rs\n".to_string()),
            ..FakeSource::default()
        };
        let range = RevisionRange::new("main", "HEAD");

        let files = load_changed_files(&source, &range).await.unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!((files[0].additions, files[0].deletions), (4, 2));
        assert_eq!(files[1].status, FileStatus::Renamed);
        assert_eq!(files[1].old_path.as_deref(), Some("a.go"));
    }

    #[tokio::test]
    async fn test_missing_numstat_keeps_files() {
        let source = FakeSource {
            name_status: "A\tnew.rs\n".to_string(),
            numstat: None,
            ..FakeSource::default()
        };
        let range = RevisionRange::new("main", "HEAD");

        let files = load_changed_files(&source, &range).await.unwrap();
        assert_eq!(files, vec![ChangedFile::new(FileStatus::Added, "new.rs")]);
    }
}
