//! Per-file diff cache (decorator over a `DiffSource`).
//!
//! Parsed diffs are keyed by `(path, base, head)`, so a cached entry can
//! never be served for a different pair of revisions. Switching the
//! compared revisions drops every entry of the previous pair.

use crate::model::{FileDiff, RevisionRange};
use crate::parser::parse_file_diff;
use crate::traits::DiffSource;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cache key for one file in one comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiffKey {
    pub path: String,
    pub base: String,
    pub head: String,
}

impl DiffKey {
    pub fn new(range: &RevisionRange, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            base: range.base.clone(),
            head: range.head.clone(),
        }
    }

    fn is_for(&self, range: &RevisionRange) -> bool {
        self.base == range.base && self.head == range.head
    }
}

/// Parsed diffs by file and revision pair.
#[derive(Debug, Default)]
pub struct DiffCache {
    entries: HashMap<DiffKey, Arc<FileDiff>>,
}

impl DiffCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &DiffKey) -> Option<Arc<FileDiff>> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: DiffKey, diff: Arc<FileDiff>) {
        self.entries.insert(key, diff);
    }

    /// Drop every entry that does not belong to `range`.
    pub fn retain_range(&mut self, range: &RevisionRange) {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.is_for(range));
        debug!(
            "Diff cache: dropped {} entries outside {}..{}",
            before - self.entries.len(),
            range.base,
            range.head
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of loading one file's diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffLoad {
    /// A parsed diff; zero hunks means the file is unchanged in this direction.
    Loaded(Arc<FileDiff>),
    /// No diff can be shown for this file (binary, missing revision, tool failure).
    Unavailable { path: String, reason: String },
}

impl DiffLoad {
    pub fn diff(&self) -> Option<&FileDiff> {
        match self {
            DiffLoad::Loaded(diff) => Some(diff),
            DiffLoad::Unavailable { .. } => None,
        }
    }
}

/// Diff source wrapper that parses and caches per-file diffs for the
/// current revision range.
///
/// # Example
///
/// ```rust,ignore
/// let source = CachedDiffSource::new(GitCli::new(repo), RevisionRange::new("main", "HEAD"));
/// match source.file_diff("src/main.rs").await {
///     DiffLoad::Loaded(diff) => show(align(&diff.hunks)),
///     DiffLoad::Unavailable { reason, .. } => show_message(reason),
/// }
/// ```
#[derive(Debug)]
pub struct CachedDiffSource<S: DiffSource> {
    inner: S,
    range: Mutex<RevisionRange>,
    cache: Arc<Mutex<DiffCache>>,
}

impl<S: DiffSource> CachedDiffSource<S> {
    pub fn new(inner: S, range: RevisionRange) -> Self {
        Self::with_cache(inner, range, Arc::new(Mutex::new(DiffCache::new())))
    }

    /// Create a wrapper sharing an existing cache.
    pub fn with_cache(inner: S, range: RevisionRange, cache: Arc<Mutex<DiffCache>>) -> Self {
        Self {
            inner,
            range: Mutex::new(range),
            cache,
        }
    }

    /// Get a reference to the inner source.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn range(&self) -> RevisionRange {
        lock(&self.range).clone()
    }

    /// Switch the compared revisions, invalidating diffs of the previous pair.
    pub fn set_range(&self, range: RevisionRange) {
        let mut current = lock(&self.range);
        if *current == range {
            return;
        }
        lock(&self.cache).retain_range(&range);
        *current = range;
    }

    /// Load, parse and cache the diff of `path` for the current range.
    pub async fn file_diff(&self, path: &str) -> DiffLoad {
        let range = self.range();
        let key = DiffKey::new(&range, path);

        if let Some(diff) = lock(&self.cache).get(&key) {
            debug!("Diff cache hit for {}", path);
            return DiffLoad::Loaded(diff);
        }

        let raw = match self.inner.raw_diff(&range, path).await {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("No diff available for {}: {}", path, e);
                return DiffLoad::Unavailable {
                    path: path.to_string(),
                    reason: e.to_string(),
                };
            }
        };

        let diff = parse_file_diff(&raw);
        if diff.binary {
            return DiffLoad::Unavailable {
                path: path.to_string(),
                reason: "Binary file".to_string(),
            };
        }

        let diff = Arc::new(diff);
        self.insert_if_current(&range, key, Arc::clone(&diff));
        DiffLoad::Loaded(diff)
    }

    /// Cache `diff` unless the range moved on while it was loading.
    ///
    /// Locks `range` before `cache`, the same order as `set_range`.
    fn insert_if_current(
        &self,
        range: &RevisionRange,
        key: DiffKey,
        diff: Arc<FileDiff>,
    ) -> bool {
        let current = lock(&self.range);
        if *current != *range {
            debug!("Discarding diff of {} loaded for a previous range", key.path);
            return false;
        }
        lock(&self.cache).insert(key, diff);
        true
    }
}

/// Lock a mutex, recovering the data if another holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::FakeSource;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::Ordering;

    fn source() -> FakeSource {
        let mut diffs = HashMap::new();
        diffs.insert(
            "src/main.rs".to_string(),
            "--- a/src/main.rs\n+++ b/src/main.rs\n@@ -1 +1 @@\n-a\n+b\n".to_string(),
        );
        diffs.insert("unchanged.rs".to_string(), String::new());
        diffs.insert(
            "logo.png".to_string(),
            "Binary files a/logo.png and b/logo.png differ\n".to_string(),
        );
        FakeSource {
            diffs,
            ..FakeSource::default()
        }
    }

    #[tokio::test]
    async fn test_second_load_is_cached() {
        let cached = CachedDiffSource::new(source(), RevisionRange::new("main", "HEAD"));

        let first = cached.file_diff("src/main.rs").await;
        let second = cached.file_diff("src/main.rs").await;

        assert_eq!(first, second);
        assert_eq!(first.diff().map(|d| d.hunks.len()), Some(1));
        assert_eq!(cached.inner().diff_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_range_change_invalidates() {
        let cached = CachedDiffSource::new(source(), RevisionRange::new("main", "HEAD"));
        cached.file_diff("src/main.rs").await;

        cached.set_range(RevisionRange::new("main", "HEAD"));
        cached.file_diff("src/main.rs").await;
        assert_eq!(cached.inner().diff_calls.load(Ordering::SeqCst), 1);

        cached.set_range(RevisionRange::new("develop", "HEAD"));
        assert!(lock(&cached.cache).is_empty());
        cached.file_diff("src/main.rs").await;
        assert_eq!(cached.inner().diff_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_and_binary_are_unavailable() {
        let cached = CachedDiffSource::new(source(), RevisionRange::new("main", "HEAD"));

        match cached.file_diff("missing.rs").await {
            DiffLoad::Unavailable { path, .. } => assert_eq!(path, "missing.rs"),
            other => panic!("expected unavailable, got {:?}", other),
        }
        assert!(matches!(
            cached.file_diff("logo.png").await,
            DiffLoad::Unavailable { .. }
        ));
    }

    #[tokio::test]
    async fn test_empty_diff_is_loaded() {
        let cached = CachedDiffSource::new(source(), RevisionRange::new("main", "HEAD"));
        let load = cached.file_diff("unchanged.rs").await;
        assert_eq!(load.diff(), Some(&FileDiff::default()));
    }

    #[tokio::test]
    async fn test_stale_load_is_not_cached() {
        let main = RevisionRange::new("main", "HEAD");
        let cached = CachedDiffSource::new(source(), main.clone());

        // Range switched while a diff for `main` was in flight
        cached.set_range(RevisionRange::new("develop", "HEAD"));
        let stored = cached.insert_if_current(
            &main,
            DiffKey::new(&main, "src/main.rs"),
            Arc::new(FileDiff::default()),
        );

        assert!(!stored);
        assert!(lock(&cached.cache).is_empty());

        cached.file_diff("src/main.rs").await;
        assert_eq!(lock(&cached.cache).len(), 1);
    }

    #[test]
    fn test_retain_range() {
        let main = RevisionRange::new("main", "HEAD");
        let dev = RevisionRange::new("dev", "HEAD");
        let mut cache = DiffCache::new();
        cache.insert(DiffKey::new(&main, "a.rs"), Arc::new(FileDiff::default()));
        cache.insert(DiffKey::new(&dev, "a.rs"), Arc::new(FileDiff::default()));

        cache.retain_range(&dev);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&DiffKey::new(&dev, "a.rs")).is_some());
        assert!(cache.get(&DiffKey::new(&main, "a.rs")).is_none());
    }
}
