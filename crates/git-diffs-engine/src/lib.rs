//! # git-diffs-engine
//!
//! Turns the text produced by `git diff` into structures a two-pane diff
//! viewer can render directly: a changed-file list grouped by folder or
//! change type, hunks with per-line numbers, side-by-side rows, and
//! single-column projections of those rows.
//!
//! ## Design Principles
//!
//! The engine never runs git and never draws anything. Raw text comes in
//! through the [`DiffSource`] trait, plain data goes out. Every transform
//! (parse, align, project, group) is a pure function of its input.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use git_diffs_engine::{align, project, CachedDiffSource, DiffLoad, RevisionRange, ViewMode};
//!
//! let range = RevisionRange::new("main", "HEAD");
//! let files = git_diffs_engine::load_changed_files(&git, &range).await?;
//!
//! let source = CachedDiffSource::new(git, range);
//! if let DiffLoad::Loaded(diff) = source.file_diff(&files[0].path).await {
//!     let rows = align(&diff.hunks);
//!     let lines = project(&rows, ViewMode::New);
//! }
//! ```

pub mod align;
pub mod cache;
pub mod index;
pub mod model;
pub mod parser;
pub mod project;
pub mod search;
pub mod state;
pub mod traits;

// Re-export commonly used types
pub use align::align;
pub use cache::{CachedDiffSource, DiffCache, DiffKey, DiffLoad};
pub use index::{build, filter_files, GroupingMode};
pub use model::{
    AlignedRow, ChangedFile, DiffLine, DisplayItem, DisplayItemKind, ExpandedPaths, FileDiff,
    FileStatus, FileTreeNode, Hunk, LineKind, ProjectedLine, RevisionRange, RowCell,
};
pub use parser::{parse_changed_files, parse_file_diff, parse_patch};
pub use project::{project, ViewMode};
pub use search::{search_lines, SearchHit};
pub use state::{DiffViewState, FileListState};
pub use traits::{
    load_changed_files, normalize_query, DiffSource, DiffSourceError, FuzzyMatch, FuzzyRanker,
    SkimRanker,
};
