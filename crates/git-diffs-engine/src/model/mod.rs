//! Data models for the diff engine.

mod changed_file;
mod diff;
mod display;
mod file_tree;
mod rows;

pub use changed_file::{ChangedFile, FileStatus, RevisionRange};
pub use diff::{DiffLine, FileDiff, Hunk, LineKind};
pub use display::{DisplayItem, DisplayItemKind};
pub use file_tree::{ExpandedPaths, FileTreeNode};
pub use rows::{AlignedRow, ProjectedLine, RowCell};
