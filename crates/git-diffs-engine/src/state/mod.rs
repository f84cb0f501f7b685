//! Navigation state for the file list and the diff pane.

mod diff_view;
mod file_list;

pub use diff_view::DiffViewState;
pub use file_list::FileListState;
