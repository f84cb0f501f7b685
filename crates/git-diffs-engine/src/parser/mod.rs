//! Parsers for the text produced by the version-control collaborator.

mod status;
mod unified;

pub use status::{parse_changed_files, parse_name_status, parse_numstat};
pub use unified::{parse_file_diff, parse_hunk_header, parse_patch, HunkRange};
