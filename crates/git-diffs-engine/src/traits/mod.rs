//! Boundaries to the external collaborators.

mod diff_source;
mod fuzzy;

pub use diff_source::{load_changed_files, DiffSource, DiffSourceError};
pub use fuzzy::{normalize_query, FuzzyMatch, FuzzyRanker, SkimRanker};

#[cfg(test)]
pub(crate) use diff_source::tests::FakeSource;
