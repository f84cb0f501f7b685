//! Fuzzy ranking used to filter files and search diff content.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

/// A candidate that matched a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    /// Index into the candidate list.
    pub index: usize,
    pub score: i64,
    /// Character positions in the candidate that matched the query.
    pub positions: Vec<usize>,
}

/// Ranks candidates against a query.
///
/// Implementations return only matching candidates, best first.
pub trait FuzzyRanker {
    fn rank(&self, query: &str, candidates: &[&str]) -> Vec<FuzzyMatch>;
}

/// Default ranker backed by the skim algorithm.
#[derive(Default)]
pub struct SkimRanker {
    matcher: SkimMatcherV2,
}

impl SkimRanker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for SkimRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkimRanker").finish_non_exhaustive()
    }
}

impl FuzzyRanker for SkimRanker {
    fn rank(&self, query: &str, candidates: &[&str]) -> Vec<FuzzyMatch> {
        let mut matches: Vec<FuzzyMatch> = candidates
            .iter()
            .enumerate()
            .filter_map(|(index, candidate)| {
                self.matcher
                    .fuzzy_indices(candidate, query)
                    .map(|(score, positions)| FuzzyMatch {
                        index,
                        score,
                        positions,
                    })
            })
            .collect();

        // Stable: equal scores keep candidate order
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches
    }
}

/// Normalize a typed query; optionally drops spaces so "src main" matches "src/main.rs".
pub fn normalize_query(query: &str, strip_spaces: bool) -> String {
    if strip_spaces {
        query.chars().filter(|c| !c.is_whitespace()).collect()
    } else {
        query.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_filters_and_orders() {
        let ranker = SkimRanker::new();
        let candidates = ["src/main.rs", "README.md", "src/ui/menu.rs"];
        let matches = ranker.rank("main", &candidates);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].index, 0);
        assert_eq!(matches[0].positions, vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_rank_prefers_tighter_match() {
        let ranker = SkimRanker::new();
        let candidates = ["m_a_i_n.rs", "main.rs"];
        let matches = ranker.rank("main", &candidates);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].index, 1);
    }

    #[test]
    fn test_no_match() {
        let ranker = SkimRanker::new();
        assert!(ranker.rank("zzz", &["abc"]).is_empty());
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query(" src main ", true), "srcmain");
        assert_eq!(normalize_query(" src main ", false), "src main");
    }
}
