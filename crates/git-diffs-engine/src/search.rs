//! Content search over projected diff lines.

use crate::model::ProjectedLine;
use crate::traits::FuzzyRanker;
use serde::{Deserialize, Serialize};

/// A projected line matching a content query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Index into the projected lines that were searched.
    pub line_index: usize,
    /// Aligned row the line came from; the scroll target when the hit is chosen.
    pub source_row: usize,
    pub score: i64,
    /// Matched character positions within the line content.
    pub positions: Vec<usize>,
}

/// Rank `lines` by how well their content matches `query`.
///
/// An empty query lists every line in order. The query is used as given;
/// pass it through [`normalize_query`](crate::traits::normalize_query) first
/// to apply the configured space handling.
pub fn search_lines<R: FuzzyRanker + ?Sized>(
    lines: &[ProjectedLine],
    query: &str,
    ranker: &R,
) -> Vec<SearchHit> {
    if query.is_empty() {
        return lines
            .iter()
            .enumerate()
            .map(|(line_index, line)| SearchHit {
                line_index,
                source_row: line.source_row,
                score: 0,
                positions: Vec::new(),
            })
            .collect();
    }

    let contents: Vec<&str> = lines.iter().map(|l| l.content.as_str()).collect();
    ranker
        .rank(query, &contents)
        .into_iter()
        .filter_map(|m| {
            lines.get(m.index).map(|line| SearchHit {
                line_index: m.index,
                source_row: line.source_row,
                score: m.score,
                positions: m.positions,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;
    use crate::parser::parse_file_diff;
    use crate::project::{project, ViewMode};
    use crate::traits::SkimRanker;
    use pretty_assertions::assert_eq;

    const TEXT: &str = "@@ -1,3 +1,3 @@\n fn main() {\n-    old_call();\n+    new_call();\n }\n";

    #[test]
    fn test_hit_resolves_to_source_row() {
        let rows = align(&parse_file_diff(TEXT).hunks);
        let lines = project(&rows, ViewMode::Both);
        let hits = search_lines(&lines, "new_call", &SkimRanker::new());

        assert_eq!(hits.len(), 1);
        assert_eq!(lines[hits[0].line_index].content, "    new_call();");
        // Paired with the deletion on the same aligned row
        assert_eq!(hits[0].source_row, 2);
    }

    #[test]
    fn test_empty_query_lists_everything() {
        let rows = align(&parse_file_diff(TEXT).hunks);
        let lines = project(&rows, ViewMode::Old);
        let hits = search_lines(&lines, "", &SkimRanker::new());

        assert_eq!(hits.len(), lines.len());
        let rows_of_hits: Vec<usize> = hits.iter().map(|h| h.source_row).collect();
        assert_eq!(rows_of_hits, vec![0, 1, 2, 3]);
    }
}
