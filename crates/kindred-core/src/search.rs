//! Case-insensitive substring search over titles.
//!
//! Backs the UI-assist features (dropdown completion, "did you mean").
//! Matches are returned in original record order, not relevance-ranked,
//! so the result set is stable across calls for an unchanged catalog.

use crate::artifact::ItemRecord;

/// Substring search index.
///
/// Lowercased titles are precomputed once at construction so the per-query
/// cost is a single linear scan with no allocation per candidate.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    /// Titles in original record order
    names: Vec<String>,
    /// Lowercased titles, parallel to `names`
    lowered: Vec<String>,
}

impl SearchIndex {
    /// Builds the index from validated records.
    pub fn new(records: &[ItemRecord]) -> Self {
        let names: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
        let lowered = names.iter().map(|name| name.to_lowercase()).collect();
        Self { names, lowered }
    }

    /// Titles containing `query`, case-insensitively, in record order.
    ///
    /// At most `limit` matches are returned. An empty or whitespace-only
    /// query is rejected before the scan and yields no matches rather
    /// than matching the whole catalog.
    pub fn search(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.lowered
            .iter()
            .enumerate()
            .filter(|(_, lowered)| lowered.contains(&needle))
            .take(limit)
            .map(|(row, _)| self.names[row].clone())
            .collect()
    }
}
