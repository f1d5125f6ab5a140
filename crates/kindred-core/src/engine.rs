//! Query engine over a loaded artifact snapshot.
//!
//! The engine is constructed exactly once at startup and is the only
//! object transports call per request. All query methods take `&self`:
//! the snapshot and its derived indices are immutable after construction,
//! so concurrent reads from any number of worker threads need no locking.
//! Share the engine behind an `Arc` and call it from wherever requests
//! arrive.
//!
//! A failed load is not an error at construction time. The engine holds
//! the failure and answers every query with [`QueryError::Unavailable`]
//! until the process restarts; readiness is an explicit state, never
//! inferred from data shape.

use crate::artifact::{self, Snapshot};
use crate::error::{ArtifactError, QueryError};
use crate::search::SearchIndex;
use crate::title::TitleIndex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Engine readiness plus catalog size, for health endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// `true` iff the artifact loaded successfully
    pub ready: bool,
    /// Catalog size, 0 when not ready
    pub item_count: usize,
}

/// A page of titles in record order plus the total catalog size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// First `limit` titles in record order
    pub titles: Vec<String>,
    /// Total number of items in the catalog
    pub total: usize,
}

/// Load outcome held by the engine for the process lifetime.
#[derive(Debug)]
enum LoadState {
    Ready {
        snapshot: Snapshot,
        titles: TitleIndex,
        search: SearchIndex,
    },
    Failed(ArtifactError),
}

/// Content-based recommendation engine.
///
/// Answers top-K nearest-neighbor queries from a precomputed similarity
/// matrix, plus substring search and listing for UI assistance. Ordering
/// is deterministic: scores descending, ties broken by ascending row
/// index, independent of sort-algorithm stability.
#[derive(Debug)]
pub struct RecommendEngine {
    state: LoadState,
}

impl RecommendEngine {
    /// Builds an engine by loading the artifact at `path`.
    ///
    /// Never fails: a load error is captured as the engine's permanent
    /// not-ready state and surfaces through [`QueryError::Unavailable`]
    /// on every query.
    pub fn from_path(path: &Path) -> Self {
        Self::from_load(artifact::load(path))
    }

    /// Builds an engine from an explicit load outcome.
    ///
    /// Useful when the caller wants to run the load itself (to log or
    /// inspect the failure) before handing the result over.
    pub fn from_load(outcome: Result<Snapshot, ArtifactError>) -> Self {
        let state = match outcome {
            Ok(snapshot) => {
                let titles = TitleIndex::new(&snapshot.records);
                let search = SearchIndex::new(&snapshot.records);
                LoadState::Ready {
                    snapshot,
                    titles,
                    search,
                }
            }
            Err(err) => LoadState::Failed(err),
        };
        Self { state }
    }

    /// `true` iff the artifact loaded and queries can be served.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready { .. })
    }

    /// Catalog size, 0 when not ready.
    pub fn item_count(&self) -> usize {
        match &self.state {
            LoadState::Ready { snapshot, .. } => snapshot.len(),
            LoadState::Failed(_) => 0,
        }
    }

    /// Readiness and catalog size for health endpoints. Never fails.
    pub fn health(&self) -> Health {
        Health {
            ready: self.is_ready(),
            item_count: self.item_count(),
        }
    }

    /// Top-`k` titles most similar to the exact title `name`.
    ///
    /// Lookup is exact and case-sensitive (intentionally stricter than
    /// [`search`], which is case-insensitive; UIs are expected to supply
    /// dropdown-exact titles). The result holds exactly `min(k, N - 1)`
    /// titles, ranked by score descending with ties broken by ascending
    /// row index, and never contains the query item itself.
    ///
    /// # Errors
    ///
    /// - [`QueryError::Unavailable`] - the artifact never loaded
    /// - [`QueryError::NotFound`] - `name` does not resolve exactly
    ///
    /// [`search`]: RecommendEngine::search
    #[instrument(skip(self))]
    pub fn recommend(&self, name: &str, k: usize) -> Result<Vec<String>, QueryError> {
        let (snapshot, titles) = self.ready()?;
        let row = titles.resolve(name).ok_or(QueryError::NotFound)?;

        let mut scored = snapshot.matrix.row_scores(row);
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(k);

        debug!("recommending {} of {} candidates", scored.len(), snapshot.len() - 1);
        Ok(scored
            .into_iter()
            .map(|(other, _)| titles.name_at(other).to_string())
            .collect())
    }

    /// Titles containing `query` case-insensitively, in record order.
    ///
    /// At most `limit` results; a blank query yields an empty result.
    ///
    /// # Errors
    ///
    /// [`QueryError::Unavailable`] when the artifact never loaded.
    #[instrument(skip(self))]
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, QueryError> {
        let search = match &self.state {
            LoadState::Ready { search, .. } => search,
            LoadState::Failed(err) => return Err(QueryError::Unavailable(err.to_string())),
        };
        Ok(search.search(query, limit))
    }

    /// First `limit` titles in record order plus the total count.
    ///
    /// # Errors
    ///
    /// [`QueryError::Unavailable`] when the artifact never loaded.
    pub fn list_items(&self, limit: usize) -> Result<Listing, QueryError> {
        let (snapshot, titles) = self.ready()?;
        let page = (0..snapshot.len().min(limit))
            .map(|row| titles.name_at(row).to_string())
            .collect();
        Ok(Listing {
            titles: page,
            total: snapshot.len(),
        })
    }

    /// Snapshot and title index, or the load failure as `Unavailable`.
    fn ready(&self) -> Result<(&Snapshot, &TitleIndex), QueryError> {
        match &self.state {
            LoadState::Ready {
                snapshot, titles, ..
            } => Ok((snapshot, titles)),
            LoadState::Failed(err) => Err(QueryError::Unavailable(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{ItemRecord, Snapshot};
    use crate::similarity::SimilarityStore;
    use serde_json::Value;

    /// Ready engine over an in-memory catalog with the given row-major
    /// similarity scores.
    fn engine(names: &[&str], scores: Vec<f32>) -> RecommendEngine {
        let records = names
            .iter()
            .enumerate()
            .map(|(row_index, name)| ItemRecord {
                name: name.to_string(),
                row_index,
            })
            .collect();
        let snapshot = Snapshot {
            vectorizer: Value::Null,
            records,
            matrix: SimilarityStore::new(scores, names.len()),
        };
        RecommendEngine::from_load(Ok(snapshot))
    }

    fn failed_engine() -> RecommendEngine {
        RecommendEngine::from_load(Err(ArtifactError::SchemaMismatch(
            "similarity matrix has 2 rows for 3 records".to_string(),
        )))
    }

    #[test]
    fn test_recommend_orders_by_score_descending() {
        let eng = engine(
            &["A", "B", "C"],
            vec![
                1.0, 0.9, 0.2, //
                0.9, 1.0, 0.4, //
                0.2, 0.4, 1.0,
            ],
        );
        assert_eq!(eng.recommend("A", 2).unwrap(), vec!["B", "C"]);
    }

    #[test]
    fn test_recommend_breaks_ties_by_row_index() {
        let eng = engine(
            &["A", "B", "C"],
            vec![
                1.0, 0.5, 0.5, //
                0.5, 1.0, 0.5, //
                0.5, 0.5, 1.0,
            ],
        );
        // B and C score equally against A; B has the lower row index
        assert_eq!(eng.recommend("A", 2).unwrap(), vec!["B", "C"]);
    }

    #[test]
    fn test_recommend_never_returns_query_item() {
        let eng = engine(
            &["A", "B", "C"],
            vec![
                1.0, 0.9, 0.2, //
                0.9, 1.0, 0.4, //
                0.2, 0.4, 1.0,
            ],
        );
        for name in ["A", "B", "C"] {
            let recs = eng.recommend(name, 5).unwrap();
            assert!(!recs.contains(&name.to_string()));
        }
    }

    #[test]
    fn test_recommend_caps_k_at_catalog_size() {
        let eng = engine(&["A", "B"], vec![1.0, 0.3, 0.3, 1.0]);
        assert_eq!(eng.recommend("A", 10).unwrap(), vec!["B"]);
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let eng = engine(
            &["A", "B", "C", "D"],
            vec![
                1.0, 0.5, 0.5, 0.5, //
                0.5, 1.0, 0.5, 0.5, //
                0.5, 0.5, 1.0, 0.5, //
                0.5, 0.5, 0.5, 1.0,
            ],
        );
        let first = eng.recommend("A", 3).unwrap();
        let second = eng.recommend("A", 3).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec!["B", "C", "D"]);
    }

    #[test]
    fn test_recommend_is_case_sensitive() {
        let eng = engine(&["Dark Knight", "Batman"], vec![1.0, 0.8, 0.8, 1.0]);
        assert!(eng.recommend("Dark Knight", 1).is_ok());
        assert_eq!(eng.recommend("dark knight", 1), Err(QueryError::NotFound));
    }

    #[test]
    fn test_recommend_unknown_title() {
        let eng = engine(&["A"], vec![1.0]);
        assert_eq!(eng.recommend("Nonexistent", 5), Err(QueryError::NotFound));
    }

    #[test]
    fn test_recommend_with_nan_scores_is_deterministic() {
        // A corrupt artifact can carry NaN; ordering must stay total and
        // reproducible rather than depending on partial comparisons.
        let eng = engine(
            &["A", "B", "C"],
            vec![
                1.0,
                f32::NAN,
                0.4,
                0.0,
                1.0,
                0.0,
                0.0,
                0.0,
                1.0,
            ],
        );
        let first = eng.recommend("A", 2).unwrap();
        let second = eng.recommend("A", 2).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_failed_load_reports_unavailable() {
        let eng = failed_engine();
        assert!(matches!(
            eng.recommend("anything", 5),
            Err(QueryError::Unavailable(_))
        ));
        assert!(matches!(
            eng.search("anything", 10),
            Err(QueryError::Unavailable(_))
        ));
        assert!(matches!(
            eng.list_items(10),
            Err(QueryError::Unavailable(_))
        ));
    }

    #[test]
    fn test_failed_load_health() {
        let eng = failed_engine();
        assert_eq!(
            eng.health(),
            Health {
                ready: false,
                item_count: 0
            }
        );
    }

    #[test]
    fn test_ready_health() {
        let eng = engine(&["A", "B"], vec![1.0, 0.3, 0.3, 1.0]);
        assert_eq!(
            eng.health(),
            Health {
                ready: true,
                item_count: 2
            }
        );
    }

    #[test]
    fn test_list_items_pages_in_record_order() {
        let eng = engine(
            &["A", "B", "C"],
            vec![
                1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, //
                0.0, 0.0, 1.0,
            ],
        );
        let listing = eng.list_items(2).unwrap();
        assert_eq!(listing.titles, vec!["A", "B"]);
        assert_eq!(listing.total, 3);

        let all = eng.list_items(50).unwrap();
        assert_eq!(all.titles.len(), 3);
    }

    #[test]
    fn test_search_through_engine() {
        let eng = engine(&["The Dark Knight", "Dark City"], vec![1.0, 0.7, 0.7, 1.0]);
        assert_eq!(
            eng.search("dark", 10).unwrap(),
            vec!["The Dark Knight", "Dark City"]
        );
        assert!(eng.search("  ", 10).unwrap().is_empty());
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RecommendEngine>();
    }
}
