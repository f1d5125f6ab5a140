//! Dense similarity matrix storage.
//!
//! The matrix is stored row-major in a single allocation. Scores are
//! taken as-is from the artifact: the engine does not assume symmetry,
//! and diagonal maximality (self-similarity being the row maximum) is an
//! explicit non-invariant. Self-exclusion in [`row_scores`] works by row
//! index, so a corrupt diagonal cannot leak the query item into results.
//!
//! [`row_scores`]: SimilarityStore::row_scores

/// Dense N×N similarity matrix.
#[derive(Debug, Clone)]
pub struct SimilarityStore {
    /// Row-major scores, `scores[i * n + j]` is item i against item j
    scores: Vec<f32>,
    /// Matrix dimension (equal to the catalog size)
    n: usize,
}

impl SimilarityStore {
    /// Wraps a validated row-major score buffer.
    ///
    /// The loader guarantees `scores.len() == n * n`; this is an internal
    /// constructor and does not re-validate.
    pub(crate) fn new(scores: Vec<f32>, n: usize) -> Self {
        debug_assert_eq!(scores.len(), n * n);
        Self { scores, n }
    }

    /// Matrix dimension (number of rows and columns).
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` for the zero-item matrix.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Scores of `row` against every other item, self excluded.
    ///
    /// Returns `(other_row_index, score)` pairs in ascending index order.
    /// The entry for `row` itself is removed before any ranking happens,
    /// so callers never have to filter the query item out of results.
    ///
    /// # Panics
    ///
    /// Panics if `row >= len()`. An out-of-range row is a caller contract
    /// violation, not a recoverable condition: every public query path
    /// resolves rows through the title index first.
    pub fn row_scores(&self, row: usize) -> Vec<(usize, f32)> {
        assert!(
            row < self.n,
            "row {} out of range for {} items",
            row,
            self.n
        );

        let start = row * self.n;
        self.scores[start..start + self.n]
            .iter()
            .copied()
            .enumerate()
            .filter(|&(other, _)| other != row)
            .collect()
    }
}
