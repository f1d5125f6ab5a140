//! Artifact decoding, validation, and the in-memory snapshot.
//!
//! The artifact is a single zstd-compressed JSON container produced by an
//! offline pipeline. It holds three named fields:
//!
//! - `vectorizer` - opaque feature-extraction state, preserved but unused
//!   at query time
//! - `records` - one object per item, each with at least a `title`
//! - `similarity` - a square matrix where `similarity[i][j]` is the score
//!   of item `i` against item `j`
//!
//! Loading validates the structural invariants (square matrix, dimension
//! equal to the record count, every record titled) and produces an
//! immutable [`Snapshot`]. The loader never panics: every failure mode
//! maps to one [`ArtifactError`] kind.

use crate::error::ArtifactError;
use crate::similarity::SimilarityStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Cursor;
use std::path::Path;
use tracing::{info, warn};

/// On-disk artifact schema, as written by the offline pipeline.
///
/// Record objects may carry extra fields (genres, release year, ...);
/// they are ignored on load. Only the title participates in queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawArtifact {
    /// Opaque feature-extraction state. Carried through for potential
    /// future re-ranking, never interpreted by the engine.
    pub vectorizer: Value,
    /// One record per item, in matrix row order.
    pub records: Vec<RawRecord>,
    /// Square similarity matrix, one row per record.
    pub similarity: Vec<Vec<f32>>,
}

/// A single item record as it appears in the container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// Item title. `null` or missing is a schema violation.
    #[serde(default)]
    pub title: Option<String>,
}

/// A validated item record.
///
/// `row_index` is the record's position in the original record sequence
/// and the corresponding row/column in the similarity matrix. Indices are
/// assigned by position during validation, so they are always the
/// contiguous range `[0, N)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    /// Item title as written by the pipeline (case preserved)
    pub name: String,
    /// Row position in the similarity matrix
    pub row_index: usize,
}

/// Immutable in-memory form of a successfully loaded artifact.
///
/// Constructed exactly once at startup and shared read-only for the
/// lifetime of the process. All query-side structures (title index,
/// search index) are derived from it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Opaque feature-extraction state, passed through from the container
    pub vectorizer: Value,
    /// Validated records in matrix row order
    pub records: Vec<ItemRecord>,
    /// Dense similarity matrix
    pub matrix: SimilarityStore,
}

impl Snapshot {
    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the catalog holds no items.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Loads and validates the artifact at `path`.
///
/// Reads the file, decompresses the zstd container, deserializes the JSON
/// payload, and checks the structural invariants. On success the returned
/// [`Snapshot`] is complete and self-consistent; on failure the caller
/// holds no partial data.
///
/// # Errors
///
/// - [`ArtifactError::NotFound`] - no file at `path`
/// - [`ArtifactError::Decode`] - unreadable file, invalid zstd frame, or
///   malformed JSON
/// - [`ArtifactError::SchemaMismatch`] - well-formed JSON that violates
///   the artifact invariants (ragged or mis-sized matrix, untitled record)
pub fn load(path: &Path) -> Result<Snapshot, ArtifactError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!("artifact not found at {}", path.display());
            return Err(ArtifactError::NotFound(path.display().to_string()));
        }
        Err(err) => {
            warn!("failed to read artifact at {}: {}", path.display(), err);
            return Err(ArtifactError::Decode(format!(
                "reading {}: {}",
                path.display(),
                err
            )));
        }
    };

    match parse(&bytes) {
        Ok(snapshot) => {
            info!(
                "loaded artifact from {} ({} records)",
                path.display(),
                snapshot.len()
            );
            Ok(snapshot)
        }
        Err(err) => {
            warn!("rejected artifact at {}: {}", path.display(), err);
            Err(err)
        }
    }
}

/// Decodes and validates a raw container already read into memory.
pub(crate) fn parse(bytes: &[u8]) -> Result<Snapshot, ArtifactError> {
    let payload = zstd::decode_all(Cursor::new(bytes))
        .map_err(|err| ArtifactError::Decode(format!("zstd: {}", err)))?;

    let raw: RawArtifact = serde_json::from_slice(&payload)
        .map_err(|err| ArtifactError::Decode(format!("json: {}", err)))?;

    validate(raw)
}

/// Checks the artifact invariants and builds the snapshot.
///
/// Row indices are assigned by record position, so contiguity holds by
/// construction. Titles must be present; the matrix must be square with
/// dimension equal to the record count.
fn validate(raw: RawArtifact) -> Result<Snapshot, ArtifactError> {
    let n = raw.records.len();

    if raw.similarity.len() != n {
        return Err(ArtifactError::SchemaMismatch(format!(
            "similarity matrix has {} rows for {} records",
            raw.similarity.len(),
            n
        )));
    }

    let mut scores = Vec::with_capacity(n * n);
    for (i, row) in raw.similarity.iter().enumerate() {
        if row.len() != n {
            return Err(ArtifactError::SchemaMismatch(format!(
                "similarity row {} has {} columns, expected {}",
                i,
                row.len(),
                n
            )));
        }
        scores.extend_from_slice(row);
    }

    let mut records = Vec::with_capacity(n);
    for (row_index, record) in raw.records.into_iter().enumerate() {
        let name = record.title.ok_or_else(|| {
            ArtifactError::SchemaMismatch(format!("record {} has no title", row_index))
        })?;
        records.push(ItemRecord { name, row_index });
    }

    Ok(Snapshot {
        vectorizer: raw.vectorizer,
        records,
        matrix: SimilarityStore::new(scores, n),
    })
}
