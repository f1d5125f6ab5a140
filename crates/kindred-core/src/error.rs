//! Error types for kindred-core.
//!
//! Loading and querying have separate taxonomies: [`ArtifactError`] can
//! only occur during the single startup load, while [`QueryError`] is
//! returned by query operations for the lifetime of the process.

use thiserror::Error;

/// Errors that can occur while loading the similarity artifact.
///
/// A load failure is terminal for the process: the engine stays not-ready
/// and every subsequent query returns [`QueryError::Unavailable`]. There
/// is no automatic retry; a restart is required to attempt another load.
#[derive(Debug, Clone, Error)]
pub enum ArtifactError {
    /// No artifact file exists at the given path
    #[error("artifact not found: {0}")]
    NotFound(String),
    /// Decompression or deserialization of the container failed
    #[error("failed to decode artifact: {0}")]
    Decode(String),
    /// Decoded data violates the artifact invariants
    #[error("artifact schema mismatch: {0}")]
    SchemaMismatch(String),
}

/// Errors returned by engine query operations.
///
/// `Unavailable` and `NotFound` are distinct outcomes and transports must
/// not conflate them: the former means the artifact never loaded, the
/// latter means the catalog is healthy but the exact title is not in it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The artifact failed to load; no queries can be served
    #[error("service unavailable: {0}")]
    Unavailable(String),
    /// The exact, case-sensitive title did not resolve
    #[error("title not found")]
    NotFound,
}
