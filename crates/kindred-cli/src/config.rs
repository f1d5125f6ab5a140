//! Artifact path resolution for the CLI.
//!
//! The artifact can live in different places depending on how the binary
//! is run:
//! - Explicit: `--artifact` flag
//! - Environment: `KINDRED_ARTIFACT`
//! - Installed: platform data directory
//! - Development: workspace `data/` directory

use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Artifact file name used by the installed and development layouts.
const ARTIFACT_FILENAME: &str = "kindred.artifact.zst";

/// Environment variable overriding the artifact location.
const ARTIFACT_ENV: &str = "KINDRED_ARTIFACT";

/// Resolves the artifact path.
///
/// Search order:
/// 1. `custom` (the `--artifact` flag), taken verbatim
/// 2. `$KINDRED_ARTIFACT`, taken verbatim
/// 3. Platform data directory (e.g. `~/.local/share/kindred/` on Linux)
/// 4. Workspace `data/` directory (development checkout)
///
/// Flag and environment paths are returned without an existence check so
/// that a missing file surfaces through the engine's not-ready state
/// rather than being second-guessed here. The fallback locations are only
/// used when the file actually exists there.
pub fn artifact_path(custom: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(path) = custom {
        return Ok(path.clone());
    }

    if let Ok(path) = std::env::var(ARTIFACT_ENV) {
        return Ok(PathBuf::from(path));
    }

    if let Some(dirs) = ProjectDirs::from("dev", "kindred", "Kindred") {
        let installed = dirs.data_dir().join(ARTIFACT_FILENAME);
        if installed.exists() {
            return Ok(installed);
        }
    }

    // CARGO_MANIFEST_DIR points at crates/kindred-cli
    let workspace = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.join("data").join(ARTIFACT_FILENAME));
    if let Some(path) = workspace {
        if path.exists() {
            return Ok(path);
        }
    }

    Err(anyhow!(
        "No artifact found. Pass --artifact <path>, set ${}, or place {} in the data directory.",
        ARTIFACT_ENV,
        ARTIFACT_FILENAME
    ))
}
