//! Snapshot persistence: the diff baseline from the previous run.
//!
//! The snapshot is a plain JSON array of dependency identifier strings,
//! written after every run that produced a change and read back as the
//! baseline for the next run's added/removed diff. A missing file is not
//! an error; it means this is the first run and the baseline is empty, so
//! every current dependency will be classified as added.

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::SyncError;
use crate::utils::fs::safe_write;

/// Load the snapshot, returning an empty baseline if the file is absent.
///
/// # Errors
///
/// Returns [`SyncError::SnapshotParseError`] if the file exists but is not
/// a JSON array of strings, and IO errors with path context.
pub fn load(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read snapshot: {}", path.display()))?;

    let snapshot =
        serde_json::from_str(&content).map_err(|e| SyncError::SnapshotParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

    Ok(snapshot)
}

/// Overwrite the snapshot with the post-reconciliation dependency list.
///
/// The list is persisted as-is, malformed pass-through entries included,
/// so those entries do not flap between added and removed on later runs.
/// The write is atomic.
///
/// # Errors
///
/// Returns an error if serialization or the atomic write fails.
pub fn save(path: &Path, dependencies: &[String]) -> Result<()> {
    let content =
        serde_json::to_string_pretty(dependencies).context("Failed to serialize snapshot")?;

    safe_write(path, &format!("{content}\n"))
        .with_context(|| format!("Failed to write snapshot: {}", path.display()))
}
