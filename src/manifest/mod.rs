//! manifest.json parsing, validation, and persistence.
//!
//! The manifest is the user-owned declaration of the modpack: its name,
//! current version, description, website, and the dependency list as
//! `namespace-name-version` identifier strings. modsync owns the file for
//! the duration of one run: it is read once at the start and written at
//! most once at the end.
//!
//! Parsing is strict about structure and permissive about content: a file
//! that is not a JSON object with the expected field types is fatal
//! ([`SyncError::InvalidManifestFormat`]), but fields modsync does not own
//! (icon, author, anything Thunderstore adds later) are preserved verbatim
//! through a flatten map. Writes deduplicate and lexicographically sort
//! the dependency list and go through the atomic writer.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::SyncError;
use crate::identifier::ModIdentifier;
use crate::utils::fs::safe_write;

/// The modpack manifest, as stored in manifest.json.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Pack name shown on Thunderstore
    #[serde(default)]
    pub name: String,

    /// Current pack version as a semantic version string.
    ///
    /// Kept as a string in the model; the version policy parses it when a
    /// bump is computed so an unparseable value fails loudly instead of
    /// miscomparing.
    #[serde(default)]
    pub version_number: String,

    /// Pack description shown on Thunderstore
    #[serde(default)]
    pub description: String,

    /// Pack homepage
    #[serde(default)]
    pub website_url: String,

    /// Declared dependencies as `namespace-name-version` strings
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Fields modsync does not own, preserved verbatim across writes
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Manifest {
    /// Load the manifest from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidManifestFormat`] when the file is not
    /// valid JSON or its fields have the wrong shape; missing file and IO
    /// failures surface with path context. All of these are fatal for the
    /// run and occur before any mutation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read manifest: {}", path.display()))?;

        let manifest: Self =
            serde_json::from_str(&content).map_err(|e| SyncError::InvalidManifestFormat {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(manifest)
    }

    /// Write the manifest back to disk.
    ///
    /// The dependency list is normalized before serialization so repeated
    /// runs produce byte-identical files: well-formed identifiers are
    /// deduplicated by `namespace-name` identity keeping the highest
    /// declared version, entries the codec rejects are kept verbatim and
    /// deduplicated by full text, and the result is sorted
    /// lexicographically. The write itself is atomic.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the atomic write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut normalized = self.clone();
        normalized.dependencies = normalize_dependencies(&self.dependencies);

        let content = serde_json::to_string_pretty(&normalized)
            .context("Failed to serialize manifest")?;

        safe_write(path, &format!("{content}\n"))
            .with_context(|| format!("Failed to write manifest: {}", path.display()))
    }
}

/// Collapse the declared list to one entry per `namespace-name` identity.
///
/// When the same mod is declared at several versions (easily produced by
/// an import next to an existing pin) the highest version survives.
/// Entries the codec rejects never collide with well-formed ones and pass
/// through untouched, so normalization can never drop something the tool
/// does not understand.
fn normalize_dependencies(dependencies: &[String]) -> Vec<String> {
    let mut best: BTreeMap<String, ModIdentifier> = BTreeMap::new();
    let mut rest: Vec<String> = Vec::new();

    for dep in dependencies {
        match dep.parse::<ModIdentifier>() {
            Ok(id) => match best.entry(id.full_name()) {
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
                Entry::Occupied(mut slot) => {
                    if id.version > slot.get().version {
                        slot.insert(id);
                    }
                }
            },
            Err(_) => rest.push(dep.clone()),
        }
    }

    let mut normalized: Vec<String> = best.into_values().map(|id| id.to_string()).collect();
    normalized.append(&mut rest);
    normalized.sort();
    normalized.dedup();
    normalized
}
