//! Seed manifest dependencies from external lists.
//!
//! Two sources are supported, matching how modpack maintainers usually
//! start out:
//!
//! - `import urls` - a plain text file of Thunderstore package page URLs
//!   (`https://thunderstore.io/c/repo/p/<namespace>/<name>/`), one per
//!   line. Each becomes a `namespace-name-0.0.0` entry; the next `update`
//!   run bumps it to the real latest version.
//! - `import mods` - an r2modman/Thunderstore mod manager profile export
//!   (YAML). Enabled entries carry their `namespace-name` and a structured
//!   version, imported as-is.
//!
//! Imported entries merge into the manifest through its normal write path,
//! so the result is deduplicated and sorted like any other manifest write.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::Deserialize;

use crate::constants::MANIFEST_FILE;
use crate::manifest::Manifest;

/// Command to seed manifest dependencies from an external list.
#[derive(Args)]
pub struct ImportCommand {
    #[command(subcommand)]
    source: ImportSource,

    /// Path to the manifest file to merge into
    #[arg(long, global = true, default_value = MANIFEST_FILE)]
    manifest: PathBuf,
}

/// Where the dependency list comes from.
#[derive(Subcommand)]
enum ImportSource {
    /// A text file of Thunderstore package URLs, one per line
    Urls {
        /// File containing the URL list
        file: PathBuf,
    },
    /// An r2modman profile export (YAML)
    Mods {
        /// The exported mods file
        file: PathBuf,
    },
}

/// One entry of an r2modman profile export.
#[derive(Debug, Deserialize)]
struct ModExportEntry {
    /// Already in `namespace-name` form
    name: String,
    #[serde(default)]
    enabled: bool,
    #[serde(rename = "versionNumber", default)]
    version_number: ExportVersion,
}

#[derive(Debug, Default, Deserialize)]
struct ExportVersion {
    #[serde(default)]
    major: u64,
    #[serde(default)]
    minor: u64,
    #[serde(default)]
    patch: u64,
}

impl ImportCommand {
    /// Execute the import.
    ///
    /// # Errors
    ///
    /// Fatal if the source file or manifest cannot be read, or if the
    /// manifest cannot be written back. Individual unparseable lines or
    /// entries are skipped with a warning.
    pub fn execute(self, quiet: bool) -> Result<()> {
        let imported = match &self.source {
            ImportSource::Urls { file } => {
                let content = std::fs::read_to_string(file)
                    .with_context(|| format!("Cannot read URL list: {}", file.display()))?;
                dependencies_from_urls(&content)
            }
            ImportSource::Mods { file } => {
                let content = std::fs::read_to_string(file)
                    .with_context(|| format!("Cannot read mods export: {}", file.display()))?;
                dependencies_from_mods_export(&content)?
            }
        };

        let mut manifest = Manifest::load(&self.manifest)?;
        let count = imported.len();
        manifest.dependencies.extend(imported);
        // save dedupes and sorts
        manifest.save(&self.manifest)?;

        if !quiet {
            println!(
                "{} Imported {count} dependencies into {}",
                "✓".green(),
                self.manifest.display()
            );
        }

        Ok(())
    }
}

/// Extract `namespace-name-0.0.0` entries from package page URLs.
///
/// The namespace and name are the last two path segments. Lines that do
/// not have both are skipped with a warning.
fn dependencies_from_urls(content: &str) -> Vec<String> {
    let mut dependencies = Vec::new();

    for line in content.lines() {
        let url = line.trim();
        if url.is_empty() {
            continue;
        }

        let mut segments = url.trim_end_matches('/').rsplit('/');
        match (segments.next(), segments.next()) {
            (Some(name), Some(namespace)) if !name.is_empty() && !namespace.is_empty() => {
                dependencies.push(format!("{namespace}-{name}-0.0.0"));
            }
            _ => tracing::warn!("skipping malformed URL: {url}"),
        }
    }

    dependencies
}

/// Extract identifier strings from an r2modman profile export.
///
/// Only enabled entries are imported.
///
/// # Errors
///
/// Fatal if the document is not a YAML sequence of mod entries.
fn dependencies_from_mods_export(content: &str) -> Result<Vec<String>> {
    let entries: Vec<ModExportEntry> =
        serde_yaml::from_str(content).context("Mods export is not a valid YAML mod list")?;

    Ok(entries
        .into_iter()
        .filter(|entry| entry.enabled)
        .map(|entry| {
            let v = entry.version_number;
            format!("{}-{}.{}.{}", entry.name, v.major, v.minor, v.patch)
        })
        .collect())
}
