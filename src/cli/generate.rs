//! Generate thunderstore.toml from the manifest.
//!
//! The Thunderstore publishing CLI consumes a TOML configuration whose
//! dependency table pins each `namespace-name` to a constraint. This
//! command is a pure data transform of the manifest: no catalog access,
//! no decision logic. Every dependency is pinned to `"*"` (always latest
//! compatible); malformed identifiers are skipped with a warning, exactly
//! as reconciliation would pass them through.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::constants::{MANIFEST_FILE, THUNDERSTORE_TOML_FILE};
use crate::identifier::ModIdentifier;
use crate::manifest::Manifest;
use crate::utils::fs::safe_write;

/// Command to emit thunderstore.toml from the manifest.
#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the manifest file
    #[arg(long, default_value = MANIFEST_FILE)]
    manifest: PathBuf,

    /// Where to write the generated configuration
    #[arg(long, default_value = THUNDERSTORE_TOML_FILE)]
    output: PathBuf,
}

/// Serialized shape of thunderstore.toml.
#[derive(Debug, Serialize)]
struct ThunderstoreConfig {
    name: String,
    description: String,
    version: String,
    website_url: String,
    contains_nsfw_content: bool,
    package_type: String,
    communities: Vec<String>,
    categories: Vec<String>,
    /// `namespace-name` -> version constraint; BTreeMap keeps the table sorted
    dependencies: BTreeMap<String, String>,
}

impl GenerateCommand {
    /// Execute the generation.
    ///
    /// # Errors
    ///
    /// Fatal if the manifest is unreadable or the output cannot be written.
    pub fn execute(self, quiet: bool) -> Result<()> {
        let manifest = Manifest::load(&self.manifest)?;

        let mut dependencies = BTreeMap::new();
        for dep in &manifest.dependencies {
            match dep.parse::<ModIdentifier>() {
                Ok(id) => {
                    // Always latest compatible; the manifest pins exact
                    // versions, the publishing config does not.
                    dependencies.insert(id.full_name(), "*".to_string());
                }
                Err(_) => {
                    tracing::warn!("skipping malformed dependency: {dep}");
                }
            }
        }

        let config = ThunderstoreConfig {
            name: or_default(&manifest.name, "UnknownModpack"),
            description: or_default(&manifest.description, "No description provided."),
            version: or_default(&manifest.version_number, "1.0.0"),
            website_url: or_default(&manifest.website_url, "https://example.com"),
            contains_nsfw_content: false,
            package_type: "modpack".to_string(),
            communities: vec!["repo".to_string()],
            categories: vec!["modpacks".to_string()],
            dependencies,
        };

        let content = toml::to_string_pretty(&config)
            .context("Failed to serialize thunderstore.toml")?;
        safe_write(&self.output, &content)
            .with_context(|| format!("Failed to write: {}", self.output.display()))?;

        if !quiet {
            println!("{} Wrote {}", "✓".green(), self.output.display());
        }

        Ok(())
    }
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}
