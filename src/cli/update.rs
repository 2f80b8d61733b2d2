//! Reconcile the manifest against the Thunderstore catalog.
//!
//! This is the main command: one invocation performs one reconciliation
//! run, strictly in sequence:
//!
//! 1. Load and validate manifest.json (fatal if unreadable)
//! 2. Fetch the catalog with retry (fatal if exhausted; nothing written yet)
//! 3. Reconcile declared dependencies against the catalog
//! 4. Notify about dependencies missing upstream (recoverable)
//! 5. Diff the new dependency set against the previous snapshot
//! 6. Derive the pack version bump
//! 7. Persist manifest, snapshot, version marker, and changelog
//!
//! `--dry-run` executes steps 1-6 identically and prints the same decision
//! output, but writes nothing and suppresses the notifier. `--force`
//! bumps the patch version even when no change was detected, so a release
//! can be cut from an unchanged dependency set.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use semver::Version;

use crate::catalog::{CatalogClient, CatalogLookup, FetchOptions};
use crate::changelog;
use crate::constants::{
    CHANGELOG_FILE, DEFAULT_FETCH_RETRIES, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RETRY_DELAY_SECS, MANIFEST_FILE, SNAPSHOT_FILE, VERSION_MARKER_FILE,
};
use crate::core::SyncError;
use crate::diff::{self, DependencyDiff};
use crate::manifest::Manifest;
use crate::notifier::{self, Notifier};
use crate::reconciler::{self, ReconcileOutcome};
use crate::snapshot;
use crate::utils::fs::safe_write;
use crate::utils::progress::Spinner;
use crate::version::next_version;

/// Command to reconcile the manifest against the Thunderstore catalog.
#[derive(Args)]
pub struct UpdateCommand {
    /// Path to the manifest file
    #[arg(long, default_value = MANIFEST_FILE)]
    manifest: PathBuf,

    /// Override the Thunderstore catalog endpoint
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Compute and report everything, but write nothing
    #[arg(long)]
    dry_run: bool,

    /// Bump the pack version even when no change was detected
    #[arg(long)]
    force: bool,

    /// Bump the major version instead of what the diff would suggest
    #[arg(long)]
    force_major: bool,

    /// Skip GitHub issue notification for missing dependencies
    #[arg(long)]
    no_notify: bool,

    /// Number of catalog fetch attempts before aborting
    #[arg(long, default_value_t = DEFAULT_FETCH_RETRIES, value_name = "N")]
    retries: u32,

    /// Fixed delay between fetch attempts, in seconds
    #[arg(long, default_value_t = DEFAULT_RETRY_DELAY_SECS, value_name = "SECS")]
    retry_delay: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS, value_name = "SECS")]
    timeout: u64,
}

impl UpdateCommand {
    /// Execute the reconciliation run.
    ///
    /// # Errors
    ///
    /// Fatal errors (unreadable manifest, unparseable pack version, catalog
    /// retries exhausted, artifact write failures) abort the run; all of
    /// them except write failures occur before any file is touched.
    pub async fn execute(self, quiet: bool) -> Result<()> {
        let project_dir = self
            .manifest
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let snapshot_path = project_dir.join(SNAPSHOT_FILE);
        let marker_path = project_dir.join(VERSION_MARKER_FILE);
        let changelog_path = project_dir.join(CHANGELOG_FILE);

        let mut manifest = Manifest::load(&self.manifest)?;

        // Validate the pack version before going to the network so an
        // unparseable value fails fast. Empty means bootstrap.
        let current_version = parse_pack_version(&manifest.version_number)?;

        let lookup = self.fetch_catalog(quiet).await?;

        let outcome = reconciler::reconcile(&manifest.dependencies, &lookup)?;

        self.notify_missing(&outcome.missing, quiet).await?;

        let previous = snapshot::load(&snapshot_path)?;
        let dependency_diff = diff::diff(&previous, &outcome.dependencies);

        let new_version = next_version(
            current_version.as_ref(),
            !dependency_diff.added.is_empty(),
            !dependency_diff.removed.is_empty(),
            outcome.changed || self.force,
            self.force_major,
        );

        if !quiet {
            print_summary(&outcome, &dependency_diff);
        }

        let Some(new_version) = new_version else {
            if !quiet {
                println!("{} All dependencies are up to date.", "✓".green());
            }
            return Ok(());
        };

        let section = changelog::render(
            &new_version,
            &dependency_diff,
            &outcome.updated,
            &lookup,
            chrono::Local::now().date_naive(),
        );

        if !quiet {
            let old = current_version
                .map_or_else(|| "(none)".to_string(), |v| v.to_string());
            println!("\n{} Bumping pack version {} → {}", "↑".cyan(), old, new_version);
        }

        if self.dry_run {
            if !quiet {
                println!("\n{section}");
                println!("{}", "Dry run - no files were modified.".yellow());
            }
            return Ok(());
        }

        manifest.version_number = new_version.to_string();
        manifest.dependencies = outcome.dependencies.clone();
        manifest.save(&self.manifest)?;

        snapshot::save(&snapshot_path, &outcome.dependencies)?;

        safe_write(&marker_path, &format!("{new_version}\n"))
            .with_context(|| format!("Failed to write version marker: {}", marker_path.display()))?;

        changelog::prepend(&changelog_path, &section)?;

        if !quiet {
            println!("{} Manifest updated.", "✓".green());
        }

        Ok(())
    }

    /// Fetch the catalog behind a spinner.
    async fn fetch_catalog(&self, quiet: bool) -> Result<CatalogLookup> {
        let options = FetchOptions {
            max_retries: self.retries,
            retry_delay: Duration::from_secs(self.retry_delay),
            timeout: Duration::from_secs(self.timeout),
        };
        let client = match &self.api_url {
            Some(url) => CatalogClient::with_url(url, options)?,
            None => CatalogClient::new(options)?,
        };

        let spinner = (!quiet).then(Spinner::new);
        if let Some(ref spinner) = spinner {
            spinner.set_message("Fetching Thunderstore catalog...");
        }

        let result = client.fetch().await;

        // Stop the spinner before anything else prints so output never
        // interleaves with the animation.
        if let Some(spinner) = spinner {
            match &result {
                Ok(lookup) => {
                    spinner.finish_with_message(format!("Loaded {} packages", lookup.len()));
                }
                Err(_) => spinner.finish_and_clear(),
            }
        }

        result
    }

    /// Drive the notifier for dependencies missing upstream.
    ///
    /// Credentials come from `GITHUB_REPOSITORY`/`GITHUB_TOKEN`, read here
    /// at the boundary. Notification failures are logged, never fatal; a
    /// dry run reports what would be notified without calling out.
    async fn notify_missing(&self, missing: &[String], quiet: bool) -> Result<()> {
        if missing.is_empty() || self.no_notify {
            return Ok(());
        }

        if self.dry_run {
            if !quiet {
                for dep in missing {
                    println!("Would create issue for missing dependency: {dep}");
                }
            }
            return Ok(());
        }

        let github = notifier::from_credentials(
            std::env::var("GITHUB_REPOSITORY").ok(),
            std::env::var("GITHUB_TOKEN").ok(),
        )?;

        let Some(github) = github else {
            tracing::warn!("Missing GitHub token or repo. Cannot create issues.");
            return Ok(());
        };

        for dep in missing {
            if let Err(e) = github.notify_missing(dep).await {
                tracing::warn!("failed to create issue for {dep}: {e}");
            }
        }

        Ok(())
    }
}

/// Parse the manifest's version_number, treating empty as "no version yet".
fn parse_pack_version(text: &str) -> Result<Option<Version>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let version = Version::parse(text).map_err(|_| SyncError::InvalidVersionFormat {
        version: text.to_string(),
    })?;
    Ok(Some(version))
}

/// Print the grouped run summary: updates, structural changes, and every
/// recoverable issue encountered along the way.
fn print_summary(outcome: &ReconcileOutcome, dependency_diff: &DependencyDiff) {
    if !outcome.updated.is_empty() {
        println!("\n{}", "Updated mods:".bold());
        for entry in &outcome.updated {
            println!(
                " - {} ({} → {})",
                entry.full_name(),
                entry.old_version,
                entry.new_version
            );
        }
    }

    if !dependency_diff.added.is_empty() {
        println!("\n{}", "Added mods:".bold());
        for full_name in &dependency_diff.added {
            println!(" - {full_name}");
        }
    }

    if !dependency_diff.removed.is_empty() {
        println!("\n{}", "Removed mods:".bold());
        for full_name in &dependency_diff.removed {
            println!(" - {full_name}");
        }
    }

    if !outcome.missing.is_empty() {
        println!("\n{}", "Not found on Thunderstore (kept as declared):".yellow().bold());
        for dep in &outcome.missing {
            println!(" - {dep}");
        }
    }

    if !outcome.malformed.is_empty() {
        println!("\n{}", "Malformed identifiers (left unchanged):".yellow().bold());
        for dep in &outcome.malformed {
            println!(" - {dep}");
        }
    }
}
