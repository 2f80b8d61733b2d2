//! Thunderstore catalog fetching and lookup building.
//!
//! The Thunderstore v1 package endpoint returns the entire community
//! catalog as one JSON array. Each package record carries a
//! `full_name` (`namespace-name`), a canonical `package_url`, and a
//! `versions` list ordered newest-first. This module fetches that payload
//! with a fixed-interval retry policy and reduces it to a
//! [`CatalogLookup`]: a map from version-independent identity to the
//! latest version string and display URL. Version strings are kept raw
//! here; the reconciler parses them at comparison time, so a garbage
//! version in the catalog only matters when a declared dependency
//! actually points at it.
//!
//! The catalog is rebuilt on every run and never persisted; a stale
//! catalog would silently undo upgrades, so fetch exhaustion is fatal
//! ([`SyncError::CatalogUnavailable`]) and the run aborts before any
//! artifact is written.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, warn};

use crate::constants::{
    DEFAULT_CATALOG_URL, DEFAULT_FETCH_RETRIES, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RETRY_DELAY_SECS,
};
use crate::core::SyncError;

/// One resolved catalog entry: the latest published version of a package
/// and its canonical page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Latest published version string, verbatim from the catalog (first
    /// entry of the package's version list). Parsed by the reconciler
    /// when a declared dependency is compared against it.
    pub latest_version: String,
    /// Canonical package page, used for changelog links
    pub url: String,
}

/// Lookup from `namespace-name` identity to [`CatalogEntry`].
pub type CatalogLookup = HashMap<String, CatalogEntry>;

/// Wire format of one version record in the catalog payload.
#[derive(Debug, Deserialize)]
struct PackageVersion {
    version_number: String,
}

/// Wire format of one package record in the catalog payload.
///
/// Fields the reconciler does not consume are left undeclared; serde
/// ignores them.
#[derive(Debug, Deserialize)]
struct Package {
    full_name: String,
    package_url: String,
    versions: Vec<PackageVersion>,
}

/// Fetch behavior knobs, populated from CLI flags.
///
/// The retry policy is a capped linear one: the same `retry_delay` between
/// every attempt, `max_retries` attempts total. The catalog endpoint is a
/// single large GET; transient failures either clear quickly or the run
/// should abort.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Total number of attempts before aborting the run
    pub max_retries: u32,
    /// Fixed delay between attempts
    pub retry_delay: Duration,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_FETCH_RETRIES,
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// HTTP client for the Thunderstore catalog.
pub struct CatalogClient {
    client: reqwest::Client,
    url: String,
    options: FetchOptions,
}

impl CatalogClient {
    /// Create a client against the default REPO community endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(options: FetchOptions) -> Result<Self> {
        Self::with_url(DEFAULT_CATALOG_URL, options)
    }

    /// Create a client against a custom catalog endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_url(url: impl Into<String>, options: FetchOptions) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(options.timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            options,
        })
    }

    /// Fetch the full catalog and build the identity lookup.
    ///
    /// Performs one GET per attempt. Any transport-level failure (timeout,
    /// connection error, non-2xx status, undecodable body) is retryable;
    /// attempts are spaced by the fixed `retry_delay`. When all
    /// `max_retries` attempts fail, returns [`SyncError::CatalogUnavailable`]
    /// carrying the last failure, and the caller must abort the run.
    ///
    /// When a package advertises multiple versions, only the first is
    /// retained; the catalog lists each package's versions newest-first.
    pub async fn fetch(&self) -> Result<CatalogLookup> {
        let attempts = self.options.max_retries.max(1);
        // FixedInterval is unbounded; take(n) allows n retries after the
        // first attempt.
        let strategy =
            FixedInterval::new(self.options.retry_delay).take(attempts as usize - 1);

        let packages = Retry::spawn(strategy, || async {
            self.fetch_once().await.inspect_err(|e| {
                warn!("catalog fetch attempt failed: {e}");
            })
        })
        .await
        .map_err(|e| SyncError::CatalogUnavailable {
            attempts,
            reason: e.to_string(),
        })?;

        Ok(build_lookup(packages))
    }

    async fn fetch_once(&self) -> Result<Vec<Package>, reqwest::Error> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        response.json().await
    }
}

/// Reduce the raw package list to the identity lookup.
fn build_lookup(packages: Vec<Package>) -> CatalogLookup {
    let mut lookup = CatalogLookup::with_capacity(packages.len());

    for package in packages {
        let Some(latest) = package.versions.first() else {
            debug!("skipping catalog entry with no versions: {}", package.full_name);
            continue;
        };

        let latest_version = latest.version_number.clone();

        // First occurrence wins if the catalog ever repeats a full_name.
        lookup.entry(package.full_name).or_insert(CatalogEntry {
            latest_version,
            url: package.package_url,
        });
    }

    lookup
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(full_name: &str, versions: &[&str]) -> Package {
        Package {
            full_name: full_name.to_string(),
            package_url: format!("https://thunderstore.io/c/repo/p/{full_name}/"),
            versions: versions
                .iter()
                .map(|v| PackageVersion {
                    version_number: (*v).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_build_lookup_takes_first_version() {
        let lookup = build_lookup(vec![package("alice-modA", &["1.2.0", "1.1.0", "1.0.0"])]);
        assert_eq!(lookup["alice-modA"].latest_version, "1.2.0");
    }

    #[test]
    fn test_build_lookup_skips_versionless_packages() {
        let lookup = build_lookup(vec![package("empty-pkg", &[]), package("ok-pkg", &["2.0.0"])]);
        assert!(!lookup.contains_key("empty-pkg"));
        assert!(lookup.contains_key("ok-pkg"));
    }

    #[test]
    fn test_build_lookup_keeps_version_strings_raw() {
        // Parsing happens at comparison time in the reconciler; the lookup
        // must not decide what is or is not a valid version.
        let lookup = build_lookup(vec![package("weird-pkg", &["not.a.version"])]);
        assert_eq!(lookup["weird-pkg"].latest_version, "not.a.version");
    }

    #[test]
    fn test_build_lookup_first_occurrence_wins() {
        let lookup = build_lookup(vec![
            package("dup-pkg", &["1.0.0"]),
            package("dup-pkg", &["9.9.9"]),
        ]);
        assert_eq!(lookup["dup-pkg"].latest_version, "1.0.0");
    }

    #[test]
    fn test_payload_deserialization() {
        let json = r#"[{
            "full_name": "alice-modA",
            "package_url": "https://thunderstore.io/c/repo/p/alice/modA/",
            "versions": [{"version_number": "1.2.0"}, {"version_number": "1.0.0"}],
            "rating_score": 42,
            "is_deprecated": false
        }]"#;
        let packages: Vec<Package> = serde_json::from_str(json).unwrap();
        let lookup = build_lookup(packages);
        assert_eq!(lookup["alice-modA"].latest_version, "1.2.0");
        assert!(lookup["alice-modA"].url.contains("/p/alice/modA/"));
    }
}
