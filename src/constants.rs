//! Global constants used throughout the modsync codebase.
//!
//! This module contains the default catalog endpoint, artifact file names,
//! and retry parameters that are used across multiple modules. Defining
//! them centrally improves maintainability and makes magic numbers more
//! discoverable.

/// Default Thunderstore catalog endpoint for the REPO community.
///
/// The v1 package endpoint returns the entire catalog as a single JSON
/// array, each package listing its versions newest-first.
pub const DEFAULT_CATALOG_URL: &str = "https://thunderstore.io/c/repo/api/v1/package/";

/// Manifest file name, resolved relative to the working directory
/// unless overridden with `--manifest`.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Snapshot of the dependency set from the previous successful run.
///
/// Lives next to the manifest. Absence is not an error; it means this is
/// the first run and the diff baseline is empty.
pub const SNAPSHOT_FILE: &str = ".dependencies_snapshot.json";

/// Plain-text version marker written after a successful bump, for
/// downstream tooling (release workflows, badge generation).
pub const VERSION_MARKER_FILE: &str = "VERSION";

/// Changelog document; new sections are prepended, never appended.
pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Generated packaging configuration consumed by the Thunderstore CLI.
pub const THUNDERSTORE_TOML_FILE: &str = "thunderstore.toml";

/// Default number of catalog fetch attempts before the run aborts.
pub const DEFAULT_FETCH_RETRIES: u32 = 3;

/// Default fixed delay between catalog fetch attempts, in seconds.
///
/// The fetch uses a capped linear policy (same delay every attempt),
/// not exponential backoff; the catalog endpoint is a single large GET
/// and transient failures clear quickly or not at all.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

/// Default per-request timeout for catalog fetches, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable that disables spinners and progress output.
pub const NO_PROGRESS_ENV: &str = "MODSYNC_NO_PROGRESS";
