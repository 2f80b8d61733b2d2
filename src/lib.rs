//! modsync - Thunderstore modpack dependency reconciler
//!
//! modsync keeps a curated modpack's `manifest.json` in step with the
//! Thunderstore package catalog. Each run fetches the full catalog, bumps
//! every declared dependency to its latest published version, diffs the
//! resulting dependency set against a snapshot of the previous run, derives
//! a semantic version bump for the pack itself, and prepends a dated section
//! to the changelog.
//!
//! # Architecture Overview
//!
//! modsync follows a manifest/snapshot model where:
//! - `manifest.json` declares the pack's dependencies as
//!   `namespace-name-version` identifier strings
//! - `.dependencies_snapshot.json` records the dependency set of the previous
//!   successful run and serves as the diff baseline
//! - The Thunderstore catalog is fetched fresh on every run and never cached
//!
//! One run executes strictly in sequence: fetch → reconcile → diff →
//! version policy → persist → changelog. Fatal failures (catalog
//! unreachable after retries, unreadable manifest) abort before anything is
//! written; per-dependency problems (malformed identifier, unknown package)
//! are carried through unchanged and summarized at the end.
//!
//! # Core Modules
//!
//! - [`identifier`] - The `namespace-name-version` identifier codec
//! - [`catalog`] - Thunderstore catalog fetching with retry and lookup building
//! - [`reconciler`] - Pure reconciliation of declared versions against the catalog
//! - [`diff`] - Added/removed classification against the previous snapshot
//! - [`version`] - Semantic version bump policy for the pack version
//! - [`changelog`] - Dated, grouped changelog rendering and prepending
//!
//! # State and Collaborators
//!
//! - [`manifest`] - manifest.json model, validation, and deduplicated writes
//! - [`snapshot`] - Snapshot persistence (absent file = empty baseline)
//! - [`notifier`] - GitHub issue notification for packages missing upstream
//!
//! # Supporting Modules
//!
//! - [`cli`] - Command-line interface (`update`, `generate`, `import`)
//! - [`core`] - Error taxonomy and user-friendly error reporting
//! - [`utils`] - Atomic file writes and progress indication
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Reconcile the manifest against Thunderstore
//! modsync update
//!
//! # Preview without touching any file
//! modsync update --dry-run
//!
//! # Regenerate thunderstore.toml from the manifest
//! modsync generate
//!
//! # Seed dependencies from a list of Thunderstore package URLs
//! modsync import urls mods.txt
//! ```

pub mod catalog;
pub mod changelog;
pub mod cli;
pub mod constants;
pub mod core;
pub mod diff;
pub mod identifier;
pub mod manifest;
pub mod notifier;
pub mod reconciler;
pub mod snapshot;
pub mod utils;
pub mod version;
