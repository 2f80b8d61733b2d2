//! Command-line interface for modsync.
//!
//! Each command is implemented as a separate module with its own argument
//! struct and execution logic:
//!
//! - `update` - Reconcile manifest.json against the Thunderstore catalog,
//!   bump the pack version, and write the changelog
//! - `generate` - Emit thunderstore.toml from the manifest
//! - `import` - Seed manifest dependencies from a URL list or an r2modman
//!   mods export
//!
//! # Global Options
//!
//! All commands support:
//! - `--verbose` - Debug-level logging (equivalent to `RUST_LOG=debug`)
//! - `--quiet` - Suppress all output except errors
//! - `--no-progress` - Disable spinners for CI and piped output
//!
//! # Configuration Model
//!
//! There is no ambient configuration: every knob is a flag with a default
//! from [`crate::constants`], and the two pieces of environment state the
//! tool honors (`GITHUB_REPOSITORY`/`GITHUB_TOKEN` for the notifier) are
//! read once here at the boundary and passed in by value. The core modules
//! never read the environment.

mod generate;
mod import;
mod update;

pub use generate::GenerateCommand;
pub use import::ImportCommand;
pub use update::UpdateCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::constants::NO_PROGRESS_ENV;

/// Main CLI structure for modsync.
///
/// Global options apply to all subcommands; each subcommand owns its own
/// flags.
#[derive(Parser)]
#[command(
    name = "modsync",
    about = "Keep a Thunderstore modpack manifest in sync with upstream releases",
    version
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging (equivalent to RUST_LOG=debug).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors, for scripts and CI.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable spinners and animated output.
    ///
    /// Automatically useful for CI systems and piped output; can also be
    /// set via the MODSYNC_NO_PROGRESS environment variable.
    #[arg(long, global = true)]
    no_progress: bool,
}

/// Available subcommands for the modsync CLI.
#[derive(Subcommand)]
enum Commands {
    /// Reconcile the manifest against the Thunderstore catalog.
    ///
    /// Fetches the catalog, bumps declared dependencies to their latest
    /// versions, diffs the dependency set against the previous snapshot,
    /// derives a pack version bump, and writes the manifest, snapshot,
    /// version marker, and changelog.
    Update(UpdateCommand),

    /// Generate thunderstore.toml from the manifest.
    Generate(GenerateCommand),

    /// Seed manifest dependencies from an external list.
    Import(ImportCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// Initializes logging from `--verbose`/`--quiet`/`RUST_LOG`, applies
    /// the progress kill-switch, and dispatches to the subcommand.
    ///
    /// # Errors
    ///
    /// Propagates the subcommand's failure for the binary to render via
    /// [`crate::core::error::user_friendly_error`].
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        if self.no_progress {
            // SAFETY: called from the main thread before any worker
            // threads are spawned.
            unsafe { std::env::set_var(NO_PROGRESS_ENV, "1") };
        }

        let quiet = self.quiet;
        match self.command {
            Commands::Update(cmd) => cmd.execute(quiet).await,
            Commands::Generate(cmd) => cmd.execute(quiet),
            Commands::Import(cmd) => cmd.execute(quiet),
        }
    }

    /// Install the global tracing subscriber.
    ///
    /// `--verbose` forces a debug filter, `--quiet` errors-only; otherwise
    /// `RUST_LOG` is honored with a warn-level default so normal runs stay
    /// readable.
    fn init_logging(&self) {
        let filter = if self.verbose {
            EnvFilter::new("modsync=debug,info")
        } else if self.quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .try_init();
    }
}
