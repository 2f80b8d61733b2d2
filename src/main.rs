//! modsync CLI entry point
//!
//! This is the main executable for the Thunderstore modpack reconciler.
//! It handles command-line argument parsing, error display, and command
//! execution.
//!
//! Supported commands:
//! - `update` - Reconcile manifest.json against the Thunderstore catalog
//! - `generate` - Emit thunderstore.toml from the manifest
//! - `import` - Seed manifest dependencies from a URL list or mods export

use anyhow::Result;
use clap::Parser;
use modsync::cli;
use modsync::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
