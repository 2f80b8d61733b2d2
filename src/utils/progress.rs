//! Progress indication for long-running operations.
//!
//! Thin wrapper over [`indicatif`] so the rest of the crate never touches
//! the library directly. The only long-running operation modsync has is
//! the catalog fetch, so a spinner is all this module provides.
//!
//! The spinner is purely cosmetic: it animates terminal output and never
//! participates in reconciliation state. Setting `MODSYNC_NO_PROGRESS` to
//! any value yields a hidden spinner that silently ignores all operations,
//! which keeps CI logs and piped output clean.

use std::time::Duration;

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

use crate::constants::NO_PROGRESS_ENV;

/// Checks if progress indication is disabled via the environment.
fn is_progress_disabled() -> bool {
    std::env::var(NO_PROGRESS_ENV).is_ok()
}

/// A spinner for indeterminate progress operations.
///
/// Finishing is idempotent; the CLI finishes the spinner before printing
/// its next log line so output never interleaves with the animation.
#[derive(Clone)]
pub struct Spinner {
    inner: IndicatifBar,
}

impl Spinner {
    /// Creates a spinner with the modsync styling, ticking every 100ms.
    #[must_use]
    pub fn new() -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {msg}")
                    .expect("spinner template is valid")
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
            );
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self { inner: bar }
    }

    /// Sets the message displayed next to the spinner.
    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    /// Stops the spinner, leaving a final message in place.
    pub fn finish_with_message(&self, msg: impl Into<String>) {
        self.inner.finish_with_message(msg.into());
    }

    /// Stops the spinner and removes it from the terminal.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}
