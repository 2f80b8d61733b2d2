//! Notification for dependencies missing from the catalog.
//!
//! When a declared dependency cannot be found upstream the run keeps the
//! entry unchanged, but a maintainer should hear about it: the package may
//! have been delisted, renamed, or the manifest may carry a typo. The
//! [`Notifier`] trait is the seam: the reconciler returns missing entries
//! as data, and the CLI drives whichever implementation its flags select.
//! Notification failures are logged and never fail the run.

use anyhow::{Context, Result};
use serde_json::json;
use tracing::debug;

use crate::core::SyncError;

/// Capability to report a dependency that is missing upstream.
pub trait Notifier {
    /// Notify about one missing dependency, identified by its manifest
    /// text (e.g. `alice-modA-1.0.0`).
    fn notify_missing(&self, dependency: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Notifier that swallows every notification, for callers that need the
/// seam without the side effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    async fn notify_missing(&self, dependency: &str) -> Result<()> {
        debug!("notification suppressed for missing dependency: {dependency}");
        Ok(())
    }
}

/// Files a GitHub issue per missing dependency.
///
/// Repository and token are passed in at construction; the CLI boundary
/// reads them from `GITHUB_REPOSITORY` and `GITHUB_TOKEN`. The core never
/// touches the environment.
pub struct GitHubNotifier {
    client: reqwest::Client,
    repository: String,
    token: String,
}

impl GitHubNotifier {
    /// Create a notifier for `owner/repo` authenticating with `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(repository: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("modsync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            repository: repository.into(),
            token: token.into(),
        })
    }
}

impl Notifier for GitHubNotifier {
    async fn notify_missing(&self, dependency: &str) -> Result<()> {
        let url = format!("https://api.github.com/repos/{}/issues", self.repository);
        let body = json!({
            "title": format!("Dependency not found: {dependency}"),
            "body": format!(
                "The dependency `{dependency}` could not be found on Thunderstore. \
                 Please investigate."
            ),
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .json(&body)
            .send()
            .await
            .map_err(|e| SyncError::NetworkError {
                operation: "issue creation".to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::CREATED {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("GitHub returned {status} creating issue: {text}");
        }

        Ok(())
    }
}

/// Build the notifier for a run from optional credentials.
///
/// Returns [`GitHubNotifier`] when both repository and token are present;
/// otherwise `None`, which the caller treats like `--no-notify` with a
/// warning.
pub fn from_credentials(
    repository: Option<String>,
    token: Option<String>,
) -> Result<Option<GitHubNotifier>> {
    match (repository, token) {
        (Some(repository), Some(token)) if !repository.is_empty() && !token.is_empty() => {
            GitHubNotifier::new(repository, token)
                .map(Some)
                .context("Failed to construct GitHub notifier")
        }
        _ => Ok(None),
    }
}
