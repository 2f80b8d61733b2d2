//! Error handling for modsync
//!
//! This module provides the error types and user-friendly error reporting
//! for the reconciler. The error system is built around two types:
//! - [`SyncError`] - Enumerated error types for every failure mode
//! - [`ErrorContext`] - Wrapper adding suggestions and details for CLI users
//!
//! # Fatal vs recoverable
//!
//! Only a handful of failures abort a run:
//! - [`SyncError::CatalogUnavailable`] - retries exhausted fetching the catalog
//! - [`SyncError::InvalidManifestFormat`] - manifest.json is structurally unreadable
//! - [`SyncError::InvalidVersionFormat`] - a version string cannot be compared
//!
//! Per-dependency problems (malformed identifiers, packages missing from the
//! catalog) are never fatal: the affected entry passes through reconciliation
//! unchanged and is listed in the end-of-run summary.
//!
//! IO and parsing failures outside the taxonomy propagate as plain
//! `anyhow` errors with path context attached at the call site.
//!
//! Use [`user_friendly_error`] at the CLI boundary to turn any
//! `anyhow::Error` into a colored message with a suggestion.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for modsync operations.
///
/// Each variant represents a specific failure mode and carries enough
/// context (file names, identifiers, underlying reasons) to produce an
/// actionable message without further lookups.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A declared dependency does not split into exactly three
    /// `namespace-name-version` segments.
    ///
    /// Never fatal: the original text is carried through reconciliation
    /// unchanged so the manifest is not silently altered for entries the
    /// tool cannot understand.
    #[error("malformed dependency identifier: {text}")]
    MalformedIdentifier {
        /// The identifier text that failed to parse
        text: String,
    },

    /// Catalog fetch retries exhausted.
    ///
    /// Fatal: reconciliation must not proceed with a partial or stale
    /// catalog, so the run aborts before any artifact is touched.
    #[error("catalog unavailable after {attempts} attempt(s): {reason}")]
    CatalogUnavailable {
        /// Number of attempts made before giving up
        attempts: u32,
        /// The last transport failure observed
        reason: String,
    },

    /// manifest.json is structurally unreadable.
    ///
    /// Fatal: the run aborts before any mutation.
    #[error("invalid manifest format in {file}: {reason}")]
    InvalidManifestFormat {
        /// Path to the manifest that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// A declared or fetched version string is not a semantic version.
    ///
    /// Fatal for the run: comparing unparseable strings numerically is
    /// undefined and must not be attempted.
    #[error("invalid version format: {version}")]
    InvalidVersionFormat {
        /// The version string that failed to parse
        version: String,
    },

    /// Snapshot file exists but cannot be parsed.
    #[error("invalid snapshot syntax in {file}: {reason}")]
    SnapshotParseError {
        /// Path to the snapshot file
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Network failure outside the catalog retry loop (e.g. the notifier).
    #[error("network error during {operation}: {reason}")]
    NetworkError {
        /// The operation that was being performed
        operation: String,
        /// The underlying failure
        reason: String,
    },

    /// Generic error for cases not covered by specific variants
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// User-friendly error wrapper with suggestions and details.
///
/// Wraps a [`SyncError`] with optional context shown to CLI users:
/// the error itself in red, details in yellow, an actionable suggestion
/// in green.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying modsync error
    pub error: SyncError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: SyncError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion, displayed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add explanatory details, displayed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// Recognizes [`SyncError`] variants and common library errors and attaches
/// tailored suggestions; everything else falls back to a generic message
/// carrying the full error chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(sync_error) = error.downcast_ref::<SyncError>() {
        return contextualize(sync_error, &error);
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(SyncError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check file ownership or run with elevated permissions")
                .with_details("modsync could not read or write one of its artifacts");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(SyncError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the file exists and the path is correct");
            }
            _ => {}
        }
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();
    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(SyncError::Other { message })
}

fn contextualize(sync_error: &SyncError, original: &anyhow::Error) -> ErrorContext {
    match sync_error {
        SyncError::CatalogUnavailable { attempts, reason } => {
            ErrorContext::new(SyncError::CatalogUnavailable {
                attempts: *attempts,
                reason: reason.clone(),
            })
            .with_suggestion(
                "Check your network connection, or raise --retries / --retry-delay \
                 if Thunderstore is having a slow day",
            )
            .with_details("No files were modified; rerun once the catalog is reachable")
        }
        SyncError::InvalidManifestFormat { file, reason } => {
            ErrorContext::new(SyncError::InvalidManifestFormat {
                file: file.clone(),
                reason: reason.clone(),
            })
            .with_suggestion("Fix the JSON syntax in the manifest, then rerun")
            .with_details("The manifest must be a JSON object with a 'dependencies' array")
        }
        SyncError::InvalidVersionFormat { version } => {
            ErrorContext::new(SyncError::InvalidVersionFormat {
                version: version.clone(),
            })
            .with_suggestion("Versions must be numeric major.minor.patch, e.g. 1.2.0")
        }
        SyncError::SnapshotParseError { file, reason } => {
            ErrorContext::new(SyncError::SnapshotParseError {
                file: file.clone(),
                reason: reason.clone(),
            })
            .with_suggestion(
                "Delete the snapshot file to reset the diff baseline; the next run \
                 will treat every dependency as pre-existing",
            )
        }
        _ => ErrorContext::new(SyncError::Other {
            message: original.to_string(),
        }),
    }
}
