//! Core types and error handling for modsync.
//!
//! This module hosts the error taxonomy ([`SyncError`]) and the
//! user-facing error presentation layer ([`ErrorContext`]). Everything
//! else in the crate propagates `anyhow::Result`; the CLI boundary
//! converts failures into colored, actionable messages via
//! [`user_friendly_error`].

pub mod error;

pub use error::{ErrorContext, SyncError, user_friendly_error};
