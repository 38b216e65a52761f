// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Warden authentication framework.

use thiserror::Error;

/// The error a hook hands back when it fails.
///
/// Hooks may return any error type; the adapter forwards the boxed value
/// untouched so callers can downcast it to the concrete type the hook raised.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Ready-made failures for hook authors.
///
/// Hosts recognise these by downcasting a [`HookError`] and map them onto
/// response statuses. Hooks are free to return their own error types instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The request carried credentials that could not be verified.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The caller is known but not allowed to proceed.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// An authentication header was present but could not be parsed.
    #[error("malformed {header} header: {reason}")]
    MalformedHeader { header: String, reason: String },

    /// A backing service needed to authenticate was unavailable.
    #[error("authentication unavailable: {0}")]
    Unavailable(String),
}

/// The primary error type used by the host side of the framework.
#[derive(Debug, Error)]
pub enum WardenError {
    /// A filter's hook failed. `source` is the hook's own error, unchanged.
    #[error("authentication filter `{filter}` failed: {source}")]
    Hook { filter: String, source: HookError },

    /// The request was cancelled before the pipeline finished.
    #[error("authentication cancelled")]
    Cancelled,

    /// Configuration errors (invalid TOML, missing fields, failed validation).
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP server errors (bind failure, serve failure).
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl WardenError {
    /// Returns the hook's original error when this is a [`WardenError::Hook`].
    pub fn hook_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            WardenError::Hook { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }

    /// Downcasts the hook's original error to an [`AuthError`], if it is one.
    pub fn auth_error(&self) -> Option<&AuthError> {
        self.hook_source()
            .and_then(|source| source.downcast_ref::<AuthError>())
    }
}
