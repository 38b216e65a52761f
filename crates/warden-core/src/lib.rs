// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Warden authentication framework.
//!
//! This crate provides the authentication hook traits, the per-request
//! contexts hooks operate on, the error types, and the host-side filter
//! pipeline. Filters, the HTTP gateway, and configuration live in their own
//! crates and depend on this one.

pub mod context;
pub mod error;
pub mod pipeline;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use context::{AuthenticationContext, ChallengeContext};
pub use error::{AuthError, HookError, WardenError};
pub use pipeline::{AuthenticationOutcome, FilterPipeline};
pub use traits::{AuthenticationFilter, AuthenticationHook, HookFuture};
pub use types::{ActionResult, Challenge, HookPhase, Principal, RequestInfo};

/// The cancellation signal threaded through every hook call.
pub use tokio_util::sync::CancellationToken;
