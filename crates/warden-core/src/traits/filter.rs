// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The capability set a host pipeline depends on.

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::context::{AuthenticationContext, ChallengeContext};
use crate::error::HookError;

/// A suspendable hook outcome: resolves once, to success or to the hook's error.
pub type HookFuture<'a> = BoxFuture<'a, Result<(), HookError>>;

/// An authentication filter as seen by the host.
///
/// Hosts hold filters as `Arc<dyn AuthenticationFilter>` and drive them once
/// per request. Implementers normally do not implement this trait directly:
/// every [`AuthenticationHook`](crate::traits::AuthenticationHook) is a filter.
pub trait AuthenticationFilter: Send + Sync {
    /// Name used in logs and error reports.
    fn filter_name(&self) -> &str;

    /// Resolves the caller's identity, or rejects the request, by mutating `context`.
    fn authenticate<'a>(
        &'a self,
        context: &'a mut AuthenticationContext,
        cancel: &'a CancellationToken,
    ) -> HookFuture<'a>;

    /// Decorates the outgoing result, typically with a `WWW-Authenticate` challenge.
    fn challenge<'a>(
        &'a self,
        context: &'a mut ChallengeContext,
        cancel: &'a CancellationToken,
    ) -> HookFuture<'a>;
}
