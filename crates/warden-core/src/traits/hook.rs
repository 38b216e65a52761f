// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Overridable authentication hooks.
//!
//! [`AuthenticationHook`] lets an implementer customise authentication by
//! overriding only the plain blocking methods, while the host still receives
//! a suspendable, cancellable, failure-reporting [`AuthenticationFilter`].
//!
//! ```
//! use warden_core::{AuthError, AuthenticationContext, AuthenticationHook, HookError};
//!
//! struct DenyAll;
//!
//! impl AuthenticationHook for DenyAll {
//!     fn on_authenticate(&self, _context: &mut AuthenticationContext) -> Result<(), HookError> {
//!         Err(AuthError::Forbidden("closed for maintenance".into()).into())
//!     }
//! }
//! ```

use futures::future;
use tokio_util::sync::CancellationToken;

use crate::context::{AuthenticationContext, ChallengeContext};
use crate::error::HookError;
use crate::traits::filter::{AuthenticationFilter, HookFuture};

/// An authentication extension point with blocking and suspending forms.
///
/// Each operation has two layers:
///
/// - a blocking hook ([`on_authenticate`](Self::on_authenticate),
///   [`on_challenge`](Self::on_challenge)), a no-op by default;
/// - a suspending hook ([`on_authenticate_async`](Self::on_authenticate_async),
///   [`on_challenge_async`](Self::on_challenge_async)) whose default runs the
///   blocking hook and hands back an already-resolved future.
///
/// Override whichever layer fits. Overriding a suspending hook bypasses the
/// blocking one entirely.
///
/// Errors are returned, never swallowed: the value a hook returns in `Err`
/// reaches the caller as-is and can be downcast to its original type.
///
/// # Cancellation
///
/// The default suspending hooks never look at the cancellation signal, not
/// before the blocking hook starts and not while it runs. A blocking hook
/// cannot be interrupted once started. Suspending overrides that wait on I/O
/// should observe `cancel` themselves.
pub trait AuthenticationHook: Send + Sync {
    /// Diagnostic name; defaults to the implementing type's name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Blocking authentication hook. Runs synchronously on the caller's turn.
    fn on_authenticate(&self, _context: &mut AuthenticationContext) -> Result<(), HookError> {
        Ok(())
    }

    /// Blocking challenge hook. Runs synchronously on the caller's turn.
    fn on_challenge(&self, _context: &mut ChallengeContext) -> Result<(), HookError> {
        Ok(())
    }

    /// Suspending authentication hook.
    ///
    /// The default evaluates [`on_authenticate`](Self::on_authenticate)
    /// immediately and returns a future that is ready on first poll.
    fn on_authenticate_async<'a>(
        &'a self,
        context: &'a mut AuthenticationContext,
        _cancel: &'a CancellationToken,
    ) -> HookFuture<'a> {
        let outcome = self.on_authenticate(context);
        Box::pin(future::ready(outcome))
    }

    /// Suspending challenge hook. Default mirrors
    /// [`on_authenticate_async`](Self::on_authenticate_async).
    fn on_challenge_async<'a>(
        &'a self,
        context: &'a mut ChallengeContext,
        _cancel: &'a CancellationToken,
    ) -> HookFuture<'a> {
        let outcome = self.on_challenge(context);
        Box::pin(future::ready(outcome))
    }
}

impl<H: AuthenticationHook + ?Sized> AuthenticationFilter for H {
    fn filter_name(&self) -> &str {
        self.name()
    }

    fn authenticate<'a>(
        &'a self,
        context: &'a mut AuthenticationContext,
        cancel: &'a CancellationToken,
    ) -> HookFuture<'a> {
        self.on_authenticate_async(context, cancel)
    }

    fn challenge<'a>(
        &'a self,
        context: &'a mut ChallengeContext,
        cancel: &'a CancellationToken,
    ) -> HookFuture<'a> {
        self.on_challenge_async(context, cancel)
    }
}
