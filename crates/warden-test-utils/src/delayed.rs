// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Suspending mock hook that waits before applying its behavior.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use warden_core::{
    AuthError, AuthenticationContext, AuthenticationHook, ChallengeContext, HookError, HookFuture,
};

use crate::recording::{CallLog, HookBehavior};

/// A hook overriding only the suspending methods.
///
/// Both hooks sleep for the configured delay first. When
/// `observe_cancellation` is set, a cancelled signal ends the wait early with
/// [`AuthError::Unavailable`]. The blocking hooks are counted but should never
/// run; `blocking_calls` lets tests prove that.
pub struct DelayedHook {
    delay: Duration,
    behavior: HookBehavior,
    challenge_error: Option<AuthError>,
    observe_cancellation: bool,
    log: Arc<CallLog>,
    blocking: Arc<CallLog>,
}

impl DelayedHook {
    pub fn new(delay: Duration, behavior: HookBehavior) -> Self {
        Self {
            delay,
            behavior,
            challenge_error: None,
            observe_cancellation: false,
            log: Arc::new(CallLog::default()),
            blocking: Arc::new(CallLog::default()),
        }
    }

    /// Make the challenge hook fail with `err` after the delay.
    pub fn failing_challenge(mut self, err: AuthError) -> Self {
        self.challenge_error = Some(err);
        self
    }

    pub fn observing_cancellation(mut self) -> Self {
        self.observe_cancellation = true;
        self
    }

    pub fn log(&self) -> Arc<CallLog> {
        Arc::clone(&self.log)
    }

    /// Calls that reached the blocking hooks.
    pub fn blocking_calls(&self) -> usize {
        self.blocking.authenticate_calls() + self.blocking.challenge_calls()
    }

    async fn wait(&self, cancel: &CancellationToken) -> Result<(), HookError> {
        if !self.observe_cancellation {
            tokio::time::sleep(self.delay).await;
            return Ok(());
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(AuthError::Unavailable("cancelled while waiting".into()).into()),
            _ = tokio::time::sleep(self.delay) => Ok(()),
        }
    }
}

impl AuthenticationHook for DelayedHook {
    fn name(&self) -> &str {
        "delayed"
    }

    fn on_authenticate(&self, context: &mut AuthenticationContext) -> Result<(), HookError> {
        self.blocking.record_authenticate(&context.request().path);
        Ok(())
    }

    fn on_challenge(&self, _context: &mut ChallengeContext) -> Result<(), HookError> {
        self.blocking.record_challenge();
        Ok(())
    }

    fn on_authenticate_async<'a>(
        &'a self,
        context: &'a mut AuthenticationContext,
        cancel: &'a CancellationToken,
    ) -> HookFuture<'a> {
        Box::pin(async move {
            self.log.record_authenticate(&context.request().path);
            self.wait(cancel).await?;
            self.behavior.apply(context)
        })
    }

    fn on_challenge_async<'a>(
        &'a self,
        _context: &'a mut ChallengeContext,
        cancel: &'a CancellationToken,
    ) -> HookFuture<'a> {
        Box::pin(async move {
            self.log.record_challenge();
            self.wait(cancel).await?;
            match &self.challenge_error {
                Some(err) => Err(err.clone().into()),
                None => Ok(()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use http::{HeaderMap, Method};
    use warden_core::{
        ActionResult, AuthenticationFilter, Principal, RequestInfo,
    };

    use super::*;

    fn context() -> AuthenticationContext {
        AuthenticationContext::new(Arc::new(RequestInfo::new(
            Method::GET,
            "/",
            HeaderMap::new(),
        )))
    }

    #[tokio::test(start_paused = true)]
    async fn authenticate_waits_then_applies_behavior() {
        let delay = Duration::from_millis(300);
        let hook = DelayedHook::new(delay, HookBehavior::SignIn(Principal::new("late", "Mock")));
        let mut ctx = context();

        let start = tokio::time::Instant::now();
        hook.authenticate(&mut ctx, &CancellationToken::new())
            .await
            .unwrap();
        assert!(start.elapsed() >= delay);
        assert_eq!(ctx.principal().unwrap().name, "late");
        assert_eq!(hook.log().authenticate_calls(), 1);
        assert_eq!(hook.blocking_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn challenge_fails_after_delay() {
        let delay = Duration::from_secs(1);
        let hook = DelayedHook::new(delay, HookBehavior::Pass)
            .failing_challenge(AuthError::Unavailable("down".into()));
        let mut ctx = ChallengeContext::new(context().request_handle(), None, ActionResult::ok());

        let start = tokio::time::Instant::now();
        let err = hook
            .challenge(&mut ctx, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(start.elapsed() >= delay);
        assert_eq!(
            err.downcast_ref::<AuthError>(),
            Some(&AuthError::Unavailable("down".into()))
        );
        assert_eq!(hook.blocking_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn observed_cancellation_ends_wait() {
        let hook = DelayedHook::new(Duration::from_secs(3600), HookBehavior::Pass)
            .observing_cancellation();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let start = tokio::time::Instant::now();
        let err = hook.authenticate(&mut context(), &cancel).await.unwrap_err();
        assert!(start.elapsed() < Duration::from_secs(3600));
        assert!(matches!(
            err.downcast_ref::<AuthError>(),
            Some(AuthError::Unavailable(_))
        ));
    }
}
