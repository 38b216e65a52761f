// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blocking-style mock hook with scripted behavior and call counters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use warden_core::{
    ActionResult, AuthError, AuthenticationContext, AuthenticationHook, Challenge,
    ChallengeContext, HookError, Principal,
};

/// What a mock hook does when its authenticate hook runs.
#[derive(Debug, Clone)]
pub enum HookBehavior {
    /// Leave the context untouched.
    Pass,
    /// Set this principal.
    SignIn(Principal),
    /// Set this error result.
    Reject(ActionResult),
    /// Return this error.
    Fail(AuthError),
}

impl HookBehavior {
    pub(crate) fn apply(&self, context: &mut AuthenticationContext) -> Result<(), HookError> {
        match self {
            HookBehavior::Pass => Ok(()),
            HookBehavior::SignIn(principal) => {
                context.set_principal(principal.clone());
                Ok(())
            }
            HookBehavior::Reject(result) => {
                context.set_error_result(result.clone());
                Ok(())
            }
            HookBehavior::Fail(err) => Err(err.clone().into()),
        }
    }
}

/// Call counters shared between a mock hook and the test holding it.
#[derive(Debug, Default)]
pub struct CallLog {
    authenticate: AtomicUsize,
    challenge: AtomicUsize,
    paths: Mutex<Vec<String>>,
}

impl CallLog {
    pub fn authenticate_calls(&self) -> usize {
        self.authenticate.load(Ordering::SeqCst)
    }

    pub fn challenge_calls(&self) -> usize {
        self.challenge.load(Ordering::SeqCst)
    }

    /// Request paths seen by the authenticate hook, in call order.
    pub fn paths(&self) -> Vec<String> {
        self.paths
            .lock()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }

    pub(crate) fn record_authenticate(&self, path: &str) {
        self.authenticate.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut paths) = self.paths.lock() {
            paths.push(path.to_string());
        }
    }

    pub(crate) fn record_challenge(&self) {
        self.challenge.fetch_add(1, Ordering::SeqCst);
    }
}

/// A hook overriding only the blocking methods.
///
/// Authenticate applies the configured [`HookBehavior`]; challenge adds a
/// `WWW-Authenticate: <scheme>` header to 401 results when a scheme is set.
pub struct RecordingHook {
    name: String,
    behavior: HookBehavior,
    challenge_scheme: Option<String>,
    log: Arc<CallLog>,
}

impl RecordingHook {
    pub fn new(name: impl Into<String>, behavior: HookBehavior) -> Self {
        Self {
            name: name.into(),
            behavior,
            challenge_scheme: None,
            log: Arc::new(CallLog::default()),
        }
    }

    /// Offer `scheme` as a challenge on unauthorized results.
    pub fn with_challenge(mut self, scheme: impl Into<String>) -> Self {
        self.challenge_scheme = Some(scheme.into());
        self
    }

    pub fn log(&self) -> Arc<CallLog> {
        Arc::clone(&self.log)
    }
}

impl AuthenticationHook for RecordingHook {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_authenticate(&self, context: &mut AuthenticationContext) -> Result<(), HookError> {
        self.log.record_authenticate(&context.request().path);
        self.behavior.apply(context)
    }

    fn on_challenge(&self, context: &mut ChallengeContext) -> Result<(), HookError> {
        self.log.record_challenge();
        if let Some(scheme) = &self.challenge_scheme
            && context.result().is_unauthorized()
        {
            context.result_mut().add_challenge(&Challenge::new(scheme))?;
        }
        Ok(())
    }
}
