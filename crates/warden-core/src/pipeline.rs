// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host-side driver running a request through registered filters.
//!
//! The authenticate pass visits filters in registration order and stops at
//! the first filter that fails or rejects the request. The challenge pass
//! visits every filter so each can offer its own challenge.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::context::{AuthenticationContext, ChallengeContext};
use crate::error::WardenError;
use crate::traits::AuthenticationFilter;
use crate::types::{ActionResult, HookPhase, Principal};

/// Result of the authenticate pass.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthenticationOutcome {
    /// A filter resolved the caller.
    Authenticated(Principal),
    /// No filter resolved the caller and none rejected the request.
    Anonymous,
    /// A filter rejected the request with this result.
    Rejected(ActionResult),
}

/// An ordered set of authentication filters.
#[derive(Clone, Default)]
pub struct FilterPipeline {
    filters: Vec<Arc<dyn AuthenticationFilter>>,
}

impl std::fmt::Debug for FilterPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterPipeline")
            .field(
                "filters",
                &self.filters.iter().map(|f| f.filter_name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Arc<dyn AuthenticationFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn push(&mut self, filter: Arc<dyn AuthenticationFilter>) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.filter_name()).collect()
    }

    /// Runs the authenticate pass over `context`.
    pub async fn authenticate(
        &self,
        context: &mut AuthenticationContext,
        cancel: &CancellationToken,
    ) -> Result<AuthenticationOutcome, WardenError> {
        for filter in &self.filters {
            let name = filter.filter_name();
            ensure_not_cancelled(cancel, HookPhase::Authenticate, name)?;

            debug!(filter = name, path = %context.request().path, "running authenticate hook");
            filter
                .authenticate(context, cancel)
                .await
                .map_err(|source| hook_failure(HookPhase::Authenticate, name, source))?;

            if let Some(result) = context.error_result() {
                debug!(filter = name, status = %result.status, "request rejected");
                return Ok(AuthenticationOutcome::Rejected(result.clone()));
            }
        }

        Ok(match context.principal() {
            Some(principal) => AuthenticationOutcome::Authenticated(principal.clone()),
            None => AuthenticationOutcome::Anonymous,
        })
    }

    /// Runs the challenge pass over `context`.
    pub async fn challenge(
        &self,
        context: &mut ChallengeContext,
        cancel: &CancellationToken,
    ) -> Result<(), WardenError> {
        for filter in &self.filters {
            let name = filter.filter_name();
            ensure_not_cancelled(cancel, HookPhase::Challenge, name)?;

            debug!(filter = name, status = %context.result().status, "running challenge hook");
            filter
                .challenge(context, cancel)
                .await
                .map_err(|source| hook_failure(HookPhase::Challenge, name, source))?;
        }
        Ok(())
    }
}

fn ensure_not_cancelled(
    cancel: &CancellationToken,
    phase: HookPhase,
    filter: &str,
) -> Result<(), WardenError> {
    if cancel.is_cancelled() {
        debug!(%phase, filter, "pipeline cancelled");
        return Err(WardenError::Cancelled);
    }
    Ok(())
}

fn hook_failure(phase: HookPhase, filter: &str, source: crate::error::HookError) -> WardenError {
    warn!(%phase, filter, error = %source, "authentication hook failed");
    WardenError::Hook {
        filter: filter.to_string(),
        source,
    }
}
