// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-request contexts handed to authentication hooks.
//!
//! Both contexts are created by the host for a single request and dropped
//! once the response has been produced. Hooks borrow them mutably for the
//! duration of one call.

use std::sync::Arc;

use crate::types::{ActionResult, Principal, RequestInfo};

/// Identity-resolution state for the authenticate pass.
#[derive(Debug, Clone)]
pub struct AuthenticationContext {
    request: Arc<RequestInfo>,
    principal: Option<Principal>,
    error_result: Option<ActionResult>,
}

impl AuthenticationContext {
    pub fn new(request: Arc<RequestInfo>) -> Self {
        Self {
            request,
            principal: None,
            error_result: None,
        }
    }

    pub fn request(&self) -> &RequestInfo {
        &self.request
    }

    /// Shared handle to the request, for building the matching [`ChallengeContext`].
    pub fn request_handle(&self) -> Arc<RequestInfo> {
        Arc::clone(&self.request)
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn set_principal(&mut self, principal: Principal) {
        self.principal = Some(principal);
    }

    pub fn clear_principal(&mut self) -> Option<Principal> {
        self.principal.take()
    }

    /// The response a hook asked for instead of running the request handler.
    pub fn error_result(&self) -> Option<&ActionResult> {
        self.error_result.as_ref()
    }

    /// Rejects the request. Hosts stop running further hooks once this is set.
    pub fn set_error_result(&mut self, result: ActionResult) {
        self.error_result = Some(result);
    }

    pub fn take_error_result(&mut self) -> Option<ActionResult> {
        self.error_result.take()
    }

    pub fn is_rejected(&self) -> bool {
        self.error_result.is_some()
    }
}

/// State for the challenge pass: the authentication outcome plus the result
/// a hook may decorate with a challenge.
#[derive(Debug, Clone)]
pub struct ChallengeContext {
    request: Arc<RequestInfo>,
    principal: Option<Principal>,
    result: ActionResult,
}

impl ChallengeContext {
    pub fn new(request: Arc<RequestInfo>, principal: Option<Principal>, result: ActionResult) -> Self {
        Self {
            request,
            principal,
            result,
        }
    }

    pub fn request(&self) -> &RequestInfo {
        &self.request
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn result(&self) -> &ActionResult {
        &self.result
    }

    pub fn result_mut(&mut self) -> &mut ActionResult {
        &mut self.result
    }

    /// Replaces the in-progress result wholesale.
    pub fn set_result(&mut self, result: ActionResult) {
        self.result = result;
    }

    pub fn into_result(self) -> ActionResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use http::{HeaderMap, Method, StatusCode};

    use super::*;

    fn request() -> Arc<RequestInfo> {
        Arc::new(RequestInfo::new(Method::GET, "/v1/whoami", HeaderMap::new()))
    }

    #[test]
    fn new_context_is_unauthenticated() {
        let ctx = AuthenticationContext::new(request());
        assert!(ctx.principal().is_none());
        assert!(!ctx.is_rejected());
        assert_eq!(ctx.request().path, "/v1/whoami");
    }

    #[test]
    fn error_result_marks_rejection() {
        let mut ctx = AuthenticationContext::new(request());
        ctx.set_error_result(ActionResult::unauthorized("no"));
        assert!(ctx.is_rejected());
        let taken = ctx.take_error_result().unwrap();
        assert_eq!(taken.status, StatusCode::UNAUTHORIZED);
        assert!(!ctx.is_rejected());
    }

    #[test]
    fn clear_principal_returns_previous_identity() {
        let mut ctx = AuthenticationContext::new(request());
        assert!(ctx.clear_principal().is_none());
        ctx.set_principal(Principal::new("alice", "Basic"));
        assert_eq!(ctx.clear_principal().unwrap().name, "alice");
        assert!(ctx.principal().is_none());
    }

    #[test]
    fn set_result_replaces_in_progress_result() {
        let mut ctx = ChallengeContext::new(request(), None, ActionResult::ok());
        ctx.result_mut().headers.insert("x-trace", "1".parse().unwrap());
        ctx.set_result(ActionResult::forbidden("no"));
        assert_eq!(ctx.result().status, StatusCode::FORBIDDEN);
        assert!(ctx.result().headers.is_empty());
    }

    #[test]
    fn challenge_context_shares_request() {
        let mut auth = AuthenticationContext::new(request());
        auth.set_principal(Principal::new("alice", "Basic"));

        let challenge = ChallengeContext::new(
            auth.request_handle(),
            auth.principal().cloned(),
            ActionResult::ok(),
        );
        assert_eq!(challenge.request().path, "/v1/whoami");
        assert_eq!(challenge.principal().unwrap().name, "alice");
        assert_eq!(challenge.into_result().status, StatusCode::OK);
    }
}
