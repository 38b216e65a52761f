// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rejects requests that earlier filters left anonymous.

use warden_core::{ActionResult, AuthenticationContext, AuthenticationHook, HookError};

/// Place last in a pipeline to turn "nobody recognised the caller" into a 401.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequireAuthenticatedFilter;

impl AuthenticationHook for RequireAuthenticatedFilter {
    fn name(&self) -> &str {
        "require-authenticated"
    }

    fn on_authenticate(&self, context: &mut AuthenticationContext) -> Result<(), HookError> {
        if context.principal().is_none() && !context.is_rejected() {
            context.set_error_result(ActionResult::unauthorized("authentication required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http::{HeaderMap, Method, StatusCode};
    use warden_core::{Principal, RequestInfo};

    use super::*;

    fn context() -> AuthenticationContext {
        AuthenticationContext::new(Arc::new(RequestInfo::new(
            Method::GET,
            "/",
            HeaderMap::new(),
        )))
    }

    #[test]
    fn anonymous_request_is_rejected() {
        let mut ctx = context();
        RequireAuthenticatedFilter.on_authenticate(&mut ctx).unwrap();
        assert_eq!(ctx.error_result().unwrap().status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn authenticated_request_passes() {
        let mut ctx = context();
        ctx.set_principal(Principal::new("alice", "Basic"));
        RequireAuthenticatedFilter.on_authenticate(&mut ctx).unwrap();
        assert!(!ctx.is_rejected());
    }

    #[test]
    fn existing_rejection_is_kept() {
        let mut ctx = context();
        ctx.set_error_result(ActionResult::forbidden("earlier"));
        RequireAuthenticatedFilter.on_authenticate(&mut ctx).unwrap();
        assert_eq!(ctx.error_result().unwrap().status, StatusCode::FORBIDDEN);
    }
}
