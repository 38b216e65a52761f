// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication middleware hosting a [`FilterPipeline`].
//!
//! For every request the middleware:
//! 1. runs the authenticate pass over the request's method, path and headers;
//! 2. answers directly when a filter rejected the request or failed, otherwise
//!    stores the principal (if any) in the request extensions and calls the
//!    inner handler;
//! 3. runs the challenge pass over the outgoing status and copies any headers
//!    the filters added onto the response. If that pass fails, the handler's
//!    response is discarded and the error response is sent instead.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio_util::sync::CancellationToken;

use warden_core::{
    ActionResult, AuthError, AuthenticationContext, AuthenticationOutcome, ChallengeContext,
    FilterPipeline, Principal, RequestInfo, WardenError,
};

use crate::handlers::ErrorResponse;

/// Shared state for [`authentication_middleware`].
#[derive(Clone)]
pub struct AuthState {
    pub pipeline: Arc<FilterPipeline>,
    /// Parent of every per-request cancellation token; cancelled on shutdown.
    pub shutdown: CancellationToken,
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("pipeline", &self.pipeline)
            .field("shutdown", &self.shutdown.is_cancelled())
            .finish()
    }
}

/// Maps a pipeline failure onto the status the client sees.
pub fn status_for_error(err: &WardenError) -> StatusCode {
    match err {
        WardenError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        WardenError::Hook { .. } => match err.auth_error() {
            Some(AuthError::InvalidCredentials(_)) | Some(AuthError::MalformedHeader { .. }) => {
                StatusCode::UNAUTHORIZED
            }
            Some(AuthError::Forbidden(_)) => StatusCode::FORBIDDEN,
            Some(AuthError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        },
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The result sent for a failed pipeline. Internal details stay in the logs.
fn error_result(err: &WardenError) -> ActionResult {
    let status = status_for_error(err);
    let message = match status {
        StatusCode::UNAUTHORIZED => "authentication failed",
        StatusCode::FORBIDDEN => "forbidden",
        StatusCode::SERVICE_UNAVAILABLE => "authentication unavailable",
        _ => "internal error",
    };
    ActionResult::new(status).with_body(message)
}

/// Middleware running the authenticate and challenge passes around a handler.
pub async fn authentication_middleware(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let info = Arc::new(RequestInfo::new(
        request.method().clone(),
        request.uri().path(),
        request.headers().clone(),
    ));
    let cancel = state.shutdown.child_token();
    let mut context = AuthenticationContext::new(Arc::clone(&info));

    let short_circuit = match state.pipeline.authenticate(&mut context, &cancel).await {
        Ok(AuthenticationOutcome::Rejected(result)) => Some(result),
        Ok(AuthenticationOutcome::Authenticated(principal)) => {
            tracing::debug!(principal = %principal.name, scheme = %principal.scheme, "request authenticated");
            request.extensions_mut().insert(principal);
            None
        }
        Ok(AuthenticationOutcome::Anonymous) => None,
        Err(err) => {
            tracing::warn!(error = %err, path = %info.path, "authentication pipeline failed");
            Some(error_result(&err))
        }
    };
    let principal = context.principal().cloned();

    match short_circuit {
        Some(result) => {
            let result = challenge(&state, &cancel, info, principal, result)
                .await
                .unwrap_or_else(|err| error_result(&err));
            action_response(result)
        }
        None => {
            let response = next.run(request).await;
            let (mut parts, body) = response.into_parts();

            // Start from an empty header map so everything left afterwards
            // was added by a challenge hook.
            let pending = ActionResult {
                status: parts.status,
                headers: HeaderMap::new(),
                body: None,
            };
            let result = match challenge(&state, &cancel, info, principal, pending).await {
                Ok(result) => result,
                // The handler response is dropped in favour of the error.
                Err(err) => return action_response(error_result(&err)),
            };

            parts.status = result.status;
            for (name, value) in result.headers.iter() {
                parts.headers.append(name.clone(), value.clone());
            }
            Response::from_parts(parts, body)
        }
    }
}

/// Runs the challenge pass over `result`.
async fn challenge(
    state: &AuthState,
    cancel: &CancellationToken,
    info: Arc<RequestInfo>,
    principal: Option<Principal>,
    result: ActionResult,
) -> Result<ActionResult, WardenError> {
    let mut context = ChallengeContext::new(info, principal, result);
    state
        .pipeline
        .challenge(&mut context, cancel)
        .await
        .inspect_err(|err| tracing::warn!(error = %err, "challenge pass failed"))?;
    Ok(context.into_result())
}

/// Renders an [`ActionResult`] produced by the pipeline.
fn action_response(result: ActionResult) -> Response {
    let ActionResult {
        status,
        headers,
        body,
    } = result;
    match body {
        Some(error) => (status, headers, Json(ErrorResponse { error })).into_response(),
        None => (status, headers).into_response(),
    }
}
