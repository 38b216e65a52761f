// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, the authentication middleware, and graceful shutdown.

use std::sync::Arc;

use axum::{Router, middleware as axum_middleware, routing::get};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use warden_core::{FilterPipeline, WardenError};

use crate::auth::{AuthState, authentication_middleware};
use crate::handlers;

/// Gateway listener configuration (mirrors `ServerConfig` from warden-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Builds the gateway router.
///
/// - GET /health (public)
/// - GET /v1/whoami (through the authentication pipeline)
pub fn build_router(pipeline: Arc<FilterPipeline>, shutdown: CancellationToken) -> Router {
    let auth_state = AuthState { pipeline, shutdown };

    let public_routes = Router::new().route("/health", get(handlers::get_health));

    let api_routes = Router::new()
        .route("/v1/whoami", get(handlers::get_whoami))
        .route_layer(axum_middleware::from_fn_with_state(
            auth_state,
            authentication_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
}

/// Serve the gateway until `shutdown` is cancelled.
///
/// In-flight requests see the cancellation through their per-request tokens.
pub async fn start_server(
    config: &ServerConfig,
    pipeline: Arc<FilterPipeline>,
    shutdown: CancellationToken,
) -> Result<(), WardenError> {
    let app = build_router(pipeline, shutdown.clone());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| WardenError::Server {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| WardenError::Server {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway stopped");
    Ok(())
}
