// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Handles GET /health and GET /v1/whoami.

use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use warden_core::Principal;

/// Response body for GET /health.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Response body for GET /v1/whoami.
#[derive(Debug, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    pub authenticated: bool,
    pub name: Option<String>,
    pub scheme: Option<String>,
    pub roles: Vec<String>,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// GET /health
///
/// Unauthenticated liveness probe.
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /v1/whoami
///
/// Echoes the principal the authentication pipeline resolved, if any.
pub async fn get_whoami(principal: Option<Extension<Principal>>) -> Json<WhoAmIResponse> {
    let response = match principal {
        Some(Extension(principal)) => WhoAmIResponse {
            authenticated: true,
            name: Some(principal.name),
            scheme: Some(principal.scheme),
            roles: principal.roles,
        },
        None => WhoAmIResponse {
            authenticated: false,
            name: None,
            scheme: None,
            roles: Vec::new(),
        },
    };
    Json(response)
}
