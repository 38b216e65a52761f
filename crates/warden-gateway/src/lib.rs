// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway hosting the Warden authentication pipeline.
//!
//! The gateway is the host side of the hook contract: it turns each HTTP
//! request into an [`AuthenticationContext`](warden_core::AuthenticationContext),
//! drives the [`FilterPipeline`](warden_core::FilterPipeline), and turns hook
//! outcomes and failures into responses.

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::{AuthState, authentication_middleware, status_for_error};
pub use server::{ServerConfig, build_router, start_server};
