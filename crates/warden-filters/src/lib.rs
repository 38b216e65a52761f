// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ready-made authentication filters.
//!
//! [`BasicAuthFilter`] overrides the blocking hooks, [`BearerTokenFilter`]
//! the suspending ones. [`build_pipeline`] assembles them from configuration.

pub mod basic;
pub mod bearer;
pub mod require;

use std::sync::Arc;

pub use basic::BasicAuthFilter;
pub use bearer::{BearerTokenFilter, StaticTokenStore, TokenStore};
pub use require::RequireAuthenticatedFilter;

use warden_config::model::AuthConfig;
use warden_core::FilterPipeline;

/// Builds the pipeline described by `[auth]`.
///
/// Basic runs before Bearer; the require-authenticated guard, when enabled,
/// runs last. Filters without configured credentials are left out.
pub fn build_pipeline(config: &AuthConfig) -> FilterPipeline {
    let mut pipeline = FilterPipeline::new();

    if !config.basic_users.is_empty() {
        pipeline.push(Arc::new(BasicAuthFilter::from_config(
            &config.realm,
            &config.basic_users,
        )));
    }

    if !config.bearer_tokens.is_empty() {
        let store = StaticTokenStore::from_config(&config.bearer_tokens);
        pipeline.push(Arc::new(BearerTokenFilter::new(
            config.realm.clone(),
            Arc::new(store),
        )));
    }

    if config.require_authentication {
        pipeline.push(Arc::new(RequireAuthenticatedFilter));
    }

    tracing::info!(filters = ?pipeline.filter_names(), "authentication pipeline built");
    pipeline
}
