// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer token authentication filter.
//!
//! Token lookups go through a [`TokenStore`], which may hit the network, so
//! this filter overrides the suspending hooks and races each lookup against
//! the request's cancellation signal.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use warden_config::model::BearerTokenConfig;
use warden_core::{
    ActionResult, AuthError, AuthenticationContext, AuthenticationHook, Challenge,
    ChallengeContext, HookError, HookFuture, Principal,
};

pub const BEARER_SCHEME: &str = "Bearer";

/// Resolves bearer tokens to principals.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns the token's principal, `None` for an unknown token, or an
    /// error when the store could not answer.
    async fn resolve(&self, token: &str) -> Result<Option<Principal>, HookError>;
}

/// In-memory token table.
#[derive(Default)]
pub struct StaticTokenStore {
    tokens: HashMap<String, Principal>,
}

impl StaticTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(tokens: &[BearerTokenConfig]) -> Self {
        tokens.iter().fold(Self::new(), |store, entry| {
            store.with_token(&entry.token, &entry.subject, entry.roles.clone())
        })
    }

    pub fn with_token(mut self, token: &str, subject: &str, roles: Vec<String>) -> Self {
        self.tokens.insert(
            token.to_string(),
            Principal::new(subject, BEARER_SCHEME).with_roles(roles),
        );
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl TokenStore for StaticTokenStore {
    async fn resolve(&self, token: &str) -> Result<Option<Principal>, HookError> {
        Ok(self.tokens.get(token).cloned())
    }
}

/// Accepts `Authorization: Bearer` tokens known to a [`TokenStore`].
pub struct BearerTokenFilter {
    realm: String,
    store: Arc<dyn TokenStore>,
}

impl BearerTokenFilter {
    pub fn new(realm: impl Into<String>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            realm: realm.into(),
            store,
        }
    }
}

impl AuthenticationHook for BearerTokenFilter {
    fn name(&self) -> &str {
        "bearer"
    }

    fn on_authenticate_async<'a>(
        &'a self,
        context: &'a mut AuthenticationContext,
        cancel: &'a CancellationToken,
    ) -> HookFuture<'a> {
        Box::pin(async move {
            let presented = context
                .request()
                .credentials_for(BEARER_SCHEME)
                .map(|parsed| parsed.map(str::to_string));
            let token = match presented {
                None => return Ok(()),
                Some(Err(_)) => {
                    context.set_error_result(ActionResult::unauthorized(
                        "malformed authorization header",
                    ));
                    return Ok(());
                }
                Some(Ok(token)) => token,
            };

            let resolved = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(AuthError::Unavailable("token lookup cancelled".into()).into());
                }
                resolved = self.store.resolve(&token) => resolved?,
            };

            match resolved {
                Some(principal) => {
                    tracing::debug!(subject = %principal.name, "bearer token accepted");
                    context.set_principal(principal);
                }
                None => {
                    tracing::debug!("bearer token rejected");
                    context.set_error_result(ActionResult::unauthorized("invalid bearer token"));
                }
            }
            Ok(())
        })
    }

    fn on_challenge_async<'a>(
        &'a self,
        context: &'a mut ChallengeContext,
        _cancel: &'a CancellationToken,
    ) -> HookFuture<'a> {
        Box::pin(async move {
            if !context.result().is_unauthorized() {
                return Ok(());
            }
            let mut challenge = Challenge::new(BEARER_SCHEME).param("realm", &self.realm);
            if context.request().credentials_for(BEARER_SCHEME).is_some() {
                challenge = challenge.param("error", "invalid_token");
            }
            context.result_mut().add_challenge(&challenge)?;
            Ok(())
        })
    }
}
