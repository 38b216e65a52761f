// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP Basic authentication filter.
//!
//! Overrides only the blocking hooks: verification is a map lookup and a
//! digest comparison, so there is nothing to suspend on.

use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

use warden_config::model::BasicUserConfig;
use warden_core::{
    ActionResult, AuthenticationContext, AuthenticationHook, Challenge, ChallengeContext,
    HookError, Principal, RequestInfo,
};

pub const BASIC_SCHEME: &str = "Basic";

struct Account {
    password_digest: [u8; 32],
    roles: Vec<String>,
}

/// Accepts `Authorization: Basic` credentials from a fixed account list.
pub struct BasicAuthFilter {
    realm: String,
    accounts: HashMap<String, Account>,
}

enum Verdict {
    NoCredentials,
    Accepted(Principal),
    Rejected(&'static str),
}

impl BasicAuthFilter {
    pub fn new(realm: impl Into<String>) -> Self {
        Self {
            realm: realm.into(),
            accounts: HashMap::new(),
        }
    }

    pub fn from_config(realm: &str, users: &[BasicUserConfig]) -> Self {
        users.iter().fold(Self::new(realm), |filter, user| {
            filter.with_user(&user.username, &user.password, user.roles.clone())
        })
    }

    /// Adds (or replaces) an account.
    pub fn with_user(mut self, username: &str, password: &str, roles: Vec<String>) -> Self {
        self.accounts.insert(
            username.to_string(),
            Account {
                password_digest: digest(password),
                roles,
            },
        );
        self
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    fn verify(&self, request: &RequestInfo) -> Verdict {
        let encoded = match request.credentials_for(BASIC_SCHEME) {
            None => return Verdict::NoCredentials,
            Some(Err(_)) => return Verdict::Rejected("malformed authorization header"),
            Some(Ok(encoded)) => encoded,
        };

        let Some((username, password)) = decode_credentials(encoded) else {
            return Verdict::Rejected("malformed basic credentials");
        };

        let presented = digest(&password);
        match self.accounts.get(&username) {
            Some(account) if account.password_digest == presented => Verdict::Accepted(
                Principal::new(username, BASIC_SCHEME).with_roles(account.roles.clone()),
            ),
            _ => Verdict::Rejected("invalid username or password"),
        }
    }
}

impl AuthenticationHook for BasicAuthFilter {
    fn name(&self) -> &str {
        "basic"
    }

    fn on_authenticate(&self, context: &mut AuthenticationContext) -> Result<(), HookError> {
        match self.verify(context.request()) {
            Verdict::NoCredentials => {}
            Verdict::Accepted(principal) => {
                tracing::debug!(user = %principal.name, "basic credentials accepted");
                context.set_principal(principal);
            }
            Verdict::Rejected(reason) => {
                tracing::debug!(reason, "basic credentials rejected");
                context.set_error_result(ActionResult::unauthorized(reason));
            }
        }
        Ok(())
    }

    fn on_challenge(&self, context: &mut ChallengeContext) -> Result<(), HookError> {
        if context.result().is_unauthorized() {
            let challenge = Challenge::new(BASIC_SCHEME)
                .param("realm", &self.realm)
                .param("charset", "UTF-8");
            context.result_mut().add_challenge(&challenge)?;
        }
        Ok(())
    }
}

fn digest(password: &str) -> [u8; 32] {
    Sha256::digest(password.as_bytes()).into()
}

/// Decodes `base64(username:password)`. The password may itself contain `:`.
fn decode_credentials(encoded: &str) -> Option<(String, String)> {
    let bytes = STANDARD.decode(encoded).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    let (username, password) = text.split_once(':')?;
    if username.is_empty() {
        return None;
    }
    Some((username.to_string(), password.to_string()))
}
