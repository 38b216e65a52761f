// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by hooks, the pipeline, and hosts.

use http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::AuthError;

/// A verified identity attached to a request by an authentication hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable name of the caller (username, token subject, ...).
    pub name: String,
    /// Scheme that produced this identity, e.g. `Basic` or `Bearer`.
    pub scheme: String,
    /// Roles granted to the caller.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Principal {
    pub fn new(name: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scheme: scheme.into(),
            roles: Vec::new(),
        }
    }

    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Which of the two hook operations is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum HookPhase {
    Authenticate,
    Challenge,
}

/// The parts of an inbound request that hooks may inspect.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
}

impl RequestInfo {
    pub fn new(method: Method, path: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            method,
            path: path.into(),
            headers,
        }
    }

    /// Splits the `Authorization` header into scheme and credentials.
    ///
    /// Returns `None` when the header is absent. A header that is not valid
    /// visible ASCII, or that has no credentials part, is reported as malformed.
    pub fn authorization(&self) -> Option<Result<(&str, &str), AuthError>> {
        let value = self.headers.get(AUTHORIZATION)?;
        let parsed = value
            .to_str()
            .map_err(|_| AuthError::MalformedHeader {
                header: AUTHORIZATION.to_string(),
                reason: "not visible ASCII".to_string(),
            })
            .and_then(|raw| {
                raw.trim()
                    .split_once(' ')
                    .map(|(scheme, credentials)| (scheme, credentials.trim()))
                    .filter(|(_, credentials)| !credentials.is_empty())
                    .ok_or_else(|| AuthError::MalformedHeader {
                        header: AUTHORIZATION.to_string(),
                        reason: "expected `<scheme> <credentials>`".to_string(),
                    })
            });
        Some(parsed)
    }

    /// Returns the credentials part of the `Authorization` header when its
    /// scheme matches `scheme` (case-insensitive).
    pub fn credentials_for(&self, scheme: &str) -> Option<Result<&str, AuthError>> {
        match self.authorization()? {
            Ok((found, credentials)) if found.eq_ignore_ascii_case(scheme) => Some(Ok(credentials)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// A challenge a client can answer to authenticate, rendered as a
/// `WWW-Authenticate` header value such as `Basic realm="warden"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    scheme: String,
    params: Vec<(String, String)>,
}

impl Challenge {
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Renders the header value, quoting and escaping parameter values.
    pub fn render(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|(name, value)| {
                let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
                format!("{name}=\"{escaped}\"")
            })
            .collect::<Vec<_>>()
            .join(", ");

        if params.is_empty() {
            self.scheme.clone()
        } else {
            format!("{} {params}", self.scheme)
        }
    }
}

/// The response a host is about to produce, or the one a hook wants
/// produced instead of running the request handler.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl ActionResult {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED).with_body(reason)
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN).with_body(reason)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }

    /// Appends a `WWW-Authenticate` header for `challenge`.
    ///
    /// Existing challenges are kept so several filters can each offer theirs.
    pub fn add_challenge(&mut self, challenge: &Challenge) -> Result<(), AuthError> {
        let value = HeaderValue::try_from(challenge.render()).map_err(|e| {
            AuthError::MalformedHeader {
                header: WWW_AUTHENTICATE.to_string(),
                reason: e.to_string(),
            }
        })?;
        self.headers.append(WWW_AUTHENTICATE, value);
        Ok(())
    }

    /// All `WWW-Authenticate` values currently on the result.
    pub fn challenges(&self) -> Vec<&str> {
        self.headers
            .get_all(WWW_AUTHENTICATE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }
}

impl Default for ActionResult {
    fn default() -> Self {
        Self::ok()
    }
}
