// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Warden.
//!
//! Mock authentication hooks with scripted behavior, for exercising the
//! pipeline and gateway without real credential stores.

pub mod delayed;
pub mod recording;

pub use delayed::DelayedHook;
pub use recording::{CallLog, HookBehavior, RecordingHook};

use std::sync::Arc;

use http::{HeaderMap, HeaderValue, Method, header::AUTHORIZATION};
use warden_core::{AuthenticationContext, RequestInfo};

/// Request metadata for `GET path` with an optional `Authorization` value.
pub fn request(path: &str, authorization: Option<&str>) -> Arc<RequestInfo> {
    let mut headers = HeaderMap::new();
    if let Some(value) = authorization
        && let Ok(value) = HeaderValue::from_str(value)
    {
        headers.insert(AUTHORIZATION, value);
    }
    Arc::new(RequestInfo::new(Method::GET, path, headers))
}

/// A fresh authenticate-phase context for [`request`].
pub fn auth_context(path: &str, authorization: Option<&str>) -> AuthenticationContext {
    AuthenticationContext::new(request(path, authorization))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_authorization() {
        let info = request("/x", Some("Bearer abc"));
        assert_eq!(info.path, "/x");
        let (scheme, value) = info.authorization().unwrap().unwrap();
        assert_eq!(scheme, "Bearer");
        assert_eq!(value, "abc");
    }

    #[test]
    fn context_starts_empty() {
        let ctx = auth_context("/", None);
        assert!(ctx.principal().is_none());
        assert!(!ctx.is_rejected());
        assert!(ctx.request().authorization().is_none());
    }
}
