// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs configured filter pipelines end to end over both passes.

use std::sync::Arc;

use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use warden_config::load_and_validate_str;
use warden_core::{
    ActionResult, AuthenticationContext, AuthenticationOutcome, CancellationToken,
    ChallengeContext, FilterPipeline, RequestInfo,
};
use warden_filters::build_pipeline;

const CONFIG: &str = r#"
[auth]
realm = "corp"

[[auth.basic_users]]
username = "alice"
password = "wonderland"
roles = ["admin"]

[[auth.bearer_tokens]]
token = "tok-ci"
subject = "ci-bot"
"#;

fn pipeline() -> FilterPipeline {
    let config = load_and_validate_str(CONFIG).expect("test config is valid");
    build_pipeline(&config.auth)
}

fn context(authorization: Option<&str>) -> AuthenticationContext {
    let mut headers = HeaderMap::new();
    if let Some(value) = authorization {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    }
    AuthenticationContext::new(Arc::new(RequestInfo::new(Method::GET, "/v1/whoami", headers)))
}

/// Runs both passes and returns the outcome plus the challenged result.
async fn run(authorization: Option<&str>) -> (AuthenticationOutcome, ActionResult) {
    let pipeline = pipeline();
    let cancel = CancellationToken::new();
    let mut auth = context(authorization);

    let outcome = pipeline.authenticate(&mut auth, &cancel).await.unwrap();
    let result = match &outcome {
        AuthenticationOutcome::Rejected(result) => result.clone(),
        _ => ActionResult::ok(),
    };

    let principal = auth.principal().cloned();
    let mut challenge = ChallengeContext::new(auth.request_handle(), principal, result);
    pipeline.challenge(&mut challenge, &cancel).await.unwrap();
    (outcome, challenge.into_result())
}

#[tokio::test]
async fn basic_credentials_authenticate() {
    // "alice:wonderland"
    let (outcome, result) = run(Some("Basic YWxpY2U6d29uZGVybGFuZA==")).await;
    match outcome {
        AuthenticationOutcome::Authenticated(principal) => {
            assert_eq!(principal.name, "alice");
            assert!(principal.has_role("admin"));
        }
        other => panic!("expected alice, got {other:?}"),
    }
    assert_eq!(result.status, StatusCode::OK);
    assert!(result.challenges().is_empty());
}

#[tokio::test]
async fn bearer_token_authenticates() {
    let (outcome, _) = run(Some("Bearer tok-ci")).await;
    match outcome {
        AuthenticationOutcome::Authenticated(principal) => assert_eq!(principal.name, "ci-bot"),
        other => panic!("expected ci-bot, got {other:?}"),
    }
}

#[tokio::test]
async fn anonymous_request_gets_every_challenge() {
    let (outcome, result) = run(None).await;
    assert!(matches!(outcome, AuthenticationOutcome::Rejected(_)));
    assert_eq!(result.status, StatusCode::UNAUTHORIZED);
    assert_eq!(result.body.as_deref(), Some("authentication required"));
    assert_eq!(
        result.challenges(),
        vec![
            r#"Basic realm="corp", charset="UTF-8""#,
            r#"Bearer realm="corp""#,
        ]
    );
}

#[tokio::test]
async fn bad_bearer_token_is_rejected_with_invalid_token_challenge() {
    let (outcome, result) = run(Some("Bearer stolen")).await;
    assert!(matches!(outcome, AuthenticationOutcome::Rejected(_)));
    assert_eq!(result.body.as_deref(), Some("invalid bearer token"));
    assert!(result
        .challenges()
        .contains(&r#"Bearer realm="corp", error="invalid_token""#));
}
