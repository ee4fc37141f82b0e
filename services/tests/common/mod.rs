//! Shared test utilities for integration tests.
//!
//! - seeded `MemoryUpstream` fixtures
//! - session token helpers
//! - `send` for one-shot requests against a router

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use cohort_services::{
    auth::generate_session_token,
    config::Config,
    routes,
    upstream::{MemoryUpstream, Resource},
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Must match `Config::new_for_test().jwt_secret()`.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-key-for-local-development";

pub fn session_token() -> String {
    generate_session_token("testuser", TEST_JWT_SECRET).expect("token should sign")
}

pub fn session_cookie() -> String {
    format!("cohort_session={}", session_token())
}

pub fn bearer() -> String {
    format!("Bearer {}", session_token())
}

/// Upstream seeded with a small pipeline: three contacts, two applications,
/// one thesis with startups.
pub fn seeded_upstream() -> MemoryUpstream {
    MemoryUpstream::new()
        .with_rows(
            Resource::Contacts,
            vec![
                json!({ "id": "p1", "name": "Ada", "type": "founder" }),
                json!({ "id": "p2", "name": "Grace", "type": "mentor" }),
                json!({ "id": "p3", "name": "Linus", "type": "founder" }),
            ],
        )
        .with_rows(
            Resource::Applications,
            vec![
                json!({
                    "id": "a1",
                    "evaluationStage": "sourcing",
                    "startup": { "id": "s1", "name": "Acme", "evaluationStage": "sourcing" }
                }),
                json!({
                    "id": "a2",
                    "evaluationStage": "screening",
                    "startup": { "id": "s2", "name": "Globex", "evaluationStage": "screening" }
                }),
            ],
        )
        .with_rows(
            Resource::Thesis,
            vec![json!({
                "id": "t1",
                "name": "Climate",
                "startups": [{ "name": "Acme", "evaluationStage": "sourcing" }]
            })],
        )
}

pub async fn create_test_app(upstream: MemoryUpstream) -> Router {
    routes(upstream, Config::new_for_test()).await
}

/// Sends one request; `body` is sent as JSON when present.
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    headers: &[(&str, String)],
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, value);
    }
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
