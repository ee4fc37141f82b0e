//! Integration tests for the public V1 API and its documentation routes.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use cohort_services::{
    config::{Config, Env},
    routes,
    upstream::MemoryUpstream,
};
use common::{seeded_upstream, session_token};
use serde_json::Value;

async fn server_with(upstream: MemoryUpstream, config: Config) -> TestServer {
    TestServer::new(routes(upstream, config).await).unwrap()
}

async fn server() -> TestServer {
    server_with(seeded_upstream(), Config::new_for_test()).await
}

#[tokio::test]
async fn test_v1_list_requires_auth() {
    let server = server().await;

    let response = server.get("/v1/contacts").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_v1_contacts_pagination_shape() {
    let server = server().await;

    let response = server
        .get("/v1/contacts")
        .add_query_param("page", 2)
        .add_query_param("pageSize", 2)
        .authorization_bearer(session_token())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["id"], "p3");
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 2);
    assert_eq!(body["pageSize"], 2);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["hasNext"], false);
    assert_eq!(body["hasPrev"], true);
}

#[tokio::test]
async fn test_v1_page_size_is_clamped() {
    let server = server().await;

    let response = server
        .get("/v1/applications")
        .add_query_param("pageSize", 500)
        .authorization_bearer(session_token())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["pageSize"], 100);
    assert_eq!(body["page"], 1);
}

#[tokio::test]
async fn test_v1_application_get_passthrough() {
    let server = server().await;

    let response = server
        .get("/v1/applications/a2")
        .authorization_bearer(session_token())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["startup"]["name"], "Globex");
}

#[tokio::test]
async fn test_v1_application_get_unknown_is_not_found() {
    let server = server().await;

    let response = server
        .get("/v1/applications/missing")
        .authorization_bearer(session_token())
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_v1_stubs_answer_not_implemented() {
    let server = server().await;
    let token = session_token();

    let responses = [
        server.post("/v1/applications").authorization_bearer(&token).await,
        server.patch("/v1/applications/a1").authorization_bearer(&token).await,
        server
            .get("/v1/applications/a1/evaluations")
            .authorization_bearer(&token)
            .await,
        server.post("/v1/companies").authorization_bearer(&token).await,
        server.get("/v1/companies/c1").authorization_bearer(&token).await,
        server.post("/v1/contacts").authorization_bearer(&token).await,
        server.get("/v1/theses/t1").authorization_bearer(&token).await,
    ];

    for response in responses {
        response.assert_status(StatusCode::NOT_IMPLEMENTED);
        let body: Value = response.json();
        assert_eq!(body["error"], "not_implemented");
    }
}

#[tokio::test]
async fn test_openapi_served_outside_prod() {
    let server = server().await;

    let response = server.get("/openapi.json").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["paths"]["/v1/applications"].is_object());
    assert!(body["paths"]["/v1/theses/{id}"].is_object());
}

#[tokio::test]
async fn test_openapi_hidden_in_prod() {
    let server = server_with(seeded_upstream(), Config::new_for_test_with_env(Env::Prod)).await;

    server.get("/openapi.json").await.assert_status_not_found();
    server.get("/docs").await.assert_status_not_found();
}
