//! Integration tests for the page renderer running against a mock data layer.

use cohort_business::{
    BusinessConfig, BusinessError, CellDisplay, HttpPageApi, PageApi, PageKind, PageRenderer,
    TableView, run_until_idle,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpPageApi {
    HttpPageApi::new(BusinessConfig::new(server.uri()).with_session_token("session-token"))
}

#[tokio::test]
async fn test_list_sends_bearer_and_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/companies"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "10"))
        .and(header("authorization", "Bearer session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "id": "c1", "organization": { "name": "Acme" }, "industry": "Energy" },
                { "id": "c2", "organization": { "name": "Globex" }, "industry": "Health" }
            ],
            "meta": { "totalPages": 3, "hasNextPage": true, "hasPreviousPage": false }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut renderer = PageRenderer::for_kind(PageKind::Companies);
    let first = renderer.mount();
    run_until_idle(&mut renderer, &api, first).await;

    let state = renderer.state();
    assert_eq!(state.rows.len(), 2);
    assert_eq!(state.meta.total_pages, 3);

    let view = TableView::new(&renderer.config().columns, state);
    assert_eq!(
        view.cells[0][0],
        CellDisplay::Avatar {
            name: "Acme".to_owned(),
            image_url: None
        }
    );
    assert!(view.can_next);
}

#[tokio::test]
async fn test_contacts_mount_applies_first_tab() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .and(query_param("type", "founder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "id": "p1", "name": "Ada", "type": "founder" }],
            "meta": { "totalPages": 1, "hasNextPage": false, "hasPreviousPage": false }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut renderer = PageRenderer::for_kind(PageKind::Contacts);
    let first = renderer.mount();
    run_until_idle(&mut renderer, &api, first).await;

    assert_eq!(renderer.state().active_tab.as_deref(), Some("founder"));
    assert_eq!(renderer.state().rows.len(), 1);
}

#[tokio::test]
async fn test_stage_edit_puts_merged_body_then_refetches() {
    let server = MockServer::start().await;
    let row = json!({
        "id": "a1",
        "evaluationStage": "sourcing",
        "startup": { "id": "s1", "name": "Acme" }
    });

    Mock::given(method("GET"))
        .and(path("/api/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [row],
            "meta": { "totalPages": 1, "hasNextPage": false, "hasPreviousPage": false }
        })))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/applications/a1"))
        .and(body_json(json!({
            "applications": { "evaluationStage": "screening" },
            "startup": { "evaluationStage": "screening", "id": "s1" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "id": "a1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut renderer = PageRenderer::for_kind(PageKind::Applications);
    let first = renderer.mount();
    run_until_idle(&mut renderer, &api, first).await;

    let edit = renderer
        .commit_edit(0, "evaluationStage", json!("screening"))
        .expect("row has an id");
    run_until_idle(&mut renderer, &api, edit).await;

    assert!(!renderer.state().is_loading);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/companies"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "id": "c1" }],
            "meta": { "totalPages": 2, "hasNextPage": true, "hasPreviousPage": false }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/companies"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut renderer = PageRenderer::for_kind(PageKind::Companies);
    let first = renderer.mount();
    run_until_idle(&mut renderer, &api, first).await;

    let next = renderer.next_page().expect("page 2 exists");
    run_until_idle(&mut renderer, &api, next).await;

    let state = renderer.state();
    assert_eq!(state.current_page, 1);
    assert_eq!(state.rows.len(), 1);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/thesis/missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Thesis not found"
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.get("/api/thesis/missing", &[]).await.unwrap_err();
    assert_eq!(err, BusinessError::NotFound("Thesis not found".to_owned()));
}
