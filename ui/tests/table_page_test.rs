//! A table page driven end to end: widget intents, renderer, driver, HTTP.

mod common;

use cohort_business::PageKind;
use cohort_ui::pages::TablePage;
use cohort_ui::widgets::TableIntent;
use common::{api_for, envelope, settle};
use egui_kittest::Harness;
use kittest::Queryable;
use serde_json::json;
use tokio::runtime::Handle;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn harness_for<'a>(page: TablePage) -> Harness<'a, TablePage> {
    Harness::new_ui_state(|ui, page: &mut TablePage| page.ui(ui), page)
}

fn idle(page: &TablePage) -> bool {
    !page.is_loading()
}

/// Row ids as loaded by the renderer. Rows are checked on the state rather
/// than through table labels, which kittest finds unreliably in `TableBuilder`.
fn row_ids(page: &TablePage) -> Vec<String> {
    page.renderer()
        .state()
        .rows
        .iter()
        .filter_map(|row| row.id())
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_contacts_page_shows_first_tab() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .and(query_param("type", "founder"))
        .and(header("authorization", "Bearer session-token"))
        .respond_with(envelope(
            json!([{ "id": "p1", "name": "Ada", "email": "ada@example.com", "type": "founder" }]),
            1,
            1,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let page = TablePage::new(PageKind::Contacts, 10, api_for(&server), Handle::current());
    let mut harness = harness_for(page);
    settle(&mut harness, idle).await;

    assert_eq!(row_ids(harness.state()), ["p1"]);
    assert!(harness.query_by_label("Founders").is_some(), "tabs should render");
    assert!(harness.query_by_label("Page 1 of 1").is_some());
    assert_eq!(
        harness.state().renderer().state().active_tab.as_deref(),
        Some("founder")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tab_click_refetches_with_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .and(query_param("type", "founder"))
        .respond_with(envelope(json!([{ "id": "p1", "name": "Ada" }]), 1, 1))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .and(query_param("type", "mentor"))
        .respond_with(envelope(json!([{ "id": "p2", "name": "Grace" }]), 1, 1))
        .expect(1)
        .mount(&server)
        .await;

    let page = TablePage::new(PageKind::Contacts, 10, api_for(&server), Handle::current());
    let mut harness = harness_for(page);
    settle(&mut harness, idle).await;

    harness.get_by_label("Mentors").click();
    harness.step();
    settle(&mut harness, idle).await;

    assert_eq!(row_ids(harness.state()), ["p2"]);
    assert_eq!(
        harness.state().renderer().state().active_tab.as_deref(),
        Some("mentor")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_next_button_loads_second_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/companies"))
        .and(query_param("page", "1"))
        .respond_with(envelope(
            json!([{ "id": "c1", "organization": { "name": "Acme" } }]),
            2,
            1,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/companies"))
        .and(query_param("page", "2"))
        .respond_with(envelope(
            json!([{ "id": "c2", "organization": { "name": "Globex" } }]),
            2,
            2,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let page = TablePage::new(PageKind::Companies, 1, api_for(&server), Handle::current());
    let mut harness = harness_for(page);
    settle(&mut harness, idle).await;
    assert!(harness.query_by_label("Page 1 of 2").is_some());

    harness.get_by_label("Next").click();
    harness.step();
    settle(&mut harness, idle).await;

    assert_eq!(row_ids(harness.state()), ["c2"]);
    assert!(harness.query_by_label("Page 2 of 2").is_some());
    assert_eq!(harness.state().renderer().state().current_page, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_previous_is_ignored_on_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/companies"))
        .respond_with(envelope(json!([{ "id": "c1" }]), 3, 1))
        .expect(1)
        .mount(&server)
        .await;

    let page = TablePage::new(PageKind::Companies, 10, api_for(&server), Handle::current());
    let mut harness = harness_for(page);
    settle(&mut harness, idle).await;

    harness.state_mut().handle(TableIntent::PreviousPage);
    settle(&mut harness, idle).await;

    assert_eq!(harness.state().renderer().state().current_page, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_stage_edit_puts_and_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/applications"))
        .respond_with(envelope(
            json!([{
                "id": "a1",
                "evaluationStage": "sourcing",
                "startup": { "id": "s1", "name": "Acme" }
            }]),
            1,
            1,
        ))
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

    let page = TablePage::new(PageKind::Applications, 10, api_for(&server), Handle::current());
    let mut harness = harness_for(page);
    settle(&mut harness, idle).await;

    harness.state_mut().handle(TableIntent::Edit {
        row: 0,
        accessor: "evaluationStage".to_owned(),
        value: "screening".to_owned(),
    });
    settle(&mut harness, idle).await;

    // Expectations on the mocks are verified when the server drops.
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_failed_fetch_shows_empty_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/companies"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let page = TablePage::new(PageKind::Companies, 10, api_for(&server), Handle::current());
    let mut harness = harness_for(page);
    settle(&mut harness, idle).await;

    assert!(harness.query_by_label("No results").is_some());
    assert!(harness.state().renderer().state().rows.is_empty());
}
