#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use cohort_business::{BusinessConfig, HttpPageApi, PageApi};
use egui_kittest::Harness;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SESSION_TOKEN: &str = "session-token";

pub fn api_for(server: &MockServer) -> Arc<dyn PageApi> {
    Arc::new(HttpPageApi::new(
        BusinessConfig::new(server.uri()).with_session_token(SESSION_TOKEN),
    ))
}

pub fn envelope(data: Value, total_pages: u32, page: u32) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "data": data,
        "meta": {
            "totalPages": total_pages,
            "hasNextPage": page < total_pages,
            "hasPreviousPage": page > 1
        }
    }))
}

/// Answers every list route with an empty page.
pub async fn mount_empty_lists(server: &MockServer, resources: &[&str]) {
    for resource in resources {
        Mock::given(method("GET"))
            .and(path(format!("/api/{resource}")))
            .respond_with(envelope(json!([]), 0, 1))
            .mount(server)
            .await;
    }
}

/// Steps the harness until `is_idle` holds, letting the runtime make progress
/// between frames.
pub async fn settle<S>(harness: &mut Harness<'_, S>, is_idle: impl Fn(&S) -> bool) {
    for _ in 0..200 {
        harness.step();
        if is_idle(harness.state()) {
            // One more frame so the rendered tree reflects the settled state.
            harness.step();
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("harness did not settle");
}
