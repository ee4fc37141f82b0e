//! Dashboard data routes: `/api/{resource}` forwarded to the upstream backend.
//!
//! Responses keep the dashboard envelope `{success, data, meta?}`; failures
//! answer `{success: false, error}` with a fixed message, details go to the log.

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::AppState;
use crate::config::{Config, MAX_PAGE_SIZE};
use crate::session_auth::RequireAuth;
use crate::upstream::{ListQuery, Resource, Upstream, UpstreamError, UpstreamMeta};

#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<UpstreamMeta>,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
}

fn ok(data: Value, meta: Option<UpstreamMeta>) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data,
            meta,
        }),
    )
        .into_response()
}

fn fail(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ApiErrorResponse {
            success: false,
            error: error.into(),
        }),
    )
        .into_response()
}

fn resolve(raw: &str) -> Result<Resource, Response> {
    Resource::parse(raw)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, format!("Unknown resource: {raw}")))
}

fn upstream_failure(action: &str, resource: Resource, err: &UpstreamError) -> Response {
    match err {
        UpstreamError::NotFound(reason) => {
            tracing::debug!("{} {} not found: {}", action, resource.as_str(), reason);
            fail(StatusCode::NOT_FOUND, "Not found")
        }
        other => {
            tracing::error!("Failed to {} {}: {}", action, resource.as_str(), other);
            fail(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to {action} {}", resource.as_str()),
            )
        }
    }
}

/// Splits `page`/`pageSize` from the rest of the query; the rest become filters.
pub fn list_query(params: Vec<(String, String)>, default_page_size: u32) -> ListQuery {
    let mut page = 1;
    let mut page_size = default_page_size;
    let mut filters = Vec::new();

    for (key, value) in params {
        match key.as_str() {
            "page" => page = value.parse().unwrap_or(1),
            "pageSize" => page_size = value.parse().unwrap_or(default_page_size),
            _ if value.is_empty() => {}
            _ => filters.push((key, value)),
        }
    }

    ListQuery {
        page: page.max(1),
        page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        filters,
    }
}

pub fn routes<U>() -> Router<AppState<U>>
where
    U: Upstream,
{
    Router::new()
        .route("/{resource}", get(list::<U>))
        .route("/{resource}/{id}", get(get_one::<U>).put(update::<U>))
}

async fn list<U>(
    State(state): State<AppState<U>>,
    Extension(config): Extension<Config>,
    auth: RequireAuth,
    Path(resource): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response
where
    U: Upstream,
{
    let resource = match resolve(&resource) {
        Ok(resource) => resource,
        Err(response) => return response,
    };
    let query = list_query(params, config.default_page_size());

    match state
        .upstream
        .list(resource, &query, auth.upstream_token())
        .await
    {
        Ok(page) => {
            let meta = page.meta.unwrap_or_else(|| {
                let count = page.data.as_array().map_or(0, Vec::len) as u64;
                UpstreamMeta::for_page(query.page, query.page_size, count)
            });
            ok(page.data, Some(meta))
        }
        Err(e) => upstream_failure("list", resource, &e),
    }
}

async fn get_one<U>(
    State(state): State<AppState<U>>,
    auth: RequireAuth,
    Path((resource, id)): Path<(String, String)>,
) -> Response
where
    U: Upstream,
{
    let resource = match resolve(&resource) {
        Ok(resource) => resource,
        Err(response) => return response,
    };

    match state
        .upstream
        .get(resource, &id, auth.upstream_token())
        .await
    {
        Ok(data) => ok(data, None),
        Err(e) => upstream_failure("fetch", resource, &e),
    }
}

async fn update<U>(
    State(state): State<AppState<U>>,
    auth: RequireAuth,
    Path((resource, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response
where
    U: Upstream,
{
    let resource = match resolve(&resource) {
        Ok(resource) => resource,
        Err(response) => return response,
    };
    tracing::info!(user = auth.username(), resource = resource.as_str(), %id, "update");

    match state
        .upstream
        .put(resource, &id, &body, auth.upstream_token())
        .await
    {
        Ok(data) => ok(data, None),
        Err(e) => upstream_failure("update", resource, &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_list_query_extracts_filters() {
        let query = list_query(
            params(&[("page", "2"), ("pageSize", "20"), ("type", "founder")]),
            10,
        );

        assert_eq!(query.page, 2);
        assert_eq!(query.page_size, 20);
        assert_eq!(query.filters, params(&[("type", "founder")]));
    }

    #[test]
    fn test_list_query_defaults_and_bounds() {
        let query = list_query(params(&[("page", "0"), ("pageSize", "1000")]), 10);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, MAX_PAGE_SIZE);

        let query = list_query(params(&[("page", "x"), ("type", "")]), 10);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 10);
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_unknown_resource_is_not_found() {
        let response = resolve("invoices").unwrap_err();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
