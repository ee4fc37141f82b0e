//! Public V1 API.
//!
//! - `applications` - startup applications and their evaluations
//! - `companies` - organizations
//! - `contacts` - founders, mentors and investors
//! - `theses` - investment theses / programs
//! - `types` - shared types (pagination, error responses)
//!
//! Reads pass through to the upstream backend. Writes and a few detail
//! endpoints are documented but answer `501 Not Implemented`.

pub mod applications;
pub mod companies;
pub mod contacts;
pub mod theses;
pub mod types;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::AppState;
use crate::config::Config;
use crate::session_auth::RequireAuth;
use crate::upstream::{ListQuery, Resource, Upstream, UpstreamError};
use types::{V1ErrorResponse, V1ListQuery, V1Paginated};

/// Creates the V1 API router with all endpoints.
pub fn routes<U>() -> Router<AppState<U>>
where
    U: Upstream + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/applications",
            get(applications::v1_applications_list::<U>)
                .post(applications::v1_applications_create),
        )
        .route(
            "/applications/{id}",
            get(applications::v1_applications_get::<U>)
                .patch(applications::v1_applications_update),
        )
        .route(
            "/applications/{id}/evaluations",
            get(applications::v1_applications_evaluations),
        )
        .route(
            "/companies",
            get(companies::v1_companies_list::<U>).post(companies::v1_companies_create),
        )
        .route("/companies/{id}", get(companies::v1_companies_get))
        .route(
            "/contacts",
            get(contacts::v1_contacts_list::<U>).post(contacts::v1_contacts_create),
        )
        .route("/theses", get(theses::v1_theses_list::<U>))
        .route("/theses/{id}", get(theses::v1_theses_get))
}

/// 501 response for documented endpoints without a backing implementation.
pub(crate) fn not_implemented(operation: &str) -> Response {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(V1ErrorResponse::not_implemented(format!(
            "{operation} is not implemented yet"
        ))),
    )
        .into_response()
}

pub(crate) fn upstream_failure(what: &str, err: &UpstreamError) -> Response {
    match err {
        UpstreamError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(V1ErrorResponse::not_found(format!("{what} not found"))),
        )
            .into_response(),
        other => {
            tracing::error!("Failed to load {}: {}", what, other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(V1ErrorResponse::internal_error(format!(
                    "Failed to load {what}"
                ))),
            )
                .into_response()
        }
    }
}

/// Passthrough for the paginated list endpoints.
pub(crate) async fn list_resource<U>(
    upstream: &U,
    resource: Resource,
    auth: &RequireAuth,
    query: &V1ListQuery,
    config: &Config,
) -> Response
where
    U: Upstream,
{
    let (page, page_size) = query.resolve(config.default_page_size());
    let list = ListQuery::new(page, page_size);

    match upstream.list(resource, &list, auth.upstream_token()).await {
        Ok(result) => (
            StatusCode::OK,
            Json(V1Paginated::from_upstream(page, page_size, result)),
        )
            .into_response(),
        Err(e) => upstream_failure(resource.as_str(), &e),
    }
}
