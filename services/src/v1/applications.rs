//! /v1/applications endpoint handlers.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::{V1ErrorResponse, V1ListQuery, V1Paginated};
use super::{list_resource, not_implemented, upstream_failure};
use crate::AppState;
use crate::config::Config;
use crate::session_auth::RequireAuth;
use crate::upstream::{Resource, Upstream};

/// List startup applications.
#[utoipa::path(
    get,
    path = "/v1/applications",
    tag = "applications",
    params(V1ListQuery),
    responses(
        (status = 200, description = "One page of applications", body = V1Paginated),
        (status = 401, description = "Unauthorized", body = V1ErrorResponse),
        (status = 500, description = "Internal server error", body = V1ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn v1_applications_list<U>(
    State(state): State<AppState<U>>,
    Extension(config): Extension<Config>,
    auth: RequireAuth,
    Query(query): Query<V1ListQuery>,
) -> Response
where
    U: Upstream,
{
    list_resource(&state.upstream, Resource::Applications, &auth, &query, &config).await
}

/// Get one application.
#[utoipa::path(
    get,
    path = "/v1/applications/{id}",
    tag = "applications",
    params(
        ("id" = String, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "The application", body = serde_json::Value),
        (status = 401, description = "Unauthorized", body = V1ErrorResponse),
        (status = 404, description = "Application not found", body = V1ErrorResponse),
        (status = 500, description = "Internal server error", body = V1ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn v1_applications_get<U>(
    State(state): State<AppState<U>>,
    auth: RequireAuth,
    Path(id): Path<String>,
) -> Response
where
    U: Upstream,
{
    match state
        .upstream
        .get(Resource::Applications, &id, auth.upstream_token())
        .await
    {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(e) => upstream_failure("application", &e),
    }
}

/// Submit an application.
#[utoipa::path(
    post,
    path = "/v1/applications",
    tag = "applications",
    responses(
        (status = 501, description = "Not implemented", body = V1ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn v1_applications_create() -> Response {
    not_implemented("Creating applications")
}

/// Update an application.
#[utoipa::path(
    patch,
    path = "/v1/applications/{id}",
    tag = "applications",
    params(
        ("id" = String, Path, description = "Application id")
    ),
    responses(
        (status = 501, description = "Not implemented", body = V1ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn v1_applications_update(Path(_id): Path<String>) -> Response {
    not_implemented("Updating applications")
}

/// List the evaluations of an application.
#[utoipa::path(
    get,
    path = "/v1/applications/{id}/evaluations",
    tag = "applications",
    params(
        ("id" = String, Path, description = "Application id")
    ),
    responses(
        (status = 501, description = "Not implemented", body = V1ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn v1_applications_evaluations(Path(_id): Path<String>) -> Response {
    not_implemented("Listing evaluations")
}
