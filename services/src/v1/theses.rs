//! /v1/theses endpoint handlers.

use axum::{
    Extension,
    extract::{Path, Query, State},
    response::Response,
};

use super::types::{V1ErrorResponse, V1ListQuery, V1Paginated};
use super::{list_resource, not_implemented};
use crate::AppState;
use crate::config::Config;
use crate::session_auth::RequireAuth;
use crate::upstream::{Resource, Upstream};

/// List investment theses.
#[utoipa::path(
    get,
    path = "/v1/theses",
    tag = "theses",
    params(V1ListQuery),
    responses(
        (status = 200, description = "One page of theses", body = V1Paginated),
        (status = 401, description = "Unauthorized", body = V1ErrorResponse),
        (status = 500, description = "Internal server error", body = V1ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn v1_theses_list<U>(
    State(state): State<AppState<U>>,
    Extension(config): Extension<Config>,
    auth: RequireAuth,
    Query(query): Query<V1ListQuery>,
) -> Response
where
    U: Upstream,
{
    list_resource(&state.upstream, Resource::Thesis, &auth, &query, &config).await
}

/// Get one thesis.
#[utoipa::path(
    get,
    path = "/v1/theses/{id}",
    tag = "theses",
    params(
        ("id" = String, Path, description = "Thesis id")
    ),
    responses(
        (status = 501, description = "Not implemented", body = V1ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn v1_theses_get(Path(_id): Path<String>) -> Response {
    not_implemented("Fetching a thesis")
}
