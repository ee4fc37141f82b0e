//! /v1/companies endpoint handlers.

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

/// List companies.
#[utoipa::path(
    get,
    path = "/v1/companies",
    tag = "companies",
    params(V1ListQuery),
    responses(
        (status = 200, description = "One page of companies", body = V1Paginated),
        (status = 401, description = "Unauthorized", body = V1ErrorResponse),
        (status = 500, description = "Internal server error", body = V1ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn v1_companies_list<U>(
    State(state): State<AppState<U>>,
    Extension(config): Extension<Config>,
    auth: RequireAuth,
    Query(query): Query<V1ListQuery>,
) -> Response
where
    U: Upstream,
{
    list_resource(&state.upstream, Resource::Companies, &auth, &query, &config).await
}

/// Register a company.
#[utoipa::path(
    post,
    path = "/v1/companies",
    tag = "companies",
    responses(
        (status = 501, description = "Not implemented", body = V1ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn v1_companies_create() -> Response {
    not_implemented("Creating companies")
}

/// Get one company.
#[utoipa::path(
    get,
    path = "/v1/companies/{id}",
    tag = "companies",
    params(
        ("id" = String, Path, description = "Company id")
    ),
    responses(
        (status = 501, description = "Not implemented", body = V1ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn v1_companies_get(Path(_id): Path<String>) -> Response {
    not_implemented("Fetching a company")
}
