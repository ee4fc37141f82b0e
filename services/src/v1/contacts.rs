//! /v1/contacts endpoint handlers.

use axum::{
    Extension,
    extract::{Query, State},
    response::Response,
};

use super::types::{V1ErrorResponse, V1ListQuery, V1Paginated};
use super::{list_resource, not_implemented};
use crate::AppState;
use crate::config::Config;
use crate::session_auth::RequireAuth;
use crate::upstream::{Resource, Upstream};

/// List contacts.
#[utoipa::path(
    get,
    path = "/v1/contacts",
    tag = "contacts",
    params(V1ListQuery),
    responses(
        (status = 200, description = "One page of contacts", body = V1Paginated),
        (status = 401, description = "Unauthorized", body = V1ErrorResponse),
        (status = 500, description = "Internal server error", body = V1ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn v1_contacts_list<U>(
    State(state): State<AppState<U>>,
    Extension(config): Extension<Config>,
    auth: RequireAuth,
    Query(query): Query<V1ListQuery>,
) -> Response
where
    U: Upstream,
{
    list_resource(&state.upstream, Resource::Contacts, &auth, &query, &config).await
}

/// Add a contact.
#[utoipa::path(
    post,
    path = "/v1/contacts",
    tag = "contacts",
    responses(
        (status = 501, description = "Not implemented", body = V1ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn v1_contacts_create() -> Response {
    not_implemented("Creating contacts")
}
