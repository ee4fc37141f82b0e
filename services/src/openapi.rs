//! OpenAPI documentation for the public V1 API.
//!
//! Served at `/openapi.json` and `/docs` (Scalar) everywhere except prod.

use axum::{Router, routing::get};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::AppState;
use crate::config::{Config, Env};
use crate::upstream::Upstream;
use crate::v1::{applications, companies, contacts, theses, types};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cohort API",
        version = "1.0.0",
        description = "Public API of the cohort accelerator pipeline",
        license(
            name = "MIT",
            identifier = "MIT"
        )
    ),
    tags(
        (name = "applications", description = "Startup applications and evaluations"),
        (name = "companies", description = "Organizations in the pipeline"),
        (name = "contacts", description = "Founders, mentors and investors"),
        (name = "theses", description = "Investment theses and programs"),
    ),
    paths(
        // Applications
        applications::v1_applications_list,
        applications::v1_applications_get,
        applications::v1_applications_create,
        applications::v1_applications_update,
        applications::v1_applications_evaluations,
        // Companies
        companies::v1_companies_list,
        companies::v1_companies_create,
        companies::v1_companies_get,
        // Contacts
        contacts::v1_contacts_list,
        contacts::v1_contacts_create,
        // Theses
        theses::v1_theses_list,
        theses::v1_theses_get,
    ),
    components(
        schemas(
            types::V1ErrorResponse,
            types::V1Paginated,
        ),
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

/// Security scheme addon for Bearer authentication.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = &mut openapi.components {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session JWT, the same token the dashboard holds"))
                        .build(),
                ),
            );
        }
    }
}

pub fn is_openapi_enabled(config: &Config) -> bool {
    !matches!(config.environment(), Env::Prod)
}

/// `/docs` and `/openapi.json`, or `None` where documentation is disabled.
pub fn create_openapi_routes<U>(config: &Config) -> Option<Router<AppState<U>>>
where
    U: Upstream,
{
    if !is_openapi_enabled(config) {
        return None;
    }

    let api = ApiDoc::openapi();
    let api_clone = api.clone();

    let routes = Router::new()
        .route(
            "/openapi.json",
            get(move || async move { axum::Json(api_clone) }),
        )
        .merge(Scalar::with_url("/docs", api));

    Some(routes)
}
