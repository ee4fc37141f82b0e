use crate::config::Config;
use crate::upstream::Upstream;
use axum::{
    Router,
    extract::{Extension, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{any, get},
};
use cohort_utils::version_info::{RuntimeEnv, format_version_for_runtime_env};
use opentelemetry::{global, propagation::Extractor};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub mod api;
pub mod auth;
pub mod config;
pub mod openapi;
pub mod session_auth;
pub mod telemetry;
pub mod upstream;
pub mod v1;

/// State shared by every route.
#[derive(Clone)]
pub struct AppState<U> {
    pub upstream: U,
}

impl<U> AppState<U> {
    pub fn new(upstream: U) -> Self {
        Self { upstream }
    }
}

struct HeaderExtractor<'a>(&'a axum::http::HeaderMap);

impl<'a> Extractor for HeaderExtractor<'a> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

/// Builds the service router on top of `upstream`.
pub async fn routes<U>(upstream: U, config: Config) -> Router
where
    U: Upstream,
{
    let state = AppState::new(upstream);

    let mut router = Router::new()
        .route("/is-health", get(health_check::<U>))
        .nest("/api", api::routes::<U>())
        .nest("/v1", v1::routes::<U>());

    if let Some(docs) = openapi::create_openapi_routes::<U>(&config) {
        router = router.merge(docs);
    }

    router
        .fallback(any(catch_all))
        .layer(ServiceBuilder::new().layer(Extension(config)).layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let parent_context = global::get_text_map_propagator(|propagator| {
                    propagator.extract(&HeaderExtractor(request.headers()))
                });

                let span = tracing::info_span!(
                    "http_request",
                    http_request.method = ?request.method(),
                    http_request.uri = ?request.uri(),
                    http_request.version = ?request.version(),
                    http_request.user_agent = ?request.headers().get(axum::http::header::USER_AGENT),
                );

                span.set_parent(parent_context);

                span
            }),
        ))
        .with_state(state)
}

async fn health_check<U>(
    State(state): State<AppState<U>>,
    Extension(config): Extension<Config>,
) -> impl IntoResponse
where
    U: Upstream,
{
    let mut response = if state.upstream.is_reachable().await {
        (StatusCode::OK, "OK").into_response()
    } else {
        (StatusCode::BAD_GATEWAY, "502").into_response()
    };

    let env_value = config.environment().to_string();
    if let Ok(value) = HeaderValue::from_str(&env_value) {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-service-env"), value);
    }

    let runtime_env: RuntimeEnv = config.environment().into();
    let version_value = format_version_for_runtime_env(runtime_env);
    if let Ok(value) = HeaderValue::from_str(&version_value) {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-service-version"), value);
    }

    response
}

async fn catch_all() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}
