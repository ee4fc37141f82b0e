//! Session-based JWT authentication for protected routes.
//!
//! `RequireAuth` accepts the session JWT either as `Authorization: Bearer <token>`
//! (public `/v1` API, native dashboard) or in the session cookie (browser
//! dashboard). The bearer header wins when both are present.
//!
//! ```rust,ignore
//! use cohort_services::session_auth::RequireAuth;
//!
//! async fn protected_handler(auth: RequireAuth) -> impl IntoResponse {
//!     format!("Hello, {}!", auth.username())
//! }
//! ```

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::auth::{SessionClaims, exchange_session_token, validate_session_token};
use crate::config::Config;

/// Authenticated caller extracted from a valid session JWT.
///
/// Carries the upstream bearer token derived from the session so handlers can
/// call the backend directly.
#[derive(Debug, Clone)]
pub struct RequireAuth {
    claims: SessionClaims,
    upstream_token: String,
}

impl RequireAuth {
    pub fn username(&self) -> &str {
        &self.claims.sub
    }

    pub fn claims(&self) -> &SessionClaims {
        &self.claims
    }

    /// Bearer token for the upstream backend.
    pub fn upstream_token(&self) -> &str {
        &self.upstream_token
    }
}

#[derive(Debug, Serialize)]
pub struct SessionAuthError {
    #[serde(skip)]
    status: StatusCode,
    pub error: String,
    pub message: String,
}

impl SessionAuthError {
    fn unauthorized(error: &str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: error.to_owned(),
            message: message.into(),
        }
    }

    fn missing_token() -> Self {
        Self::unauthorized(
            "missing_token",
            "A session cookie or Authorization: Bearer token is required",
        )
    }

    fn invalid_format() -> Self {
        Self::unauthorized(
            "invalid_format",
            "Authorization header must be in format: Bearer <token>",
        )
    }

    fn invalid_token(reason: impl Into<String>) -> Self {
        Self::unauthorized("invalid_token", reason)
    }

    fn server_error() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: "server_error".to_owned(),
            message: "Server configuration error".to_owned(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for SessionAuthError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Extract the Bearer token from the Authorization header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header_value = headers.get(AUTHORIZATION)?;
    let header_str = header_value.to_str().ok()?;

    let stripped = header_str.strip_prefix("Bearer ")?;
    if stripped.is_empty() {
        return None;
    }
    Some(stripped)
}

/// Value of the session cookie `name`, if set and non-empty.
pub fn extract_session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    jar.get(name)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
}

fn session_token(parts: &Parts, config: &Config) -> Result<String, SessionAuthError> {
    if let Some(token) = extract_bearer_token(&parts.headers) {
        return Ok(token.to_owned());
    }
    if let Some(token) = extract_session_cookie(&parts.headers, config.session_cookie_name()) {
        return Ok(token);
    }
    if parts.headers.get(AUTHORIZATION).is_some() {
        Err(SessionAuthError::invalid_format())
    } else {
        Err(SessionAuthError::missing_token())
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = SessionAuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let config = parts
            .extensions
            .get::<Config>()
            .ok_or_else(SessionAuthError::server_error)?;

        let token = session_token(parts, config)?;
        let claims = validate_session_token(&token, config.jwt_secret())
            .map_err(SessionAuthError::invalid_token)?;

        let upstream_token = exchange_session_token(&claims, config.upstream_jwt_secret())
            .map_err(|e| {
                tracing::error!("Failed to mint upstream token: {}", e);
                SessionAuthError::server_error()
            })?;

        Ok(RequireAuth {
            claims,
            upstream_token,
        })
    }
}
