//! Session and upstream JWTs.
//!
//! The dashboard session token is an HS256 JWT signed with `JWT_SECRET`.
//! Handlers never forward it: each upstream call carries a short-lived token
//! minted by [`exchange_session_token`] and signed with `UPSTREAM_JWT_SECRET`.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// `iss` of session tokens.
pub const ISSUER: &str = "cohort";

/// `iss` of tokens sent to the upstream backend.
pub const UPSTREAM_ISSUER: &str = "cohort-services";

/// Session lifetime in seconds.
pub const SESSION_TTL_SECS: i64 = 60 * 60 * 12;

/// Upstream token lifetime in seconds.
pub const UPSTREAM_TTL_SECS: i64 = 60 * 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Username.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

/// Claims of the bearer token the upstream backend verifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

fn sign<T: Serialize>(claims: &T, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Issues a session token for `username`.
pub fn generate_session_token(
    username: &str,
    jwt_secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: username.to_owned(),
        iat: now,
        exp: now + SESSION_TTL_SECS,
        iss: ISSUER.to_owned(),
    };
    sign(&claims, jwt_secret)
}

/// Validate a session JWT token and return the claims.
pub fn validate_session_token(token: &str, jwt_secret: &str) -> Result<SessionClaims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;

    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Token has expired".to_owned(),
        jsonwebtoken::errors::ErrorKind::InvalidSignature => "Invalid token signature".to_owned(),
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => "Invalid token issuer".to_owned(),
        _ => format!("Token validation failed: {e}"),
    })?;

    Ok(token_data.claims)
}

/// Mints the upstream bearer token for a validated session.
pub fn exchange_session_token(
    claims: &SessionClaims,
    upstream_secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    // Never outlive the session it was derived from.
    let exp = (now + UPSTREAM_TTL_SECS).min(claims.exp);
    let upstream = UpstreamClaims {
        sub: claims.sub.clone(),
        iat: now,
        exp,
        iss: UPSTREAM_ISSUER.to_owned(),
    };
    sign(&upstream, upstream_secret)
}
