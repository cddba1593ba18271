//! # Custom Extractors
//!
//! [`AuthUser`] is the authentication guard for protected routes. It runs
//! before the handler body is parsed, so an unauthenticated request is
//! rejected with 401 regardless of its payload.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use domains::{CallerIdentity, DomainError};

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller of the current request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub CallerIdentity);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let identity = state.auth.authenticate(token)?;
        Ok(Self(identity))
    }
}

/// Extracts the token from `Authorization: Bearer <token>`.
/// The scheme name is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, DomainError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| DomainError::unauthorized("missing bearer token"))?
        .to_str()
        .map_err(|_| DomainError::unauthorized("malformed authorization header"))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| DomainError::unauthorized("malformed authorization header"))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(DomainError::unauthorized("unsupported authorization scheme"));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(DomainError::unauthorized("missing bearer token"));
    }
    Ok(token)
}
