//! Token extraction for axum handlers.
//!
//! Tokens are accepted from three sources, in priority order: the `jwt`
//! cookie (with `token` as a fallback name), the `Authorization: Bearer`
//! header, and finally a `token` query parameter.

use std::ops::Deref;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header;
use axum::http::request::Parts;

use crate::auth::token::Claims;
use crate::error::ApiError;
use crate::state::AppState;

/// Verified claims of the calling principal. Adding this extractor to a
/// handler makes the route require authentication.
#[derive(Debug, Clone)]
pub struct AuthClaims(pub Claims);

impl Deref for AuthClaims {
    type Target = Claims;

    fn deref(&self) -> &Claims {
        &self.0
    }
}

/// The raw token string, extracted but not verified. Used by the refresh
/// endpoint, which must accept tokens whose expiry has already passed.
#[derive(Debug, Clone)]
pub struct RawToken(pub String);

fn cookie_value(parts: &Parts, name: &str) -> Option<String> {
    let header = parts.headers.get(header::COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}

fn bearer_value(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn query_value(parts: &Parts, name: &str) -> Option<String> {
    parts.uri.query()?.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}

/// Applies the extraction priority; `None` when no source carried a token.
pub fn token_from_parts(parts: &Parts) -> Option<String> {
    cookie_value(parts, "jwt")
        .or_else(|| cookie_value(parts, "token"))
        .or_else(|| bearer_value(parts))
        .or_else(|| query_value(parts, "token"))
}

impl<S> FromRequestParts<S> for RawToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        token_from_parts(parts)
            .map(RawToken)
            .ok_or_else(|| ApiError::Unauthorized("missing authentication token".into()))
    }
}

impl<S> FromRequestParts<S> for AuthClaims
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = Arc::<AppState>::from_ref(state);
        let token = token_from_parts(parts)
            .ok_or_else(|| ApiError::Unauthorized("missing authentication token".into()))?;
        let claims = app.tokens.verify(&token)?;
        Ok(AuthClaims(claims))
    }
}
