//! Authentication endpoints: login, refresh, registration, logout and the
//! current-principal projections.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::auth::{AuthClaims, IssuedToken, Principal, RawToken};
use crate::error::ApiError;
use crate::handlers::ApiJson;
use crate::model::{
    AuthProfile, LoginRequest, RegisterBusinessRequest, RegisterOwnerRequest, TokenResponse,
    format_timestamp,
};
use crate::state::AppState;

const COOKIE_MAX_AGE_SECS: i64 = 24 * 3600;

fn token_response(issued: IssuedToken) -> Response {
    let cookie = format!(
        "jwt={}; Path=/; HttpOnly; Max-Age={COOKIE_MAX_AGE_SECS}",
        issued.token
    );
    let body = TokenResponse {
        expire: format_timestamp(issued.expires_at),
        token: issued.token,
    };
    ([(header::SET_COOKIE, cookie)], Json(body)).into_response()
}

/// `POST /auth/login` — authenticates either principal kind and issues a
/// session token, returned in the body and as an http-only cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Response, ApiError> {
    let principal = match req.user_type.as_str() {
        "dono" => state.auth.authenticate_owner(&req.email, &req.password)?,
        "petshop" => state.auth.authenticate_business(&req.email, &req.password)?,
        _ => return Err(ApiError::Unauthorized("unknown user type".into())),
    };
    tracing::info!(principal = %principal.id, role = %principal.role, "login succeeded");
    let issued = state.tokens.issue(&principal)?;
    Ok(token_response(issued))
}

/// `POST /auth/refresh` — re-issues a token whose 7-day refresh window is
/// still open. The presented token may already be expired.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    RawToken(token): RawToken,
) -> Result<Response, ApiError> {
    let issued = state.tokens.refresh(&token)?;
    Ok(token_response(issued))
}

/// `GET /auth/logout` — clears the session cookie.
pub async fn logout() -> Response {
    let cookie = "jwt=; Path=/; HttpOnly; Max-Age=0";
    (
        [(header::SET_COOKIE, cookie)],
        Json(json!({"message": "logged out"})),
    )
        .into_response()
}

/// `GET /auth/me` and `GET /profile` — identity of the calling principal,
/// straight from the verified claims.
pub async fn me(claims: AuthClaims) -> Json<AuthProfile> {
    Json(AuthProfile::from_claims(&claims))
}

/// `POST /auth/register/dono` — registers an owner account.
pub async fn register_owner(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterOwnerRequest>,
) -> Result<(StatusCode, Json<AuthProfile>), ApiError> {
    let owner = state.owners.create(&req)?;
    let profile = AuthProfile::project(&Principal::from_owner(&owner));
    Ok((StatusCode::CREATED, Json(profile)))
}

/// `POST /auth/register/petshop` — registers a business account.
pub async fn register_business(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterBusinessRequest>,
) -> Result<(StatusCode, Json<AuthProfile>), ApiError> {
    let business = state.businesses.create(&req)?;
    let profile = AuthProfile::project(&Principal::from_business(&business));
    Ok((StatusCode::CREATED, Json(profile)))
}
