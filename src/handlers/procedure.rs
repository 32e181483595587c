//! Procedure record endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::auth::{AuthClaims, ownership};
use crate::error::ApiError;
use crate::handlers::ApiJson;
use crate::model::{ProcedureCreateRequest, ProcedureResponse};
use crate::state::AppState;

/// `POST /procedimentos` — records rendered services. Only the business
/// named in the body may write its own history.
pub async fn create(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    ApiJson(req): ApiJson<ProcedureCreateRequest>,
) -> Result<(StatusCode, Json<ProcedureResponse>), ApiError> {
    ownership::require_business_self(&claims, &req.business_id)?;
    let response = state.procedures.create(&req)?;
    Ok((StatusCode::CREATED, Json(response)))
}
