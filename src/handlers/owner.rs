//! Owner resource endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;

use crate::auth::{AuthClaims, ownership};
use crate::error::ApiError;
use crate::handlers::ApiJson;
use crate::model::{
    AddressRequest, AppointmentResponse, OwnerDetail, OwnerUpdateRequest, PetResponse,
    RegisterOwnerRequest,
};
use crate::state::AppState;

/// `POST /donos` — public owner creation; same contract as registration.
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterOwnerRequest>,
) -> Result<(StatusCode, Json<OwnerDetail>), ApiError> {
    let owner = state.owners.create(&req)?;
    Ok((StatusCode::CREATED, Json(OwnerDetail::project(&owner))))
}

/// `PUT /donos/{id}` — profile update, restricted to the owner itself.
pub async fn update(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<OwnerUpdateRequest>,
) -> Result<Json<OwnerDetail>, ApiError> {
    let owner_id = ownership::require_owner_self(&claims, &id)?;
    let owner = state.owners.update(owner_id, &req)?;
    Ok(Json(OwnerDetail::project(&owner)))
}

/// `PUT /donos/{id}/localizacao` — address update.
pub async fn update_location(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<AddressRequest>,
) -> Result<Json<OwnerDetail>, ApiError> {
    let owner_id = ownership::require_owner_self(&claims, &id)?;
    let owner = state.owners.update_location(owner_id, &req)?;
    Ok(Json(OwnerDetail::project(&owner)))
}

/// `DELETE /donos/{id}` — soft-deletes the account.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let owner_id = ownership::require_owner_self(&claims, &id)?;
    state.owners.delete(owner_id)?;
    Ok(Json(json!({"message": "owner deleted"})))
}

/// `GET /donos/{id}/pets` — the owner's pets.
pub async fn list_pets(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
) -> Result<Json<Vec<PetResponse>>, ApiError> {
    let owner_id = ownership::require_owner_self(&claims, &id)?;
    let pets = state.pets.list_by_owner(owner_id)?;
    Ok(Json(pets.iter().map(PetResponse::project).collect()))
}

/// `GET /donos/{id}/agendamentos` — the owner's appointments.
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
) -> Result<Json<Vec<AppointmentResponse>>, ApiError> {
    let owner_id = ownership::require_owner_self(&claims, &id)?;
    Ok(Json(state.appointments.list_by_owner(owner_id)?))
}
