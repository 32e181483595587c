//! Pet resource endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::auth::{AuthClaims, ownership};
use crate::domain::EntityId;
use crate::error::ApiError;
use crate::handlers::ApiJson;
use crate::model::{PetCreateRequest, PetResponse, PetUpdateRequest, ProcedureResponse};
use crate::state::AppState;

/// `POST /pets` — any authenticated principal may register a pet for an
/// existing owner; the body names the owner.
pub async fn create(
    State(state): State<Arc<AppState>>,
    _claims: AuthClaims,
    ApiJson(req): ApiJson<PetCreateRequest>,
) -> Result<(StatusCode, Json<PetResponse>), ApiError> {
    let pet = state.pets.create(&req)?;
    Ok((StatusCode::CREATED, Json(PetResponse::project(&pet))))
}

/// `GET /pets/{id}` — detail view, any authenticated principal.
pub async fn get(
    State(state): State<Arc<AppState>>,
    _claims: AuthClaims,
    Path(id): Path<String>,
) -> Result<Json<PetResponse>, ApiError> {
    let pet_id: EntityId = id.parse().map_err(|_| ApiError::invalid_id("pet"))?;
    let pet = state.pets.get(pet_id)?;
    Ok(Json(PetResponse::project(&pet)))
}

/// `PUT /pets/{id}` — update, restricted to the pet's owner.
pub async fn update(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<PetUpdateRequest>,
) -> Result<Json<PetResponse>, ApiError> {
    let pet = ownership::require_pet_owner(state.pet_store(), &claims, &id)?;
    let pet = state.pets.update(pet.id, &req)?;
    Ok(Json(PetResponse::project(&pet)))
}

/// `GET /pets/{pet_id}/procedimentos` — the pet's procedure history,
/// restricted to the pet's owner.
pub async fn list_procedures(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
) -> Result<Json<Vec<ProcedureResponse>>, ApiError> {
    let pet = ownership::require_pet_owner(state.pet_store(), &claims, &id)?;
    Ok(Json(state.procedures.list_by_pet(pet.id)?))
}
