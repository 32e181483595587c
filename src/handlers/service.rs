//! Service catalog endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;

use crate::auth::{AuthClaims, ownership};
use crate::domain::EntityId;
use crate::error::ApiError;
use crate::handlers::ApiJson;
use crate::model::{ServiceCreateRequest, ServiceResponse, ServiceUpdateRequest};
use crate::state::AppState;

/// `GET /petshops/{id}/servicos` — public catalog listing, inactive
/// services included.
pub async fn list_by_business(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ServiceResponse>>, ApiError> {
    let business_id: EntityId = id.parse().map_err(|_| ApiError::invalid_id("business"))?;
    let services = state.catalog.list_by_business(business_id)?;
    Ok(Json(services.iter().map(ServiceResponse::project).collect()))
}

/// `POST /petshops/{id}/servicos` — adds a service; only the business
/// itself may extend its catalog.
pub async fn create_for_business(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ServiceCreateRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>), ApiError> {
    let business_id = ownership::require_business_self(&claims, &id)?;
    let service = state.catalog.create(business_id, &req)?;
    Ok((StatusCode::CREATED, Json(ServiceResponse::project(&service))))
}

/// `GET /servicos/{id}` — detail view, any authenticated principal.
pub async fn get(
    State(state): State<Arc<AppState>>,
    _claims: AuthClaims,
    Path(id): Path<String>,
) -> Result<Json<ServiceResponse>, ApiError> {
    let service_id: EntityId = id.parse().map_err(|_| ApiError::invalid_id("service"))?;
    let service = state.catalog.get(service_id)?;
    Ok(Json(ServiceResponse::project(&service)))
}

/// `PUT /servicos/{id}` — update, restricted to the owning business.
pub async fn update(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ServiceUpdateRequest>,
) -> Result<Json<ServiceResponse>, ApiError> {
    let service = ownership::require_service_owner(state.service_store(), &claims, &id)?;
    let service = state.catalog.update(service.id, &req)?;
    Ok(Json(ServiceResponse::project(&service)))
}

/// `DELETE /servicos/{id}` — deactivates the service, keeping the record
/// for history.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let service = ownership::require_service_owner(state.service_store(), &claims, &id)?;
    state.catalog.deactivate(service.id)?;
    Ok(Json(json!({"message": "service deactivated"})))
}
