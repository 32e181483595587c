//! Business resource endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::json;

use crate::auth::{AuthClaims, ownership};
use crate::domain::EntityId;
use crate::error::ApiError;
use crate::handlers::ApiJson;
use crate::model::{
    AddressRequest, AppointmentListQuery, AppointmentResponse, BusinessDetail, BusinessListQuery,
    BusinessSummary, BusinessUpdateRequest, RegisterBusinessRequest,
};
use crate::state::AppState;
use crate::store::Page;

/// `POST /petshops` — public business creation.
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterBusinessRequest>,
) -> Result<(StatusCode, Json<BusinessDetail>), ApiError> {
    let business = state.businesses.create(&req)?;
    Ok((StatusCode::CREATED, Json(BusinessDetail::project(&business))))
}

/// `GET /petshops/{id}` — public detail view.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BusinessDetail>, ApiError> {
    let business_id: EntityId = id.parse().map_err(|_| ApiError::invalid_id("business"))?;
    let business = state.businesses.get(business_id)?;
    Ok(Json(BusinessDetail::project(&business)))
}

/// `GET /petshops` — paginated listing, city-scoped when `cidade` is
/// present.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BusinessListQuery>,
) -> Result<Json<Vec<BusinessSummary>>, ApiError> {
    let page = Page::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));
    let rows = match query.city.as_deref().filter(|city| !city.trim().is_empty()) {
        Some(city) => state.businesses.find_by_city(city, page)?,
        None => state.businesses.list(page)?,
    };
    Ok(Json(rows.iter().map(BusinessSummary::project).collect()))
}

/// `PUT /petshops/{id}` — profile update, restricted to the business
/// itself.
pub async fn update(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<BusinessUpdateRequest>,
) -> Result<Json<BusinessDetail>, ApiError> {
    let business_id = ownership::require_business_self(&claims, &id)?;
    let business = state.businesses.update(business_id, &req)?;
    Ok(Json(BusinessDetail::project(&business)))
}

/// `PUT /petshops/{id}/endereco` — address update.
pub async fn update_address(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<AddressRequest>,
) -> Result<Json<BusinessDetail>, ApiError> {
    let business_id = ownership::require_business_self(&claims, &id)?;
    let business = state.businesses.update_address(business_id, &req)?;
    Ok(Json(BusinessDetail::project(&business)))
}

/// `DELETE /petshops/{id}` — soft-deletes the account.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let business_id = ownership::require_business_self(&claims, &id)?;
    state.businesses.delete(business_id)?;
    Ok(Json(json!({"message": "business deleted"})))
}

/// `GET /petshops/{id}/agendamentos` — appointments booked at the
/// business; `?futuros=true` narrows to upcoming non-cancelled ones.
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<Vec<AppointmentResponse>>, ApiError> {
    let business_id = ownership::require_business_self(&claims, &id)?;
    Ok(Json(
        state
            .appointments
            .list_by_business(business_id, query.upcoming)?,
    ))
}
