//! Appointment endpoints.
//!
//! Mutating routes run the appointment-party predicate before the service
//! call, so an unauthorized caller never reaches the lifecycle logic.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::auth::{AuthClaims, ownership};
use crate::error::ApiError;
use crate::handlers::ApiJson;
use crate::model::{
    AppointmentCreateRequest, AppointmentResponse, AppointmentStatusRequest,
    AppointmentUpdateRequest,
};
use crate::state::AppState;

/// `POST /agendamentos` — books an appointment. Requires authentication
/// but no ownership gate; the body names the requesting owner.
pub async fn create(
    State(state): State<Arc<AppState>>,
    _claims: AuthClaims,
    ApiJson(req): ApiJson<AppointmentCreateRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), ApiError> {
    let response = state.appointments.create(&req)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /agendamentos/{id}` — detail view for either party.
pub async fn get(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    let appointment =
        ownership::require_appointment_party(state.appointment_store(), &claims, &id)?;
    Ok(Json(state.appointments.get(appointment.id)?))
}

/// `PUT /agendamentos/{id}` — full update (date, notes, total, items).
pub async fn update(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<AppointmentUpdateRequest>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    let appointment =
        ownership::require_appointment_party(state.appointment_store(), &claims, &id)?;
    Ok(Json(state.appointments.update(appointment.id, &req)?))
}

/// `PUT /agendamentos/{id}/status` — status-only transition.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    claims: AuthClaims,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<AppointmentStatusRequest>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    let appointment =
        ownership::require_appointment_party(state.appointment_store(), &claims, &id)?;
    Ok(Json(
        state
            .appointments
            .update_status(appointment.id, &req.status)?,
    ))
}
