//! Application services.
//!
//! One service per aggregate, each holding `Arc` handles to the store
//! traits it needs. Services own all validation and rule enforcement;
//! handlers only parse the request shape, run ownership checks and
//! project the result. Entity identifiers and timestamps are assigned
//! here, before anything reaches a store.

mod appointment;
mod auth;
mod business;
mod catalog;
mod owner;
mod pet;
mod procedure;

pub use appointment::AppointmentService;
pub use auth::AuthService;
pub use business::BusinessService;
pub use catalog::CatalogService;
pub use owner::OwnerService;
pub use pet::PetService;
pub use procedure::ProcedureService;

use chrono::{DateTime, Utc};

use crate::error::ApiError;

/// Parses the canonical RFC 3339 wire encoding of an instant.
pub(crate) fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ApiError::InvalidInput("invalid date format, use ISO 8601".into()))
}
