//! Error taxonomy for the pet care API.
//!
//! Every failure a handler can surface is an [`ApiError`]. Service and
//! store code returns these directly; the axum integration at the bottom
//! maps each kind to an HTTP status and a JSON body. Business-rule
//! failures carry a dedicated [`RuleViolation`] so tests can assert on
//! the exact rule that fired rather than on message text.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::domain::AppointmentStatus;
use crate::store::StoreError;

/// Violation of a domain rule. These are terminal: they are never retried
/// and always map to a client error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleViolation {
    /// Declared total must match the summed item prices. Appointments use
    /// exact equality, procedures a 0.01 tolerance; both arrive here.
    #[error("declared total ({declared:.2}) does not match the sum of item prices ({computed:.2})")]
    TotalMismatch { declared: f64, computed: f64 },
    #[error("the pet does not belong to the specified owner")]
    PetNotOwned,
    #[error("the service does not belong to the specified business")]
    ServiceNotFromBusiness,
    #[error("the service '{name}' is not active")]
    ServiceInactive { name: String },
    #[error("the scheduled date cannot be in the past")]
    PastDate,
    #[error("the realization date cannot be in the future")]
    FutureDate,
    #[error("cannot change the status of a {current} appointment")]
    ForbiddenTransition { current: AppointmentStatus },
    #[error("cannot update a {current} appointment")]
    UpdateForbidden { current: AppointmentStatus },
}

/// Unified error type surfaced by services, ownership checks and handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    AlreadyExists(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error(transparent)]
    Rule(#[from] RuleViolation),
    #[error("failed to hash credential")]
    WeakHash,
    #[error("storage failure")]
    Storage(#[source] StoreError),
}

impl ApiError {
    /// HTTP status for this error kind. Follows conventional REST mapping:
    /// 400 malformed input and rule violations, 401 credential failures,
    /// 403 authorization failures, 404 missing resources, 409 duplicates,
    /// 500 opaque storage trouble.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AlreadyExists(_) => StatusCode::CONFLICT,
            ApiError::InvalidInput(_) | ApiError::Rule(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::WeakHash | ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Category label used in structured logs.
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "resource_not_found",
            ApiError::AlreadyExists(_) => "conflict",
            ApiError::InvalidInput(_) => "validation_error",
            ApiError::Unauthorized(_) => "auth_error",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::Rule(_) => "rule_violation",
            ApiError::WeakHash => "credential_error",
            ApiError::Storage(_) => "storage_error",
        }
    }

    /// Shorthand for a not-found error about a named resource.
    pub fn not_found(resource: &str) -> Self {
        ApiError::NotFound(format!("{resource} not found"))
    }

    /// Shorthand for a malformed-identifier error.
    pub fn invalid_id(resource: &str) -> Self {
        ApiError::InvalidInput(format!("invalid {resource} id"))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("record not found".to_string()),
            other => ApiError::Storage(other),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(category = self.category(), error = %self, "request failed");
        } else {
            tracing::debug!(category = self.category(), error = %self, "request rejected");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
