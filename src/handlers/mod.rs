//! HTTP handlers.
//!
//! Handlers are thin: they parse the request shape, run the ownership
//! predicate the route demands, call one service method and project the
//! result. All domain decisions live in [`crate::services`].

pub mod appointment;
pub mod auth;
pub mod business;
pub mod owner;
pub mod pet;
pub mod procedure;
pub mod service;

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::ApiError;

/// JSON extractor that reports every body problem as a 400, matching the
/// API's documented status mapping (axum's stock extractor answers 422
/// for deserialization failures).
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::InvalidInput(rejection.body_text())),
        }
    }
}

/// Liveness endpoint.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
