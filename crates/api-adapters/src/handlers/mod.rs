//! # Handlers
//!
//! This module coordinates the flow between HTTP requests and the services.

pub mod accounts;
pub mod posts;

use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use domains::DomainError;

use crate::error::ApiError;

/// A request without a JSON content type is read as an empty body, so the
/// validator (or the auth check) reports what is missing.
pub(crate) fn json_body<T: Default>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(other) => Err(other.into()),
    }
}

/// Path ids that do not parse cannot name anything that exists.
pub(crate) fn path_id<T: std::str::FromStr>(
    entity: &'static str,
    raw: &str,
) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError(DomainError::not_found(entity, raw)))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn unknown_endpoint() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "unknown endpoint" })),
    )
}
