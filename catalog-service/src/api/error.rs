//! Error mapping for the HTTP surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::errors::ProductServiceError;

/// Build a JSON error response with the service's `{"message": ...}` body.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "message": message.into() }))).into_response()
}

/// Map an orchestrator error onto the REST contract: 404 for missing
/// resources, 403 for ownership failures, 400 for rejected input, 500 for
/// any internal failure.
pub fn service_error_to_response(err: ProductServiceError) -> Response {
    match err {
        ProductServiceError::CategoryNotFound => {
            json_error(StatusCode::NOT_FOUND, "Category not found")
        }
        ProductServiceError::ProductNotFound => {
            json_error(StatusCode::NOT_FOUND, "Product not found")
        }
        ProductServiceError::NotOwner => json_error(StatusCode::FORBIDDEN, "Unauthorized"),
        ProductServiceError::Validation(message) => json_error(StatusCode::BAD_REQUEST, message),
        other => {
            error!(error = %other, "Request failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}
