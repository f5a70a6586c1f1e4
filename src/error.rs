use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

pub const TABLE_NOT_FOUND_MESSAGE: &str = "Unable to call the item store. Table resource not found.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every failure a handler can meet ends up here, so a request always gets a
/// JSON error body instead of escaping the handler.
#[derive(Debug)]
pub enum ApiError {
    /// Request method does not match the handler's verb
    MethodNotAllowed { expected: &'static str, actual: Method },
    /// Request body is not valid JSON or lacks `name`
    JsonError(serde_json::Error),
    /// Store operation failed
    Store(StoreError),
}

/// Map a store failure to its HTTP status and fixed message.
pub fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str) {
    match err {
        StoreError::TableNotFound(_) => (StatusCode::NOT_FOUND, TABLE_NOT_FOUND_MESSAGE),
        StoreError::Other(_) => (StatusCode::INTERNAL_SERVER_ERROR, UNKNOWN_ERROR_MESSAGE),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::MethodNotAllowed { expected, actual } => (
                StatusCode::METHOD_NOT_ALLOWED,
                format!("Only {} is accepted here, got {}", expected, actual),
            ),
            ApiError::JsonError(err) => (
                StatusCode::BAD_REQUEST,
                format!("JSON parse error: {}", err),
            ),
            ApiError::Store(err) => {
                tracing::error!("Store operation failed: {:#}", err);
                let (status, message) = classify_store_error(&err);
                (status, message.to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::JsonError(err)
    }
}
