//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use centro_core::error::{AppError, ErrorKind};

use crate::dto::response::ErrorResponse;

/// Newtype carrying `AppError` out of a handler.
///
/// Handlers return `Result<_, ApiError>`; `?` converts any `AppError`
/// on the way out. The response body is the `{ "error": message }`
/// shape the softphone client parses.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match &err.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::ExternalService => StatusCode::BAD_GATEWAY,
            ErrorKind::Configuration
            | ErrorKind::Token
            | ErrorKind::Routing
            | ErrorKind::Device
            | ErrorKind::Serialization
            | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(kind = %err.kind, error = %err.message, "request failed");
        }

        let body = ErrorResponse { error: err.message };

        (status, Json(body)).into_response()
    }
}
