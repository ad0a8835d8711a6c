//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the studio API.
//! It maps domain-specific errors to appropriate HTTP status codes and JSON
//! error responses, ensuring a consistent error handling experience across
//! the entire API.
//!
//! The implementation is based on Axum's error handling mechanisms and integrates
//! with the studio's domain error type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use studio_core::errors::StudioError;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain `StudioError` values and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use studio_api::middleware::error_handling::AppError;
/// use studio_core::errors::StudioError;
/// use uuid::Uuid;
/// 
/// async fn handler(id: Uuid) -> Result<Json<String>, AppError> {
///     Err(AppError(StudioError::NotFound(format!("Lesson slot {} not found", id))))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub StudioError);

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status code
/// and formats the error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            StudioError::NotFound(_) => StatusCode::NOT_FOUND,
            StudioError::Validation(_) => StatusCode::BAD_REQUEST,
            StudioError::Authentication(_) => StatusCode::UNAUTHORIZED,
            StudioError::Authorization(_) => StatusCode::FORBIDDEN,
            StudioError::Conflict(_) => StatusCode::CONFLICT,
            StudioError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StudioError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
    
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        // Full error plus the bare message a client can show to the user
        let body = Json(json!({
            "error": self.0.to_string(),
            "message": self.0.user_message(),
        }));
    
        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from StudioError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, StudioError>` in handler functions that return `Result<T, AppError>`.
impl From<StudioError> for AppError {
    fn from(err: StudioError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, eyre::Report>` in handler functions that return `Result<T, AppError>`.
/// It wraps the eyre error in a StudioError::Database variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(StudioError::Database(err))
    }
}

/// Maps a StudioError straight to an HTTP response
pub fn map_error(err: StudioError) -> Response {
    AppError(err).into_response()
}
