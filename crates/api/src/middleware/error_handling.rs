//! # Error Handling Middleware
//!
//! Maps `BookingError` to HTTP status codes and a JSON body of the form
//! `{ "error": message, "retryable": bool }`.
//!
//! Storage and internal failures are logged in full but reported to the
//! client with a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use barberbook_core::errors::BookingError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use barberbook_api::middleware::error_handling::AppError;
/// use barberbook_core::errors::BookingError;
///
/// async fn handler(id: u32) -> Result<Json<u32>, AppError> {
///     if id == 0 {
///         return Err(AppError(BookingError::NotFound(format!("Reservation {} not found", id))));
///     }
///     Ok(Json(id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::Policy(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::Authentication(_) => StatusCode::UNAUTHORIZED,
            BookingError::Authorization(_) => StatusCode::FORBIDDEN,
            BookingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self.0 {
            BookingError::Store(e) => {
                error!("Request failed on the reservation store: {:?}", e);
                "The booking service is temporarily unavailable. Please try again.".to_string()
            }
            BookingError::Internal(e) => {
                error!("Request failed: {}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(json!({
            "error": message,
            "retryable": self.0.is_retryable(),
        }));

        (status, body).into_response()
    }
}

/// Allows `?` on `BookingResult` inside handlers.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Store(err))
    }
}
