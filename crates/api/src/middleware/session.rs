//! # Session Extraction
//!
//! The caller's identity arrives in two headers set by the front end's
//! authentication layer:
//!
//! - `x-user-id`: the user's UUID (required)
//! - `x-user-role`: `customer` (default) or `admin`
//!
//! This service does not authenticate users itself. It only turns those
//! headers into a `Session` that the booking rules can check ownership and
//! role against.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use barberbook_core::{
    errors::BookingError,
    models::session::{Role, Session},
};
use uuid::Uuid;

use super::error_handling::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Extractor for the acting session. Rejects with 401 when the headers are
/// missing or malformed.
#[derive(Debug, Clone, Copy)]
pub struct RequestSession(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for RequestSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestSession(session_from_headers(&parts.headers)?))
    }
}

pub fn session_from_headers(headers: &HeaderMap) -> Result<Session, BookingError> {
    let raw_id = headers
        .get(USER_ID_HEADER)
        .ok_or_else(|| BookingError::Authentication(format!("Missing {} header", USER_ID_HEADER)))?;
    let user_id = raw_id
        .to_str()
        .ok()
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
        .ok_or_else(|| BookingError::Authentication(format!("Invalid {} header", USER_ID_HEADER)))?;

    let role = match headers.get(USER_ROLE_HEADER) {
        Some(value) => value
            .to_str()
            .map_err(|_| BookingError::Authentication(format!("Invalid {} header", USER_ROLE_HEADER)))?
            .parse()?,
        None => Role::Customer,
    };

    Ok(Session { user_id, role })
}
