//! # Booking Handlers
//!
//! Submission and cancellation of reservations. Every handler needs a
//! session; ownership and role checks happen in the booking service.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use barberbook_core::{
    errors::BookingError,
    models::{
        reservation::{BookingRequest, ReservationView},
        slot_time::SlotTime,
    },
    scheduling::cancellation::CancellationEligibility,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{error_handling::AppError, session::RequestSession},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub date: NaiveDate,
    /// Start of the chosen slot, "HH:MM"
    pub slot: SlotTime,
    #[serde(flatten)]
    pub details: BookingRequest,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CancelBookingRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError(BookingError::Validation(format!(
        "Invalid request body: {}",
        rejection.body_text()
    )))
}

/// An empty body cancels with the default reason. Anything else must be a
/// well-formed `CancelBookingRequest`.
pub fn cancellation_reason(body: &[u8]) -> Result<Option<String>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice::<CancelBookingRequest>(body)
        .map(|request| request.reason)
        .map_err(|e| AppError(BookingError::Validation(format!("Invalid request body: {}", e))))
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    RequestSession(session): RequestSession,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ReservationView>), AppError> {
    let Json(payload) = payload.map_err(invalid_body)?;
    let reservation = state
        .booking
        .attempt_booking(&session, payload.date, payload.slot, payload.details)
        .await?;

    Ok((StatusCode::CREATED, Json(state.booking.view(reservation))))
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    RequestSession(session): RequestSession,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<ReservationView>, AppError> {
    let reason = cancellation_reason(&body)?;
    let reservation = state
        .booking
        .attempt_cancellation(&session, id, reason)
        .await?;

    Ok(Json(state.booking.view(reservation)))
}

#[axum::debug_handler]
pub async fn cancellation_eligibility(
    State(state): State<Arc<ApiState>>,
    RequestSession(session): RequestSession,
    Path(id): Path<Uuid>,
) -> Result<Json<CancellationEligibility>, AppError> {
    let eligibility = state.booking.cancellation_eligibility(&session, id).await?;
    Ok(Json(eligibility))
}
