use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use barberbook_core::{
    errors::BookingError,
    models::time_slot::TimeSlot,
    scheduling::slots::next_available_slot,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ApiState, middleware::error_handling::AppError};

/// The day's grid plus the hint clients use to schedule their next poll.
#[derive(Debug, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
    pub next_available: Option<TimeSlot>,
    pub refresh_after_seconds: u64,
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| BookingError::Validation(format!("Invalid date {}, expected YYYY-MM-DD", raw)))
}

#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<ApiState>>,
    Path(date): Path<String>,
) -> Result<Json<SlotsResponse>, AppError> {
    let date = parse_date(&date)?;
    let slots = state.booking.get_slots_for_date(date).await?;
    let next_available = next_available_slot(&slots).cloned();

    Ok(Json(SlotsResponse {
        date,
        slots,
        next_available,
        refresh_after_seconds: state.refresh_after_seconds,
    }))
}
