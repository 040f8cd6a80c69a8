//! # Booking Conflict Guard
//!
//! Re-checks a slot right before a reservation is committed, closing most of
//! the gap between a customer viewing the grid and submitting the booking.
//! It is a fast pre-check only: two commits can still pass it at the same
//! time, and the store's uniqueness constraint decides which one wins.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::{errors::BookingResult, models::slot_time::SlotTime, store::ReservationStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommitCheck {
    Clear,
    Taken { reason: String },
}

impl CommitCheck {
    pub fn is_clear(&self) -> bool {
        matches!(self, CommitCheck::Clear)
    }
}

pub async fn can_commit_booking(
    store: &dyn ReservationStore,
    date: NaiveDate,
    slot_start: SlotTime,
) -> BookingResult<CommitCheck> {
    let active = store.list_active_reservations(date).await?;
    debug!("Conflict guard: {} active reservations on {}", active.len(), date);

    if active.iter().any(|r| r.from == slot_start) {
        return Ok(CommitCheck::Taken {
            reason: format!(
                "The {} slot on {} was just booked by someone else. Please pick another slot.",
                slot_start, date
            ),
        });
    }

    Ok(CommitCheck::Clear)
}
