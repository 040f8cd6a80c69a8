//! # Cancellation Policy Engine
//!
//! Decides whether a reservation may still be cancelled. Rules are checked
//! in order and the first failing one wins:
//!
//! 1. the reservation is already cancelled;
//! 2. more than one hour has passed since the reservation was created
//!    (exactly one hour is still inside the window);
//! 3. the appointment start is already in the past.
//!
//! The window runs from booking time, not from appointment time.
//!
//! Nothing here persists state. The caller performs the transition and
//! triggers notifications.

use std::fmt;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::reservation::Reservation;

pub const CANCELLATION_WINDOW_HOURS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationDenial {
    AlreadyCancelled,
    WindowElapsed,
    AppointmentPassed,
}

impl fmt::Display for CancellationDenial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            CancellationDenial::AlreadyCancelled => "This reservation is already cancelled.",
            CancellationDenial::WindowElapsed => {
                "The cancellation window (1 hour from booking time) has elapsed."
            }
            CancellationDenial::AppointmentPassed => "The appointment already occurred.",
        };
        f.write_str(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationDecision {
    Allowed,
    Denied(CancellationDenial),
}

impl CancellationDecision {
    pub fn can_cancel(&self) -> bool {
        matches!(self, CancellationDecision::Allowed)
    }

    pub fn reason(&self) -> Option<String> {
        match self {
            CancellationDecision::Allowed => None,
            CancellationDecision::Denied(denial) => Some(denial.to_string()),
        }
    }
}

/// Fractional hours elapsed between `since` and `now`.
pub fn hours_since(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - since).num_milliseconds() as f64 / 3_600_000.0
}

/// Customer-facing policy: all three rules.
pub fn evaluate_cancellation(
    reservation: &Reservation,
    now: DateTime<Utc>,
    timezone: Tz,
) -> CancellationDecision {
    if !reservation.is_active() {
        return CancellationDecision::Denied(CancellationDenial::AlreadyCancelled);
    }

    if hours_since(reservation.created_at, now) > CANCELLATION_WINDOW_HOURS {
        return CancellationDecision::Denied(CancellationDenial::WindowElapsed);
    }

    if reservation.appointment_start(timezone) < now {
        return CancellationDecision::Denied(CancellationDenial::AppointmentPassed);
    }

    CancellationDecision::Allowed
}

/// Shop-side cancellation: only an already-cancelled reservation is refused.
pub fn evaluate_admin_cancellation(reservation: &Reservation) -> CancellationDecision {
    if reservation.is_active() {
        CancellationDecision::Allowed
    } else {
        CancellationDecision::Denied(CancellationDenial::AlreadyCancelled)
    }
}

/// Minutes left in the window, clamped at zero. Display only; never gates a cancellation.
pub fn remaining_cancellation_minutes(reservation: &Reservation, now: DateTime<Utc>) -> f64 {
    let elapsed = hours_since(reservation.created_at, now);
    ((CANCELLATION_WINDOW_HOURS - elapsed) * 60.0).max(0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancellationEligibility {
    pub can_cancel: bool,
    pub reason: Option<String>,
    pub remaining_minutes: f64,
}

impl CancellationEligibility {
    pub fn new(decision: CancellationDecision, remaining_minutes: f64) -> Self {
        Self {
            can_cancel: decision.can_cancel(),
            reason: decision.reason(),
            remaining_minutes,
        }
    }
}
