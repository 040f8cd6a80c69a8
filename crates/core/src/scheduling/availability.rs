//! # Availability Resolver
//!
//! Marks grid slots as taken when an active reservation holds them.
//!
//! A slot is held by a reservation whose `date` equals the query date and
//! whose `from` equals the slot's start time. The comparison is on the
//! canonical `HH:MM` start, not on interval overlap, so it assumes every
//! reservation was made against a grid with the current slot length. A
//! reservation left over from a different slot length will not block the
//! slots it overlaps.

use chrono::NaiveDate;

use crate::models::{reservation::Reservation, time_slot::TimeSlot};

/// Returns a copy of `slots` with held slots marked unavailable.
///
/// Cancelled reservations and reservations for other dates are ignored.
pub fn resolve_availability(
    date: NaiveDate,
    slots: &[TimeSlot],
    reservations: &[Reservation],
) -> Vec<TimeSlot> {
    slots
        .iter()
        .map(|slot| {
            let holder = reservations
                .iter()
                .find(|r| r.is_active() && r.date == date && r.from == slot.start);

            TimeSlot {
                available: holder.is_none(),
                booked_by: holder.map(|r| r.customer_name.clone()),
                ..slot.clone()
            }
        })
        .collect()
}
