//! # Slot Generator
//!
//! Builds the fixed grid of bookable windows for a day. Starting at opening
//! time, one slot is emitted per `slot_duration_minutes` step for as long as a
//! whole slot still fits before closing time. If the business hours do not
//! divide evenly by the slot length, the trailing remainder is left
//! unscheduled; that is expected.
//!
//! Output is ascending by start time. Display code and "first available"
//! lookups depend on that order.

use crate::models::{business_hours::BusinessHours, slot_time::SlotTime, time_slot::TimeSlot};

/// Produces every slot of the day, all marked available.
///
/// The grid is a pure function of `hours`: the same configuration always
/// yields the same sequence. A closing hour at or before the opening hour,
/// or a zero slot length, yields no slots.
pub fn generate_slots(hours: &BusinessHours) -> Vec<TimeSlot> {
    let duration = hours.slot_duration_minutes;
    if duration == 0 {
        return Vec::new();
    }

    let closing = hours.closing_minutes();
    let mut slots = Vec::new();
    let mut current = hours.opening_minutes();

    while let Some(end_minutes) = current.checked_add(duration) {
        if end_minutes > closing {
            break;
        }
        let (Ok(start), Ok(end)) = (
            SlotTime::from_minutes(current),
            SlotTime::from_minutes(end_minutes),
        ) else {
            break;
        };

        slots.push(TimeSlot {
            start,
            end,
            start_minutes: current,
            end_minutes,
            available: true,
            booked_by: None,
        });
        current = end_minutes;
    }

    slots
}

/// First open slot in grid order.
pub fn next_available_slot(slots: &[TimeSlot]) -> Option<&TimeSlot> {
    slots.iter().find(|slot| slot.available)
}

/// Looks up the grid slot that starts at `start`, if there is one.
pub fn find_slot(slots: &[TimeSlot], start: SlotTime) -> Option<&TimeSlot> {
    slots.iter().find(|slot| slot.start == start)
}
