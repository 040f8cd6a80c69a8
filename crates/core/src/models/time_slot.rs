use serde::{Deserialize, Serialize};

use super::slot_time::SlotTime;

/// A bookable window of the day's grid. Built fresh on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: SlotTime,
    pub end: SlotTime,
    pub start_minutes: u32,
    pub end_minutes: u32,
    pub available: bool,
    /// Display name of whoever holds the slot. Never an identity key.
    pub booked_by: Option<String>,
}

impl TimeSlot {
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }
}
