use serde::{Deserialize, Serialize};

use super::slot_time::MINUTES_PER_DAY;
use crate::errors::{BookingError, BookingResult};

pub const DEFAULT_OPENING_HOUR: u32 = 9;
pub const DEFAULT_CLOSING_HOUR: u32 = 22;
pub const DEFAULT_SLOT_DURATION_MINUTES: u32 = 35;

/// Opening hours and slot length that shape the daily grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub opening_hour: u32,
    pub closing_hour: u32,
    pub slot_duration_minutes: u32,
}

impl BusinessHours {
    pub fn new(opening_hour: u32, closing_hour: u32, slot_duration_minutes: u32) -> BookingResult<Self> {
        if opening_hour > 24 || closing_hour > 24 {
            return Err(BookingError::Validation(format!(
                "business hours must be within 0..=24, got {}..{}",
                opening_hour, closing_hour
            )));
        }
        if slot_duration_minutes == 0 {
            return Err(BookingError::Validation(
                "slot duration must be at least one minute".to_string(),
            ));
        }
        if slot_duration_minutes > MINUTES_PER_DAY {
            return Err(BookingError::Validation(format!(
                "slot duration must not exceed {} minutes, got {}",
                MINUTES_PER_DAY, slot_duration_minutes
            )));
        }

        Ok(Self {
            opening_hour,
            closing_hour,
            slot_duration_minutes,
        })
    }

    pub fn opening_minutes(&self) -> u32 {
        self.opening_hour * 60
    }

    pub fn closing_minutes(&self) -> u32 {
        self.closing_hour * 60
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            opening_hour: DEFAULT_OPENING_HOUR,
            closing_hour: DEFAULT_CLOSING_HOUR,
            slot_duration_minutes: DEFAULT_SLOT_DURATION_MINUTES,
        }
    }
}
