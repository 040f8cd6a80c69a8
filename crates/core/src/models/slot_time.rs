use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A minute of the day, rendered as a canonical 24-hour `HH:MM` string.
///
/// `24:00` is accepted so that a slot may end exactly at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime(u32);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotTimeError {
    #[error("expected HH:MM, got {0:?}")]
    Malformed(String),

    #[error("{0} minutes is past the end of the day")]
    OutOfRange(u32),
}

impl SlotTime {
    pub fn from_minutes(minutes: u32) -> Result<Self, SlotTimeError> {
        if minutes > MINUTES_PER_DAY {
            return Err(SlotTimeError::OutOfRange(minutes));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for SlotTime {
    type Err = SlotTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SlotTimeError::Malformed(s.to_string());

        let (hours, minutes) = s.split_once(':').ok_or_else(malformed)?;
        if hours.len() != 2 || minutes.len() != 2 {
            return Err(malformed());
        }
        if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let hours: u32 = hours.parse().map_err(|_| malformed())?;
        let minutes: u32 = minutes.parse().map_err(|_| malformed())?;
        if minutes >= 60 {
            return Err(malformed());
        }

        Self::from_minutes(hours * 60 + minutes)
    }
}

impl TryFrom<String> for SlotTime {
    type Error = SlotTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotTime> for String {
    fn from(value: SlotTime) -> Self {
        value.to_string()
    }
}
