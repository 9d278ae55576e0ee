//! Wall-clock time of day ("HH:MM") used for venue opening hours
//!
//! Venue opening hours are compared by time of day only, ignoring the date.
//! Seconds are truncated so that a meetup ending at 16:59:59 still fits a
//! venue that closes at 17:00.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

/// A wall-clock time of day with minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

/// Error parsing a `TimeOfDay` from a string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeOfDayParseError {
    #[error("Invalid time of day: {0} (expected HH:MM)")]
    InvalidFormat(String),
}

impl TimeOfDay {
    /// Create a time of day from hours and minutes
    ///
    /// Returns `None` when the values are out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Create a time of day from a full clock time, truncating seconds
    pub fn from_time(time: NaiveTime) -> Self {
        // from_hms_opt cannot fail for components taken from a valid NaiveTime
        Self(
            NaiveTime::from_hms_opt(time.hour(), time.minute(), 0)
                .unwrap_or(time),
        )
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s, "%H:%M")
            .map(Self)
            .map_err(|_| TimeOfDayParseError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}
