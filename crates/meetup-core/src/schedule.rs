//! Venue opening-hours validation
//!
//! Decides whether a candidate `[start_ts, end_ts)` interval lies inside a
//! venue's opening hours, evaluated in the venue's local timezone. Both
//! endpoints must fall on an open weekday and their local times of day must
//! lie within `[open_at, closed_at]`. The comparison ignores the date part,
//! which implicitly rejects meetups crossing midnight at any venue that
//! closes before midnight.

use chrono::{Datelike, TimeZone, Utc};
use chrono_tz::Tz;

use crate::entities::Venue;
use crate::error::DomainError;
use crate::value_objects::TimeOfDay;

/// Validate that `[start_ts, end_ts)` fits the venue's opening hours
///
/// Every scheduling rule failure is reported as `VenueIsClosed`; an
/// unresolvable venue timezone is an infrastructure error.
pub fn validate_opening_hours(
    venue: &Venue,
    start_ts: i64,
    end_ts: i64,
) -> Result<(), DomainError> {
    if start_ts >= end_ts {
        return Err(DomainError::VenueIsClosed);
    }

    let tz: Tz = venue
        .timezone
        .parse()
        .map_err(|_| DomainError::InvalidTimezone(venue.timezone.clone()))?;

    let start_local = Utc
        .timestamp_opt(start_ts, 0)
        .single()
        .ok_or_else(|| DomainError::Validation("start_ts is out of range".to_string()))?
        .with_timezone(&tz);
    let end_local = Utc
        .timestamp_opt(end_ts, 0)
        .single()
        .ok_or_else(|| DomainError::Validation("end_ts is out of range".to_string()))?
        .with_timezone(&tz);

    let start_day = start_local.weekday().num_days_from_sunday() as u8;
    let end_day = end_local.weekday().num_days_from_sunday() as u8;
    if !venue.is_open_on(start_day) || !venue.is_open_on(end_day) {
        return Err(DomainError::VenueIsClosed);
    }

    let start_tod = TimeOfDay::from_time(start_local.time());
    let end_tod = TimeOfDay::from_time(end_local.time());
    if start_tod < venue.open_at || end_tod > venue.closed_at {
        return Err(DomainError::VenueIsClosed);
    }

    Ok(())
}
