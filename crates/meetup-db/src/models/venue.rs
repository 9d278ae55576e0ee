//! Venue row models
//!
//! Venues are read joined with `venue_event`, one row per supported event,
//! then folded back into one entity per venue.

use sqlx::FromRow;

use meetup_core::entities::{SupportedEvent, Venue};
use meetup_core::error::DomainError;
use meetup_core::value_objects::TimeOfDay;

/// One venue/supported-event pair as returned by the venue join
#[derive(Debug, Clone, FromRow)]
pub struct VenueEventRow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_open_days: String,
    pub venue_open_at: String,
    pub venue_closed_at: String,
    pub venue_timezone: String,
    pub event_id: i64,
    pub event_name: String,
    pub meetups_capacity: i32,
}

impl VenueEventRow {
    fn into_venue(self) -> Result<Venue, DomainError> {
        let open_days = parse_open_days(&self.venue_open_days);
        let open_at = parse_time(&self.venue_open_at)?;
        let closed_at = parse_time(&self.venue_closed_at)?;

        Ok(Venue {
            id: self.venue_id,
            name: self.venue_name,
            open_days,
            open_at,
            closed_at,
            timezone: self.venue_timezone,
            supported_events: vec![SupportedEvent {
                id: self.event_id,
                name: self.event_name,
                meetups_capacity: self.meetups_capacity,
            }],
        })
    }
}

fn parse_open_days(raw: &str) -> Vec<u8> {
    raw.split(',')
        .filter_map(|day| day.trim().parse::<u8>().ok())
        .collect()
}

fn parse_time(raw: &str) -> Result<TimeOfDay, DomainError> {
    raw.parse::<TimeOfDay>()
        .map_err(|e| DomainError::DatabaseError(format!("invalid venue time {raw:?}: {e}")))
}

/// Fold join rows into venues, preserving the query's venue order
pub fn rows_to_venues(rows: Vec<VenueEventRow>) -> Result<Vec<Venue>, DomainError> {
    let mut venues: Vec<Venue> = Vec::new();

    for row in rows {
        match venues.iter_mut().find(|v| v.id == row.venue_id) {
            Some(venue) => venue.supported_events.push(SupportedEvent {
                id: row.event_id,
                name: row.event_name,
                meetups_capacity: row.meetups_capacity,
            }),
            None => venues.push(row.into_venue()?),
        }
    }

    Ok(venues)
}
