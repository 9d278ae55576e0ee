//! Venue entity - a physical location with fixed opening hours, a timezone,
//! and per-event meetup capacity

use crate::value_objects::TimeOfDay;

/// Venue entity
///
/// Weekday indices follow the 0=Sunday..6=Saturday convention. Opening hours
/// are `[open_at, closed_at]` within a single day; overnight venues are not
/// supported (`open_at < closed_at` always).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub open_days: Vec<u8>,
    pub open_at: TimeOfDay,
    pub closed_at: TimeOfDay,
    pub timezone: String,
    pub supported_events: Vec<SupportedEvent>,
}

/// An event a venue supports, with the venue's capacity for it
///
/// Capacity is the maximum number of concurrently-overlapping meetups of the
/// event at the venue, not a per-meetup head count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedEvent {
    pub id: i64,
    pub name: String,
    pub meetups_capacity: i32,
}

impl Venue {
    /// Check whether the venue supports the given event
    pub fn supports_event(&self, event_id: i64) -> bool {
        self.supported_events.iter().any(|e| e.id == event_id)
    }

    /// Capacity for the given event, `None` when the pair is unsupported
    pub fn event_capacity(&self, event_id: i64) -> Option<i32> {
        self.supported_events
            .iter()
            .find(|e| e.id == event_id)
            .map(|e| e.meetups_capacity)
    }

    /// Check whether the venue opens on the given weekday (0=Sunday)
    pub fn is_open_on(&self, weekday: u8) -> bool {
        self.open_days.contains(&weekday)
    }
}
