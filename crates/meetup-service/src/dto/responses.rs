//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Fields that are
//! only visible to organizers and participants are optional and skipped
//! when absent.

use serde::Serialize;

use meetup_core::{Event, JoinedPerson, Meetup, SupportedEvent, Venue};

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Session Responses
// ============================================================================

/// Session creation response carrying the access token
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// ============================================================================
// Meetup Responses
// ============================================================================

/// Venue reference embedded in meetup responses
#[derive(Debug, Clone, Serialize)]
pub struct VenueRefResponse {
    pub id: i64,
    pub name: String,
}

/// Event reference embedded in meetup responses
#[derive(Debug, Clone, Serialize)]
pub struct EventRefResponse {
    pub id: i64,
    pub name: String,
}

/// Organizer reference embedded in meetup responses
#[derive(Debug, Clone, Serialize)]
pub struct OrganizerResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// A person who joined a meetup
#[derive(Debug, Clone, Serialize)]
pub struct JoinedPersonResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub joined_at: i64,
}

impl From<JoinedPerson> for JoinedPersonResponse {
    fn from(p: JoinedPerson) -> Self {
        Self {
            id: p.id,
            username: p.username,
            email: p.email,
            joined_at: p.joined_at,
        }
    }
}

/// Full meetup response
///
/// `joined_persons` and the cancellation fields are absent for viewers who
/// are neither the organizer nor a participant.
#[derive(Debug, Serialize)]
pub struct MeetupResponse {
    pub id: i64,
    pub name: String,
    pub venue: VenueRefResponse,
    pub event: EventRefResponse,
    pub start_ts: i64,
    pub end_ts: i64,
    pub max_persons: i32,
    pub organizer: OrganizerResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_persons: Option<Vec<JoinedPersonResponse>>,
    pub joined_persons_count: i32,
    pub is_joined: bool,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<i64>,
}

impl From<Meetup> for MeetupResponse {
    fn from(m: Meetup) -> Self {
        Self {
            id: m.id,
            name: m.name,
            venue: VenueRefResponse {
                id: m.venue.id,
                name: m.venue.name,
            },
            event: EventRefResponse {
                id: m.event.id,
                name: m.event.name,
            },
            start_ts: m.start_ts,
            end_ts: m.end_ts,
            max_persons: m.max_persons,
            organizer: OrganizerResponse {
                id: m.organizer.id,
                username: m.organizer.username,
                email: m.organizer.email,
            },
            joined_persons: m
                .joined_persons
                .map(|ps| ps.into_iter().map(JoinedPersonResponse::from).collect()),
            joined_persons_count: m.joined_persons_count,
            is_joined: m.is_joined,
            status: m.status.to_string(),
            cancelled_reason: m.cancelled_reason,
            cancelled_at: m.cancelled_at,
        }
    }
}

/// Meetup summary used in list responses
#[derive(Debug, Serialize)]
pub struct MeetupSummaryResponse {
    pub id: i64,
    pub name: String,
    pub venue: VenueRefResponse,
    pub event: EventRefResponse,
    pub start_ts: i64,
    pub end_ts: i64,
    pub max_persons: i32,
    pub organizer: OrganizerResponse,
    pub joined_persons_count: i32,
    pub status: String,
}

impl From<Meetup> for MeetupSummaryResponse {
    fn from(m: Meetup) -> Self {
        Self {
            id: m.id,
            name: m.name,
            venue: VenueRefResponse {
                id: m.venue.id,
                name: m.venue.name,
            },
            event: EventRefResponse {
                id: m.event.id,
                name: m.event.name,
            },
            start_ts: m.start_ts,
            end_ts: m.end_ts,
            max_persons: m.max_persons,
            organizer: OrganizerResponse {
                id: m.organizer.id,
                username: m.organizer.username,
                email: m.organizer.email,
            },
            joined_persons_count: m.joined_persons_count,
            status: m.status.to_string(),
        }
    }
}

/// Cancellation response
///
/// Unlike `MeetupResponse`, the cancellation fields are always present; the
/// caller is the organizer.
#[derive(Debug, Serialize)]
pub struct CancelMeetupResponse {
    pub id: i64,
    pub name: String,
    pub venue: VenueRefResponse,
    pub event: EventRefResponse,
    pub start_ts: i64,
    pub end_ts: i64,
    pub max_persons: i32,
    pub organizer: OrganizerResponse,
    pub status: String,
    pub cancelled_reason: String,
    pub cancelled_at: i64,
}

// ============================================================================
// Venue Responses
// ============================================================================

/// An event supported by a venue, with the concurrent-meetup capacity
#[derive(Debug, Serialize)]
pub struct SupportedEventResponse {
    pub id: i64,
    pub name: String,
    pub meetups_capacity: i32,
}

impl From<SupportedEvent> for SupportedEventResponse {
    fn from(e: SupportedEvent) -> Self {
        Self {
            id: e.id,
            name: e.name,
            meetups_capacity: e.meetups_capacity,
        }
    }
}

/// Venue response with opening hours and supported events
#[derive(Debug, Serialize)]
pub struct VenueResponse {
    pub id: i64,
    pub name: String,
    pub open_days: Vec<u8>,
    pub open_at: String,
    pub closed_at: String,
    pub timezone: String,
    pub supported_events: Vec<SupportedEventResponse>,
}

impl From<Venue> for VenueResponse {
    fn from(v: Venue) -> Self {
        Self {
            id: v.id,
            name: v.name,
            open_days: v.open_days,
            open_at: v.open_at.to_string(),
            closed_at: v.closed_at.to_string(),
            timezone: v.timezone,
            supported_events: v
                .supported_events
                .into_iter()
                .map(SupportedEventResponse::from)
                .collect(),
        }
    }
}

// ============================================================================
// Event Responses
// ============================================================================

/// Event catalog entry
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: i64,
    pub name: String,
}

impl From<Event> for EventResponse {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            name: e.name,
        }
    }
}
