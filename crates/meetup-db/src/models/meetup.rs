//! Meetup row models
//!
//! Read queries join venue, event, and organizer so the returned entity is
//! fully enriched; the joined-persons projection is loaded separately.

use sqlx::FromRow;

use meetup_core::entities::{
    JoinedPerson, Meetup, MeetupEvent, MeetupOrganizer, MeetupVenue, MeetupStatus,
};
use meetup_core::error::DomainError;

/// Joined row for meetup listings (open list, incoming list)
#[derive(Debug, Clone, FromRow)]
pub struct MeetupSummaryRow {
    pub meetup_id: i64,
    pub meetup_name: String,
    pub venue_id: i64,
    pub venue_name: String,
    pub event_id: i64,
    pub event_name: String,
    pub start_ts: i64,
    pub end_ts: i64,
    pub max_persons: i32,
    pub organizer_id: i64,
    pub organizer_username: String,
    pub organizer_email: String,
    pub joined_persons_count: i64,
    pub status: String,
    pub cancelled_reason: Option<String>,
    pub cancelled_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MeetupSummaryRow {
    /// Convert to a meetup entity without the joined-persons projection
    pub fn into_meetup(self) -> Result<Meetup, DomainError> {
        let status = self.status.parse::<MeetupStatus>()?;
        Ok(Meetup {
            id: self.meetup_id,
            name: self.meetup_name,
            venue: MeetupVenue {
                id: self.venue_id,
                name: self.venue_name,
            },
            event: MeetupEvent {
                id: self.event_id,
                name: self.event_name,
            },
            start_ts: self.start_ts,
            end_ts: self.end_ts,
            max_persons: self.max_persons,
            organizer: MeetupOrganizer {
                id: self.organizer_id,
                username: self.organizer_username,
                email: self.organizer_email,
            },
            joined_persons: None,
            joined_persons_count: self.joined_persons_count as i32,
            is_joined: false,
            status,
            cancelled_reason: self.cancelled_reason,
            cancelled_at: self.cancelled_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Joined row for single-meetup reads, including viewer flags
#[derive(Debug, Clone, FromRow)]
pub struct MeetupDetailRow {
    pub meetup_id: i64,
    pub meetup_name: String,
    pub venue_id: i64,
    pub venue_name: String,
    pub event_id: i64,
    pub event_name: String,
    pub start_ts: i64,
    pub end_ts: i64,
    pub max_persons: i32,
    pub organizer_id: i64,
    pub organizer_username: String,
    pub organizer_email: String,
    pub joined_persons_count: i64,
    pub is_joined: bool,
    pub is_organizer_or_participant: bool,
    pub status: String,
    pub cancelled_reason: Option<String>,
    pub cancelled_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MeetupDetailRow {
    /// Convert to a meetup entity; `joined_persons` is filled by the caller
    /// when the viewer is allowed to see it
    pub fn into_meetup(self) -> Result<Meetup, DomainError> {
        let status = self.status.parse::<MeetupStatus>()?;
        Ok(Meetup {
            id: self.meetup_id,
            name: self.meetup_name,
            venue: MeetupVenue {
                id: self.venue_id,
                name: self.venue_name,
            },
            event: MeetupEvent {
                id: self.event_id,
                name: self.event_name,
            },
            start_ts: self.start_ts,
            end_ts: self.end_ts,
            max_persons: self.max_persons,
            organizer: MeetupOrganizer {
                id: self.organizer_id,
                username: self.organizer_username,
                email: self.organizer_email,
            },
            joined_persons: None,
            joined_persons_count: self.joined_persons_count as i32,
            is_joined: self.is_joined,
            status,
            cancelled_reason: self.cancelled_reason,
            cancelled_at: self.cancelled_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row for the joined-persons projection
#[derive(Debug, Clone, FromRow)]
pub struct JoinedPersonRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub joined_at: i64,
}

impl From<JoinedPersonRow> for JoinedPerson {
    fn from(row: JoinedPersonRow) -> Self {
        JoinedPerson {
            id: row.id,
            username: row.username,
            email: row.email,
            joined_at: row.joined_at,
        }
    }
}
