//! Domain errors - the closed set of error kinds surfaced by the meetup core

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Meetup not found: {0}")]
    MeetupNotFound(i64),

    #[error("Venue not found: {0}")]
    VenueNotFound(i64),

    #[error("Event not found: {0}")]
    EventNotFound(i64),

    #[error("User not found: {0}")]
    UserNotFound(i64),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Event is not supported by the venue")]
    InvalidEvent,

    #[error("Invalid username or password")]
    InvalidCredentials,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("User is not authorized to access this resource")]
    Forbidden,

    #[error("User is not a participant of the meetup")]
    UserNotParticipant,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Venue capacity is full on the designated meetup time")]
    ExceedVenueCapacity,

    #[error("Venue is closed on the designated meetup time")]
    VenueIsClosed,

    #[error("Max persons is less than number of joined persons")]
    MaxPersonsLessThanJoinedPersons,

    #[error("Meetup is started")]
    MeetupStarted,

    #[error("Meetup is finished")]
    MeetupFinished,

    #[error("Meetup is cancelled")]
    MeetupCancelled,

    #[error("Meetup is closed")]
    MeetupClosed,

    #[error("Meetup overlaps with another meetup the user already joined")]
    MeetupOverlaps,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Notification error: {0}")]
    NotificationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::MeetupNotFound(_) => "ERR_MEETUP_NOT_FOUND",
            Self::VenueNotFound(_) => "ERR_VENUE_NOT_FOUND",
            Self::EventNotFound(_) => "ERR_EVENT_NOT_FOUND",
            Self::UserNotFound(_) => "ERR_USER_NOT_FOUND",

            Self::Validation(_) => "ERR_BAD_REQUEST",
            Self::InvalidEvent => "ERR_INVALID_EVENT",
            Self::InvalidCredentials => "ERR_INVALID_CREDS",

            Self::Forbidden => "ERR_FORBIDDEN_ACCESS",
            Self::UserNotParticipant => "ERR_USER_NOT_PARTICIPANT",

            Self::ExceedVenueCapacity => "ERR_EXCEED_VENUE_CAPACITY",
            Self::VenueIsClosed => "ERR_VENUE_IS_CLOSED",
            Self::MaxPersonsLessThanJoinedPersons => "ERR_MAX_PERSONS_LESS_THAN_JOINED_PERSONS",
            Self::MeetupStarted => "ERR_MEETUP_STARTED",
            Self::MeetupFinished => "ERR_MEETUP_FINISHED",
            Self::MeetupCancelled => "ERR_MEETUP_CANCELLED",
            Self::MeetupClosed => "ERR_MEETUP_CLOSED",
            Self::MeetupOverlaps => "ERR_MEETUP_OVERLAPS",

            Self::InvalidTimezone(_)
            | Self::DatabaseError(_)
            | Self::NotificationError(_)
            | Self::InternalError(_) => "ERR_INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MeetupNotFound(_)
                | Self::VenueNotFound(_)
                | Self::EventNotFound(_)
                | Self::UserNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidEvent | Self::InvalidCredentials
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Forbidden | Self::UserNotParticipant)
    }

    /// Check if this is a conflict with the current meetup/venue state
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::ExceedVenueCapacity
                | Self::VenueIsClosed
                | Self::MaxPersonsLessThanJoinedPersons
                | Self::MeetupStarted
                | Self::MeetupFinished
                | Self::MeetupCancelled
                | Self::MeetupClosed
                | Self::MeetupOverlaps
        )
    }
}
