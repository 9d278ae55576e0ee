//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Session Requests
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Meetup Requests
// ============================================================================

/// Create meetup request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMeetupRequest {
    #[validate(length(min = 1, max = 100, message = "Meetup name must be 1-100 characters"))]
    pub name: String,

    #[validate(range(min = 1, message = "venue_id is required"))]
    pub venue_id: i64,

    #[validate(range(min = 1, message = "event_id is required"))]
    pub event_id: i64,

    #[validate(range(min = 1, message = "start_ts must be a positive epoch second"))]
    pub start_ts: i64,

    #[validate(range(min = 1, message = "end_ts must be a positive epoch second"))]
    pub end_ts: i64,

    #[validate(range(min = 1, message = "max_persons must be at least 1"))]
    pub max_persons: i32,
}

/// Update meetup request
///
/// Only the name, the time window, and the participant cap can change.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMeetupRequest {
    #[validate(length(min = 1, max = 100, message = "Meetup name must be 1-100 characters"))]
    pub name: String,

    #[validate(range(min = 1, message = "start_ts must be a positive epoch second"))]
    pub start_ts: i64,

    #[validate(range(min = 1, message = "end_ts must be a positive epoch second"))]
    pub end_ts: i64,

    #[validate(range(min = 1, message = "max_persons must be at least 1"))]
    pub max_persons: i32,
}

/// Cancel meetup request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CancelMeetupRequest {
    #[validate(length(min = 1, message = "Cancelled reason is required"))]
    pub cancelled_reason: String,
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the open-meetups listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMeetupsQuery {
    pub event_id: Option<i64>,
    pub limit: Option<i64>,
}

/// Query parameters for the incoming-meetups listing
///
/// `event_ids` and `venue_ids` are comma-separated id lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingMeetupsQuery {
    pub status: Option<String>,
    pub event_ids: Option<String>,
    pub venue_ids: Option<String>,
}

/// Query parameters for the venue listing
///
/// `meetup_start` and `meetup_end` are times of day in `HH:MM` form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListVenuesQuery {
    pub event_id: Option<i64>,
    pub meetup_start: Option<String>,
    pub meetup_end: Option<String>,
}
