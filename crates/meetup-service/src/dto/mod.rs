//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs

pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CancelMeetupRequest, CreateMeetupRequest, CreateSessionRequest, IncomingMeetupsQuery,
    ListMeetupsQuery, ListVenuesQuery, UpdateMeetupRequest,
};

// Re-export commonly used response types
pub use responses::{
    ApiResponse, CancelMeetupResponse, EventRefResponse, EventResponse, JoinedPersonResponse,
    MeetupResponse, MeetupSummaryResponse, OrganizerResponse, SessionResponse,
    SupportedEventResponse, VenueRefResponse, VenueResponse,
};
