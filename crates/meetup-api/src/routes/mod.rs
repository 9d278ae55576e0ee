//! Route definitions
//!
//! All API routes organized by domain.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{events, health, incoming, meetups, session, venues};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(session_routes())
        .merge(event_routes())
        .merge(venue_routes())
        .merge(meetup_routes())
        .merge(incoming_meetup_routes())
}

/// Session routes
fn session_routes() -> Router<AppState> {
    Router::new().route("/session", post(session::create_session))
}

/// Event routes
fn event_routes() -> Router<AppState> {
    Router::new().route("/events", get(events::get_events))
}

/// Venue routes
fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(venues::get_venues))
        .route("/venues/:venue_id", get(venues::get_venue))
}

/// Meetup routes
fn meetup_routes() -> Router<AppState> {
    Router::new()
        .route("/meetups", post(meetups::create_meetup))
        .route("/meetups", get(meetups::get_meetups))
        .route("/meetups/:meetup_id", get(meetups::get_meetup))
        .route("/meetups/:meetup_id", put(meetups::update_meetup))
        .route("/meetups/:meetup_id", delete(meetups::cancel_meetup))
}

/// Incoming-meetup routes (the authenticated user's joined meetups)
fn incoming_meetup_routes() -> Router<AppState> {
    Router::new()
        .route("/incoming-meetups", get(incoming::get_incoming_meetups))
        .route("/incoming-meetups/:meetup_id", put(incoming::join_meetup))
        .route(
            "/incoming-meetups/:meetup_id",
            delete(incoming::leave_meetup),
        )
}
