//! Event handlers
//!
//! Endpoints for the event catalog.

use axum::{extract::State, Json};
use meetup_service::dto::EventResponse;
use meetup_service::EventService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// List all events
///
/// GET /events
pub async fn get_events(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let events = service.get_events().await?;
    Ok(Json(events))
}
