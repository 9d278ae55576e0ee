//! Incoming-meetup handlers
//!
//! Endpoints for the authenticated user's joined meetups: listing the ones
//! that have not ended yet, joining, and leaving.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use meetup_service::dto::{IncomingMeetupsQuery, MeetupResponse};
use meetup_service::MeetupService;

use crate::extractors::AuthUser;
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// List the user's incoming meetups
///
/// GET /incoming-meetups
pub async fn get_incoming_meetups(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<IncomingMeetupsQuery>,
) -> ApiResult<Json<Vec<MeetupResponse>>> {
    let service = MeetupService::new(state.service_context());
    let meetups = service.get_incoming_meetups(auth.user_id, query).await?;
    Ok(Json(meetups))
}

/// Join a meetup
///
/// PUT /incoming-meetups/{meetup_id}
pub async fn join_meetup(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(meetup_id): Path<i64>,
) -> ApiResult<Json<MeetupResponse>> {
    let service = MeetupService::new(state.service_context());
    let meetup = service.join_meetup(meetup_id, auth.user_id).await?;
    Ok(Json(meetup))
}

/// Leave a meetup
///
/// DELETE /incoming-meetups/{meetup_id}
pub async fn leave_meetup(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(meetup_id): Path<i64>,
) -> ApiResult<NoContent> {
    let service = MeetupService::new(state.service_context());
    service.leave_meetup(meetup_id, auth.user_id).await?;
    Ok(NoContent)
}
