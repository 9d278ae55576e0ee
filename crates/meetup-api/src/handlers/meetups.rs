//! Meetup handlers
//!
//! Endpoints for meetup creation, lookup, update, and cancellation.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use meetup_service::dto::{
    CancelMeetupRequest, CancelMeetupResponse, CreateMeetupRequest, ListMeetupsQuery,
    MeetupResponse, MeetupSummaryResponse, UpdateMeetupRequest,
};
use meetup_service::MeetupService;

use crate::extractors::AuthUser;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a meetup
///
/// POST /meetups
pub async fn create_meetup(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateMeetupRequest>,
) -> ApiResult<Created<Json<MeetupResponse>>> {
    let service = MeetupService::new(state.service_context());
    let response = service.create_meetup(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List open meetups, nearest start first
///
/// GET /meetups
pub async fn get_meetups(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListMeetupsQuery>,
) -> ApiResult<Json<Vec<MeetupSummaryResponse>>> {
    let service = MeetupService::new(state.service_context());
    let meetups = service.get_meetups(query).await?;
    Ok(Json(meetups))
}

/// Get a single meetup
///
/// GET /meetups/{meetup_id}
pub async fn get_meetup(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(meetup_id): Path<i64>,
) -> ApiResult<Json<MeetupResponse>> {
    let service = MeetupService::new(state.service_context());
    let meetup = service.get_meetup(meetup_id, auth.user_id).await?;
    Ok(Json(meetup))
}

/// Update a meetup (organizer only)
///
/// PUT /meetups/{meetup_id}
pub async fn update_meetup(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(meetup_id): Path<i64>,
    Json(request): Json<UpdateMeetupRequest>,
) -> ApiResult<Json<MeetupResponse>> {
    let service = MeetupService::new(state.service_context());
    let meetup = service
        .update_meetup(meetup_id, auth.user_id, request)
        .await?;
    Ok(Json(meetup))
}

/// Cancel a meetup (organizer only)
///
/// DELETE /meetups/{meetup_id}?cancelled_reason=...
pub async fn cancel_meetup(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(meetup_id): Path<i64>,
    Query(request): Query<CancelMeetupRequest>,
) -> ApiResult<Json<CancelMeetupResponse>> {
    let service = MeetupService::new(state.service_context());
    let response = service
        .cancel_meetup(meetup_id, auth.user_id, request)
        .await?;
    Ok(Json(response))
}
