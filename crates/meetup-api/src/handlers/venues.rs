//! Venue handlers
//!
//! Endpoints for the venue catalog.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use meetup_service::dto::{ListVenuesQuery, VenueResponse};
use meetup_service::VenueService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// List venues
///
/// GET /venues
pub async fn get_venues(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListVenuesQuery>,
) -> ApiResult<Json<Vec<VenueResponse>>> {
    let service = VenueService::new(state.service_context());
    let venues = service.get_venues(query).await?;
    Ok(Json(venues))
}

/// Get a single venue with its supported events
///
/// GET /venues/{venue_id}
pub async fn get_venue(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(venue_id): Path<i64>,
) -> ApiResult<Json<VenueResponse>> {
    let service = VenueService::new(state.service_context());
    let venue = service.get_venue(venue_id).await?;
    Ok(Json(venue))
}
