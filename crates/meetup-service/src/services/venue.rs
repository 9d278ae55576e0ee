//! Venue service - venue catalog queries

use tracing::instrument;

use meetup_core::traits::VenueFilter;
use meetup_core::{DomainError, TimeOfDay};

use crate::dto::requests::ListVenuesQuery;
use crate::dto::responses::VenueResponse;
use crate::services::context::ServiceContext;
use crate::services::error::{ServiceError, ServiceResult};

/// Service for the venue catalog
pub struct VenueService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VenueService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List venues, optionally narrowed by event and by a time-of-day window
    #[instrument(skip(self))]
    pub async fn get_venues(&self, query: ListVenuesQuery) -> ServiceResult<Vec<VenueResponse>> {
        let filter = VenueFilter {
            event_id: query.event_id,
            meetup_start: parse_time_of_day(query.meetup_start.as_deref())?,
            meetup_end: parse_time_of_day(query.meetup_end.as_deref())?,
        };
        let venues = self.ctx.venue_repo().list(filter).await?;
        Ok(venues.into_iter().map(VenueResponse::from).collect())
    }

    /// Fetch a single venue with its supported events
    #[instrument(skip(self))]
    pub async fn get_venue(&self, venue_id: i64) -> ServiceResult<VenueResponse> {
        let venue = self
            .ctx
            .venue_repo()
            .get(venue_id)
            .await?
            .ok_or(DomainError::VenueNotFound(venue_id))?;
        Ok(VenueResponse::from(venue))
    }
}

fn parse_time_of_day(value: Option<&str>) -> ServiceResult<Option<TimeOfDay>> {
    value
        .map(|s| {
            s.parse::<TimeOfDay>()
                .map_err(|e| ServiceError::validation(e.to_string()))
        })
        .transpose()
}
