//! Event service - event catalog queries

use tracing::instrument;

use crate::dto::responses::EventResponse;
use crate::services::context::ServiceContext;
use crate::services::error::ServiceResult;

/// Service for the event catalog
pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List all events
    #[instrument(skip(self))]
    pub async fn get_events(&self) -> ServiceResult<Vec<EventResponse>> {
        let events = self.ctx.event_repo().list().await?;
        Ok(events.into_iter().map(EventResponse::from).collect())
    }
}
