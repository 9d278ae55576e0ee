//! PostgreSQL implementation of VenueRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use meetup_core::entities::Venue;
use meetup_core::traits::{RepoResult, VenueFilter, VenueRepository};

use crate::models::{rows_to_venues, VenueEventRow};

use super::error::map_db_error;

const VENUE_SELECT: &str = r"
    SELECT
        v.id AS venue_id,
        v.name AS venue_name,
        v.open_days AS venue_open_days,
        v.open_at AS venue_open_at,
        v.closed_at AS venue_closed_at,
        v.timezone AS venue_timezone,
        e.id AS event_id,
        e.name AS event_name,
        ve.meetups_capacity AS meetups_capacity
    FROM venue v
    JOIN venue_event ve ON v.id = ve.venue_id
    JOIN event e ON ve.event_id = e.id
";

/// PostgreSQL implementation of VenueRepository
#[derive(Clone)]
pub struct PgVenueRepository {
    pool: PgPool,
}

impl PgVenueRepository {
    /// Create a new PgVenueRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VenueRepository for PgVenueRepository {
    #[instrument(skip(self))]
    async fn is_event_supported(&self, venue_id: i64, event_id: i64) -> RepoResult<bool> {
        let supported = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM venue_event WHERE venue_id = $1 AND event_id = $2
            )
            ",
        )
        .bind(venue_id)
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(supported)
    }

    #[instrument(skip(self))]
    async fn event_capacity(&self, venue_id: i64, event_id: i64) -> RepoResult<Option<i32>> {
        let capacity = sqlx::query_scalar::<_, i32>(
            r"
            SELECT meetups_capacity FROM venue_event WHERE venue_id = $1 AND event_id = $2
            ",
        )
        .bind(venue_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(capacity)
    }

    #[instrument(skip(self))]
    async fn get(&self, venue_id: i64) -> RepoResult<Option<Venue>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(VENUE_SELECT);
        builder.push(" WHERE v.id = ");
        builder.push_bind(venue_id);

        let rows = builder
            .build_query_as::<VenueEventRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows_to_venues(rows)?.into_iter().next())
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: VenueFilter) -> RepoResult<Vec<Venue>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(VENUE_SELECT);
        builder.push(" WHERE TRUE");

        if let Some(event_id) = filter.event_id {
            builder.push(" AND ve.event_id = ");
            builder.push_bind(event_id);
        }

        // HH:MM strings compare correctly as text
        if let Some(start) = filter.meetup_start {
            builder.push(" AND v.open_at <= ");
            builder.push_bind(start.to_string());
        }

        if let Some(end) = filter.meetup_end {
            builder.push(" AND v.closed_at >= ");
            builder.push_bind(end.to_string());
        }

        builder.push(" ORDER BY v.id ASC");

        let rows = builder
            .build_query_as::<VenueEventRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows_to_venues(rows)?)
    }
}
