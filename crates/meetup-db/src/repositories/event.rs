//! PostgreSQL implementation of EventRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use meetup_core::entities::Event;
use meetup_core::traits::{EventRepository, RepoResult};

use crate::models::EventRow;

use super::error::map_db_error;

/// PostgreSQL implementation of EventRepository
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    /// Create a new PgEventRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self))]
    async fn get(&self, event_id: i64) -> RepoResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            r"
            SELECT id, name FROM event WHERE id = $1
            ",
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(Event::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r"
            SELECT id, name FROM event ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Event::from).collect())
    }
}
