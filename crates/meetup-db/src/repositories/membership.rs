//! PostgreSQL implementation of MembershipRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use meetup_core::traits::{MembershipRepository, RepoResult};

use super::error::map_db_error;

/// PostgreSQL implementation of MembershipRepository
#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    /// Create a new PgMembershipRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    #[instrument(skip(self))]
    async fn join(&self, meetup_id: i64, user_id: i64, joined_at: i64) -> RepoResult<()> {
        // Idempotent on the (meetup_id, user_id) primary key
        sqlx::query(
            r"
            INSERT INTO meetup_user (meetup_id, user_id, joined_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (meetup_id, user_id) DO NOTHING
            ",
        )
        .bind(meetup_id)
        .bind(user_id)
        .bind(joined_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn leave(&self, meetup_id: i64, user_id: i64) -> RepoResult<()> {
        sqlx::query(
            r"
            DELETE FROM meetup_user WHERE meetup_id = $1 AND user_id = $2
            ",
        )
        .bind(meetup_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self, meetup_id: i64, user_id: i64) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM meetup_user WHERE meetup_id = $1 AND user_id = $2
            ",
        )
        .bind(meetup_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}
