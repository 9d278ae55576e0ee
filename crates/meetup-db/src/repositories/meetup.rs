//! PostgreSQL implementation of MeetupRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use meetup_core::entities::{JoinedPerson, Meetup, MeetupStatus};
use meetup_core::error::DomainError;
use meetup_core::traits::{IncomingMeetupFilter, IncomingStatus, MeetupFilter, MeetupRepository, RepoResult};

use crate::models::{JoinedPersonRow, MeetupDetailRow, MeetupSummaryRow};

use super::error::map_db_error;

const SUMMARY_SELECT: &str = r"
    SELECT
        m.id AS meetup_id,
        m.name AS meetup_name,
        v.id AS venue_id,
        v.name AS venue_name,
        e.id AS event_id,
        e.name AS event_name,
        m.start_ts,
        m.end_ts,
        m.max_persons,
        u.id AS organizer_id,
        u.username AS organizer_username,
        u.email AS organizer_email,
        (SELECT COUNT(*) FROM meetup_user mu WHERE mu.meetup_id = m.id) AS joined_persons_count,
        m.status,
        m.cancelled_reason,
        m.cancelled_at,
        m.created_at,
        m.updated_at
    FROM meetup m
    JOIN venue v ON m.venue_id = v.id
    JOIN event e ON m.event_id = e.id
    JOIN app_user u ON m.organizer_id = u.id
";

/// PostgreSQL implementation of MeetupRepository
#[derive(Clone)]
pub struct PgMeetupRepository {
    pool: PgPool,
}

impl PgMeetupRepository {
    /// Create a new PgMeetupRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn parse_id_list(raw: &str) -> Vec<i64> {
        raw.split(',')
            .filter_map(|id| id.trim().parse::<i64>().ok())
            .collect()
    }

    /// Advisory lock key for a (venue, event) capacity window
    ///
    /// Single-bigint fold, no narrowing casts; the pair is injective while
    /// both ids fit in 32 bits, which sequential BIGSERIAL ids do.
    fn capacity_lock_key(venue_id: i64, event_id: i64) -> i64 {
        (venue_id << 32) ^ event_id
    }
}

#[async_trait]
impl MeetupRepository for PgMeetupRepository {
    #[instrument(skip(self))]
    async fn count_overlapping_venue_event(
        &self,
        venue_id: i64,
        event_id: i64,
        start_ts: i64,
        end_ts: i64,
        exclude_meetup_id: Option<i64>,
    ) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM meetup m
            WHERE m.venue_id = $1
            AND m.event_id = $2
            AND m.start_ts < $4 AND m.end_ts > $3
            AND ($5::BIGINT IS NULL OR m.id <> $5)
            ",
        )
        .bind(venue_id)
        .bind(event_id)
        .bind(start_ts)
        .bind(end_ts)
        .bind(exclude_meetup_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self, meetup))]
    async fn save(&self, meetup: &Meetup, capacity: i32) -> RepoResult<i64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Serialize writers on the same capacity window, then re-check the
        // count inside the transaction so concurrent saves cannot both pass
        // the caller's pre-count.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(Self::capacity_lock_key(meetup.venue.id, meetup.event.id))
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let exclude = (meetup.id != 0).then_some(meetup.id);
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM meetup m
            WHERE m.venue_id = $1
            AND m.event_id = $2
            AND m.start_ts < $4 AND m.end_ts > $3
            AND ($5::BIGINT IS NULL OR m.id <> $5)
            ",
        )
        .bind(meetup.venue.id)
        .bind(meetup.event.id)
        .bind(meetup.start_ts)
        .bind(meetup.end_ts)
        .bind(exclude)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if count >= i64::from(capacity) {
            return Err(DomainError::ExceedVenueCapacity);
        }

        let id = if meetup.id == 0 {
            sqlx::query_scalar::<_, i64>(
                r"
                INSERT INTO meetup (
                    name, venue_id, event_id, start_ts, end_ts, max_persons,
                    organizer_id, status, created_at, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING id
                ",
            )
            .bind(&meetup.name)
            .bind(meetup.venue.id)
            .bind(meetup.event.id)
            .bind(meetup.start_ts)
            .bind(meetup.end_ts)
            .bind(meetup.max_persons)
            .bind(meetup.organizer.id)
            .bind(meetup.status.as_str())
            .bind(meetup.created_at)
            .bind(meetup.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?
        } else {
            let result = sqlx::query(
                r"
                UPDATE meetup
                SET name = $2, start_ts = $3, end_ts = $4, max_persons = $5, updated_at = $6
                WHERE id = $1
                ",
            )
            .bind(meetup.id)
            .bind(&meetup.name)
            .bind(meetup.start_ts)
            .bind(meetup.end_ts)
            .bind(meetup.max_persons)
            .bind(meetup.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if result.rows_affected() == 0 {
                return Err(DomainError::MeetupNotFound(meetup.id));
            }
            meetup.id
        };

        tx.commit().await.map_err(map_db_error)?;

        Ok(id)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: MeetupFilter) -> RepoResult<Vec<Meetup>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(SUMMARY_SELECT);
        builder.push(" WHERE m.status = ");
        builder.push_bind(MeetupStatus::Open.as_str());

        if let Some(event_id) = filter.event_id {
            builder.push(" AND m.event_id = ");
            builder.push_bind(event_id);
        }

        builder.push(" ORDER BY m.start_ts ASC");

        if let Some(limit) = filter.limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit.clamp(1, 1000));
        }

        let rows = builder
            .build_query_as::<MeetupSummaryRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(MeetupSummaryRow::into_meetup).collect()
    }

    #[instrument(skip(self))]
    async fn get(&self, meetup_id: i64, viewer_user_id: i64) -> RepoResult<Option<(Meetup, bool)>> {
        let row = sqlx::query_as::<_, MeetupDetailRow>(
            r"
            SELECT
                m.id AS meetup_id,
                m.name AS meetup_name,
                v.id AS venue_id,
                v.name AS venue_name,
                e.id AS event_id,
                e.name AS event_name,
                m.start_ts,
                m.end_ts,
                m.max_persons,
                u.id AS organizer_id,
                u.username AS organizer_username,
                u.email AS organizer_email,
                (SELECT COUNT(*) FROM meetup_user mu WHERE mu.meetup_id = m.id) AS joined_persons_count,
                EXISTS (
                    SELECT 1 FROM meetup_user mu WHERE mu.meetup_id = m.id AND mu.user_id = $2
                ) AS is_joined,
                (
                    u.id = $2 OR EXISTS (
                        SELECT 1 FROM meetup_user mu WHERE mu.meetup_id = m.id AND mu.user_id = $2
                    )
                ) AS is_organizer_or_participant,
                m.status,
                m.cancelled_reason,
                m.cancelled_at,
                m.created_at,
                m.updated_at
            FROM meetup m
            JOIN venue v ON m.venue_id = v.id
            JOIN event e ON m.event_id = e.id
            JOIN app_user u ON m.organizer_id = u.id
            WHERE m.id = $1
            ",
        )
        .bind(meetup_id)
        .bind(viewer_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let is_member = row.is_organizer_or_participant;
        let mut meetup = row.into_meetup()?;
        if is_member {
            meetup.joined_persons = Some(self.joined_persons(meetup_id).await?);
        }

        Ok(Some((meetup, is_member)))
    }

    #[instrument(skip(self))]
    async fn cancel(&self, meetup_id: i64, reason: &str, cancelled_at: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE meetup
            SET status = $2, cancelled_reason = $3, cancelled_at = $4, updated_at = $4
            WHERE id = $1
            ",
        )
        .bind(meetup_id)
        .bind(MeetupStatus::Cancelled.as_str())
        .bind(reason)
        .bind(cancelled_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MeetupNotFound(meetup_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_overlapping_for_user(
        &self,
        user_id: i64,
        start_ts: i64,
        end_ts: i64,
    ) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM meetup_user mu
            JOIN meetup m ON mu.meetup_id = m.id
            WHERE mu.user_id = $1
            AND m.start_ts < $3 AND m.end_ts > $2
            ",
        )
        .bind(user_id)
        .bind(start_ts)
        .bind(end_ts)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn incoming_for_user(
        &self,
        filter: IncomingMeetupFilter,
        now: i64,
    ) -> RepoResult<Vec<Meetup>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(SUMMARY_SELECT);
        builder.push(" JOIN meetup_user muf ON muf.meetup_id = m.id AND muf.user_id = ");
        builder.push_bind(filter.user_id);
        builder.push(" WHERE m.end_ts > ");
        builder.push_bind(now);

        match filter.status {
            IncomingStatus::All => {}
            IncomingStatus::Open | IncomingStatus::Cancelled => {
                builder.push(" AND m.status = ");
                builder.push_bind(filter.status.as_str());
            }
        }

        if let Some(raw) = filter.event_ids.as_deref() {
            builder.push(" AND m.event_id = ANY(");
            builder.push_bind(Self::parse_id_list(raw));
            builder.push(")");
        }

        if let Some(raw) = filter.venue_ids.as_deref() {
            builder.push(" AND m.venue_id = ANY(");
            builder.push_bind(Self::parse_id_list(raw));
            builder.push(")");
        }

        builder.push(" ORDER BY m.start_ts ASC");

        let rows = builder
            .build_query_as::<MeetupSummaryRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(MeetupSummaryRow::into_meetup).collect()
    }

    #[instrument(skip(self))]
    async fn joined_persons(&self, meetup_id: i64) -> RepoResult<Vec<JoinedPerson>> {
        let rows = sqlx::query_as::<_, JoinedPersonRow>(
            r"
            SELECT u.id, u.username, u.email, mu.joined_at
            FROM meetup_user mu
            JOIN app_user u ON mu.user_id = u.id
            WHERE mu.meetup_id = $1
            ORDER BY mu.joined_at ASC
            ",
        )
        .bind(meetup_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(JoinedPerson::from).collect())
    }
}
