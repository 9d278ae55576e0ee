//! Meetup service - meetup lifecycle orchestration
//!
//! Creation, update, cancellation, join/leave, and the listing queries.
//! Scheduling rules (venue support, capacity, opening hours) are enforced
//! here; the capacity pre-count is advisory and the storage layer re-checks
//! it atomically on save.

use tracing::instrument;
use validator::Validate;

use meetup_core::traits::{IncomingMeetupFilter, IncomingStatus, MeetupFilter};
use meetup_core::{validate_opening_hours, DomainError, Meetup, MeetupConfig, Venue};

use crate::dto::requests::{
    CancelMeetupRequest, CreateMeetupRequest, IncomingMeetupsQuery, ListMeetupsQuery,
    UpdateMeetupRequest,
};
use crate::dto::responses::{
    CancelMeetupResponse, EventRefResponse, MeetupResponse, MeetupSummaryResponse,
    OrganizerResponse, VenueRefResponse,
};
use crate::services::context::ServiceContext;
use crate::services::error::{ServiceError, ServiceResult};

/// Service for meetup lifecycle operations
pub struct MeetupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MeetupService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new meetup
    ///
    /// The meetup must use an event the venue supports, fit within the
    /// venue's opening hours, and not exceed the venue-event capacity in
    /// its time window.
    #[instrument(skip(self, request))]
    pub async fn create_meetup(
        &self,
        organizer_id: i64,
        request: CreateMeetupRequest,
    ) -> ServiceResult<MeetupResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let (venue, capacity) = self
            .validate_schedule(
                request.venue_id,
                request.event_id,
                request.start_ts,
                request.end_ts,
                None,
            )
            .await?;

        let mut meetup = Meetup::new(MeetupConfig {
            name: request.name,
            venue_id: request.venue_id,
            event_id: request.event_id,
            start_ts: request.start_ts,
            end_ts: request.end_ts,
            max_persons: request.max_persons,
            organizer_id,
        })?;
        let now = self.ctx.clock().now_ts();
        meetup.created_at = now;
        meetup.updated_at = now;

        let id = self.ctx.meetup_repo().save(&meetup, capacity).await?;

        let event = self
            .ctx
            .event_repo()
            .get(request.event_id)
            .await?
            .ok_or(DomainError::EventNotFound(request.event_id))?;
        let organizer = self
            .ctx
            .user_repo()
            .get_by_id(organizer_id)
            .await?
            .ok_or(DomainError::UserNotFound(organizer_id))?;

        meetup.id = id;
        meetup.venue.name = venue.name;
        meetup.event.name = event.name;
        meetup.organizer.username = organizer.username;
        meetup.organizer.email = organizer.email;

        Ok(MeetupResponse::from(meetup))
    }

    /// List open meetups, nearest start first
    #[instrument(skip(self))]
    pub async fn get_meetups(
        &self,
        query: ListMeetupsQuery,
    ) -> ServiceResult<Vec<MeetupSummaryResponse>> {
        let meetups = self
            .ctx
            .meetup_repo()
            .list(MeetupFilter {
                event_id: query.event_id,
                limit: query.limit,
            })
            .await?;
        Ok(meetups.into_iter().map(MeetupSummaryResponse::from).collect())
    }

    /// Fetch a single meetup as seen by `user_id`
    ///
    /// The joined-persons list and the cancellation fields are stripped
    /// unless the viewer is the organizer or a participant.
    #[instrument(skip(self))]
    pub async fn get_meetup(&self, meetup_id: i64, user_id: i64) -> ServiceResult<MeetupResponse> {
        let (mut meetup, is_organizer_or_participant) = self
            .ctx
            .meetup_repo()
            .get(meetup_id, user_id)
            .await?
            .ok_or(DomainError::MeetupNotFound(meetup_id))?;

        if is_organizer_or_participant {
            if meetup.joined_persons.is_none() {
                meetup.joined_persons = Some(Vec::new());
            }
        } else {
            meetup.redact_for_outsider();
        }

        Ok(MeetupResponse::from(meetup))
    }

    /// Update a meetup's name, time window, or participant cap
    ///
    /// Organizer only. The new window is re-validated against the same
    /// scheduling rules as creation, excluding the meetup itself from the
    /// capacity count.
    #[instrument(skip(self, request))]
    pub async fn update_meetup(
        &self,
        meetup_id: i64,
        user_id: i64,
        request: UpdateMeetupRequest,
    ) -> ServiceResult<MeetupResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let (mut meetup, _) = self
            .ctx
            .meetup_repo()
            .get(meetup_id, user_id)
            .await?
            .ok_or(DomainError::MeetupNotFound(meetup_id))?;

        if meetup.organizer.id != user_id {
            return Err(DomainError::Forbidden.into());
        }
        if request.max_persons < meetup.joined_persons_count {
            return Err(DomainError::MaxPersonsLessThanJoinedPersons.into());
        }

        let (_, capacity) = self
            .validate_schedule(
                meetup.venue.id,
                meetup.event.id,
                request.start_ts,
                request.end_ts,
                Some(meetup_id),
            )
            .await?;

        meetup.name = request.name;
        meetup.start_ts = request.start_ts;
        meetup.end_ts = request.end_ts;
        meetup.max_persons = request.max_persons;
        meetup.updated_at = self.ctx.clock().now_ts();

        self.ctx.meetup_repo().save(&meetup, capacity).await?;

        Ok(MeetupResponse::from(meetup))
    }

    /// Cancel a meetup and notify every joined person by email
    ///
    /// Organizer only, and only before the meetup starts.
    #[instrument(skip(self, request))]
    pub async fn cancel_meetup(
        &self,
        meetup_id: i64,
        user_id: i64,
        request: CancelMeetupRequest,
    ) -> ServiceResult<CancelMeetupResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let (meetup, _) = self
            .ctx
            .meetup_repo()
            .get(meetup_id, user_id)
            .await?
            .ok_or(DomainError::MeetupNotFound(meetup_id))?;

        if meetup.organizer.id != user_id {
            return Err(DomainError::Forbidden.into());
        }
        let now = self.ctx.clock().now_ts();
        if meetup.has_started(now) {
            return Err(DomainError::MeetupStarted.into());
        }
        if meetup.is_cancelled() {
            return Err(DomainError::MeetupCancelled.into());
        }

        self.ctx
            .meetup_repo()
            .cancel(meetup_id, &request.cancelled_reason, now)
            .await?;

        let (meetup, _) = self
            .ctx
            .meetup_repo()
            .get(meetup_id, user_id)
            .await?
            .ok_or(DomainError::MeetupNotFound(meetup_id))?;

        let joined_persons = self.ctx.meetup_repo().joined_persons(meetup_id).await?;
        let emails: Vec<String> = joined_persons.into_iter().map(|p| p.email).collect();
        if !emails.is_empty() {
            self.ctx
                .notifier()
                .send_cancellation_email(&emails, &request.cancelled_reason)
                .await?;
        }

        Ok(CancelMeetupResponse {
            id: meetup.id,
            name: meetup.name,
            venue: VenueRefResponse {
                id: meetup.venue.id,
                name: meetup.venue.name,
            },
            event: EventRefResponse {
                id: meetup.event.id,
                name: meetup.event.name,
            },
            start_ts: meetup.start_ts,
            end_ts: meetup.end_ts,
            max_persons: meetup.max_persons,
            organizer: OrganizerResponse {
                id: meetup.organizer.id,
                username: meetup.organizer.username,
                email: meetup.organizer.email,
            },
            status: meetup.status.to_string(),
            cancelled_reason: meetup
                .cancelled_reason
                .unwrap_or(request.cancelled_reason),
            cancelled_at: meetup.cancelled_at.unwrap_or(now),
        })
    }

    /// Join a meetup
    ///
    /// The meetup must be open, not finished, not full, and must not
    /// overlap any meetup the user already joined (which also rejects
    /// joining the same meetup twice). The organizer is notified by
    /// email.
    #[instrument(skip(self))]
    pub async fn join_meetup(&self, meetup_id: i64, user_id: i64) -> ServiceResult<MeetupResponse> {
        let (meetup, _) = self
            .ctx
            .meetup_repo()
            .get(meetup_id, user_id)
            .await?
            .ok_or(DomainError::MeetupNotFound(meetup_id))?;

        let now = self.ctx.clock().now_ts();
        if meetup.has_finished(now) {
            return Err(DomainError::MeetupFinished.into());
        }
        if meetup.is_cancelled() {
            return Err(DomainError::MeetupCancelled.into());
        }
        if meetup.is_full() {
            return Err(DomainError::MeetupClosed.into());
        }

        let overlapping = self
            .ctx
            .meetup_repo()
            .count_overlapping_for_user(user_id, meetup.start_ts, meetup.end_ts)
            .await?;
        if overlapping > 0 {
            return Err(DomainError::MeetupOverlaps.into());
        }

        self.ctx
            .membership_repo()
            .join(meetup_id, user_id, now)
            .await?;

        let (meetup, _) = self
            .ctx
            .meetup_repo()
            .get(meetup_id, user_id)
            .await?
            .ok_or(DomainError::MeetupNotFound(meetup_id))?;

        let user = self
            .ctx
            .user_repo()
            .get_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        self.ctx
            .notifier()
            .notify_organizer(
                &meetup.organizer.email,
                &user.username,
                i64::from(meetup.joined_persons_count),
            )
            .await?;

        Ok(MeetupResponse::from(meetup))
    }

    /// Leave a meetup the user joined earlier
    #[instrument(skip(self))]
    pub async fn leave_meetup(&self, meetup_id: i64, user_id: i64) -> ServiceResult<()> {
        let (meetup, _) = self
            .ctx
            .meetup_repo()
            .get(meetup_id, user_id)
            .await?
            .ok_or(DomainError::MeetupNotFound(meetup_id))?;

        let now = self.ctx.clock().now_ts();
        if meetup.has_finished(now) {
            return Err(DomainError::MeetupFinished.into());
        }
        if meetup.is_cancelled() {
            return Err(DomainError::MeetupCancelled.into());
        }

        let membership_count = self
            .ctx
            .membership_repo()
            .count(meetup_id, user_id)
            .await?;
        if membership_count == 0 {
            return Err(DomainError::UserNotParticipant.into());
        }

        self.ctx.membership_repo().leave(meetup_id, user_id).await?;

        Ok(())
    }

    /// List the user's joined meetups that have not ended yet
    #[instrument(skip(self))]
    pub async fn get_incoming_meetups(
        &self,
        user_id: i64,
        query: IncomingMeetupsQuery,
    ) -> ServiceResult<Vec<MeetupResponse>> {
        let status = match query.status.as_deref() {
            Some(s) => s.parse::<IncomingStatus>()?,
            None => IncomingStatus::All,
        };

        let meetups = self
            .ctx
            .meetup_repo()
            .incoming_for_user(
                IncomingMeetupFilter {
                    user_id,
                    status,
                    event_ids: query.event_ids,
                    venue_ids: query.venue_ids,
                },
                self.ctx.clock().now_ts(),
            )
            .await?;

        Ok(meetups.into_iter().map(MeetupResponse::from).collect())
    }

    /// Check venue support, capacity, and opening hours for a time window
    ///
    /// Returns the venue and the venue-event capacity for the save path.
    async fn validate_schedule(
        &self,
        venue_id: i64,
        event_id: i64,
        start_ts: i64,
        end_ts: i64,
        exclude_meetup_id: Option<i64>,
    ) -> ServiceResult<(Venue, i32)> {
        let supported = self
            .ctx
            .venue_repo()
            .is_event_supported(venue_id, event_id)
            .await?;
        if !supported {
            return Err(DomainError::InvalidEvent.into());
        }

        let capacity = self
            .ctx
            .venue_repo()
            .event_capacity(venue_id, event_id)
            .await?
            .ok_or(DomainError::InvalidEvent)?;

        let existing = self
            .ctx
            .meetup_repo()
            .count_overlapping_venue_event(venue_id, event_id, start_ts, end_ts, exclude_meetup_id)
            .await?;
        if existing >= i64::from(capacity) {
            return Err(DomainError::ExceedVenueCapacity.into());
        }

        let venue = self
            .ctx
            .venue_repo()
            .get(venue_id)
            .await?
            .ok_or(DomainError::VenueNotFound(venue_id))?;
        validate_opening_hours(&venue, start_ts, end_ts)?;

        Ok((venue, capacity))
    }
}
