//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, the infrastructure layer
//! provides the implementation. Every overlap query uses the half-open
//! convention from `value_objects::interval`, identically across
//! implementations.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::entities::{Event, JoinedPerson, Meetup, User, Venue};
use crate::error::DomainError;
use crate::value_objects::TimeOfDay;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Filter for the open-meetups listing
#[derive(Debug, Clone, Default)]
pub struct MeetupFilter {
    pub event_id: Option<i64>,
    pub limit: Option<i64>,
}

/// Status filter for incoming-meetups queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncomingStatus {
    Open,
    Cancelled,
    #[default]
    All,
}

impl IncomingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Cancelled => "cancelled",
            Self::All => "all",
        }
    }
}

impl fmt::Display for IncomingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncomingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "cancelled" => Ok(Self::Cancelled),
            "all" => Ok(Self::All),
            other => Err(DomainError::Validation(format!(
                "invalid status: {other}"
            ))),
        }
    }
}

/// Filter for the per-user incoming-meetups query
///
/// `event_ids` and `venue_ids` are comma-separated id lists, passed through
/// opaquely; parsing is up to the storage implementation.
#[derive(Debug, Clone)]
pub struct IncomingMeetupFilter {
    pub user_id: i64,
    pub status: IncomingStatus,
    pub event_ids: Option<String>,
    pub venue_ids: Option<String>,
}

/// Filter for venue listings
#[derive(Debug, Clone, Default)]
pub struct VenueFilter {
    pub event_id: Option<i64>,
    /// Keep only venues already open at this time of day
    pub meetup_start: Option<TimeOfDay>,
    /// Keep only venues still open at this time of day
    pub meetup_end: Option<TimeOfDay>,
}

// ============================================================================
// Meetup Repository
// ============================================================================

#[async_trait]
pub trait MeetupRepository: Send + Sync {
    /// Count meetups at the venue/event whose intervals overlap
    /// `[start_ts, end_ts)`, optionally excluding one meetup (used when the
    /// caller is re-validating an update against everything but itself)
    async fn count_overlapping_venue_event(
        &self,
        venue_id: i64,
        event_id: i64,
        start_ts: i64,
        end_ts: i64,
        exclude_meetup_id: Option<i64>,
    ) -> RepoResult<i64>;

    /// Upsert a meetup, returning its id
    ///
    /// `capacity` is the venue-event capacity for the meetup's window. The
    /// implementation must re-check the window atomically with the write and
    /// return `ExceedVenueCapacity` if the slot filled since the caller's
    /// pre-count.
    async fn save(&self, meetup: &Meetup, capacity: i32) -> RepoResult<i64>;

    /// List open meetups ordered by ascending start, joins filled
    async fn list(&self, filter: MeetupFilter) -> RepoResult<Vec<Meetup>>;

    /// Fetch a meetup with its joined-persons projection, plus whether the
    /// viewer is the organizer or a current participant
    async fn get(&self, meetup_id: i64, viewer_user_id: i64) -> RepoResult<Option<(Meetup, bool)>>;

    /// Atomically mark a meetup cancelled
    async fn cancel(&self, meetup_id: i64, reason: &str, cancelled_at: i64) -> RepoResult<()>;

    /// Count memberships of the user whose meetup intervals overlap
    /// `[start_ts, end_ts)`
    async fn count_overlapping_for_user(
        &self,
        user_id: i64,
        start_ts: i64,
        end_ts: i64,
    ) -> RepoResult<i64>;

    /// List meetups joined by the filter's user that end after `now`
    async fn incoming_for_user(
        &self,
        filter: IncomingMeetupFilter,
        now: i64,
    ) -> RepoResult<Vec<Meetup>>;

    /// List the persons who joined a meetup
    async fn joined_persons(&self, meetup_id: i64) -> RepoResult<Vec<JoinedPerson>>;
}

// ============================================================================
// Venue Repository
// ============================================================================

#[async_trait]
pub trait VenueRepository: Send + Sync {
    /// Check whether the venue supports the event
    async fn is_event_supported(&self, venue_id: i64, event_id: i64) -> RepoResult<bool>;

    /// Venue-event capacity, `None` when the pair is unsupported
    async fn event_capacity(&self, venue_id: i64, event_id: i64) -> RepoResult<Option<i32>>;

    /// Fetch a venue with its supported events
    async fn get(&self, venue_id: i64) -> RepoResult<Option<Venue>>;

    /// List venues, optionally filtered by event and opening window
    async fn list(&self, filter: VenueFilter) -> RepoResult<Vec<Venue>>;
}

// ============================================================================
// Event Repository
// ============================================================================

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Fetch an event by id
    async fn get(&self, event_id: i64) -> RepoResult<Option<Event>>;

    /// List the event catalog
    async fn list(&self) -> RepoResult<Vec<Event>>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by id
    async fn get_by_id(&self, user_id: i64) -> RepoResult<Option<User>>;

    /// Fetch a user by username (login path)
    async fn get_by_username(&self, username: &str) -> RepoResult<Option<User>>;
}

// ============================================================================
// Membership Repository
// ============================================================================

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Record that a user joined a meetup; idempotent on the primary key
    async fn join(&self, meetup_id: i64, user_id: i64, joined_at: i64) -> RepoResult<()>;

    /// Remove a user's membership
    async fn leave(&self, meetup_id: i64, user_id: i64) -> RepoResult<()>;

    /// Count memberships for the pair (0 or 1)
    async fn count(&self, meetup_id: i64, user_id: i64) -> RepoResult<i64>;
}
