//! In-memory implementations of the repository and notifier ports
//!
//! Backed by a single shared store behind a mutex so the meetup, venue,
//! and membership views stay consistent, the way the database keeps them
//! consistent in production.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use meetup_core::traits::{
    EventRepository, IncomingMeetupFilter, IncomingStatus, MeetupFilter, MeetupNotifier,
    MeetupRepository, MembershipRepository, RepoResult, UserRepository, VenueFilter,
    VenueRepository,
};
use meetup_core::{
    overlaps, DomainError, Event, JoinedPerson, Meetup, MeetupStatus, Membership, User, Venue,
};

/// Shared in-memory state for all fake repositories
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    next_meetup_id: i64,
    meetups: BTreeMap<i64, Meetup>,
    memberships: Vec<Membership>,
    users: BTreeMap<i64, User>,
    venues: BTreeMap<i64, Venue>,
    events: BTreeMap<i64, Event>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_user(&self, user: User) {
        self.inner.lock().unwrap().users.insert(user.id, user);
    }

    pub fn add_venue(&self, venue: Venue) {
        self.inner.lock().unwrap().venues.insert(venue.id, venue);
    }

    pub fn add_event(&self, event: Event) {
        self.inner.lock().unwrap().events.insert(event.id, event);
    }

    pub fn membership_count(&self, meetup_id: i64) -> usize {
        self.inner
            .lock()
            .unwrap()
            .memberships
            .iter()
            .filter(|m| m.meetup_id == meetup_id)
            .count()
    }
}

impl StoreInner {
    fn members_of(&self, meetup_id: i64) -> Vec<Membership> {
        let mut members: Vec<Membership> = self
            .memberships
            .iter()
            .filter(|m| m.meetup_id == meetup_id)
            .cloned()
            .collect();
        members.sort_by_key(|m| m.joined_at);
        members
    }

    fn count_overlapping(
        &self,
        venue_id: i64,
        event_id: i64,
        start_ts: i64,
        end_ts: i64,
        exclude: Option<i64>,
    ) -> i64 {
        self.meetups
            .values()
            .filter(|m| m.venue.id == venue_id && m.event.id == event_id)
            .filter(|m| exclude != Some(m.id))
            .filter(|m| overlaps(m.start_ts, m.end_ts, start_ts, end_ts))
            .count() as i64
    }

    /// Snapshot a meetup the way a read query would: reference names
    /// refreshed from the catalog tables and the membership projection
    /// computed for the viewer.
    fn project(&self, id: i64, viewer: i64) -> Option<(Meetup, bool)> {
        let mut m = self.meetups.get(&id)?.clone();
        if let Some(v) = self.venues.get(&m.venue.id) {
            m.venue.name.clone_from(&v.name);
        }
        if let Some(e) = self.events.get(&m.event.id) {
            m.event.name.clone_from(&e.name);
        }
        if let Some(u) = self.users.get(&m.organizer.id) {
            m.organizer.username.clone_from(&u.username);
            m.organizer.email.clone_from(&u.email);
        }

        let members = self.members_of(id);
        m.joined_persons_count = members.len() as i32;
        m.is_joined = members.iter().any(|mb| mb.user_id == viewer);
        let is_organizer_or_participant = viewer == m.organizer.id || m.is_joined;
        m.joined_persons = if is_organizer_or_participant {
            Some(
                members
                    .iter()
                    .filter_map(|mb| {
                        self.users.get(&mb.user_id).map(|u| JoinedPerson {
                            id: u.id,
                            username: u.username.clone(),
                            email: u.email.clone(),
                            joined_at: mb.joined_at,
                        })
                    })
                    .collect(),
            )
        } else {
            None
        };

        Some((m, is_organizer_or_participant))
    }
}

// ============================================================================
// Meetup repository
// ============================================================================

#[derive(Clone)]
pub struct InMemoryMeetupRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryMeetupRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MeetupRepository for InMemoryMeetupRepository {
    async fn count_overlapping_venue_event(
        &self,
        venue_id: i64,
        event_id: i64,
        start_ts: i64,
        end_ts: i64,
        exclude_meetup_id: Option<i64>,
    ) -> RepoResult<i64> {
        let inner = self.store.inner.lock().unwrap();
        Ok(inner.count_overlapping(venue_id, event_id, start_ts, end_ts, exclude_meetup_id))
    }

    async fn save(&self, meetup: &Meetup, capacity: i32) -> RepoResult<i64> {
        let mut inner = self.store.inner.lock().unwrap();

        // Capacity re-check inside the same critical section as the write
        let exclude = (meetup.id != 0).then_some(meetup.id);
        let count = inner.count_overlapping(
            meetup.venue.id,
            meetup.event.id,
            meetup.start_ts,
            meetup.end_ts,
            exclude,
        );
        if count >= i64::from(capacity) {
            return Err(DomainError::ExceedVenueCapacity);
        }

        if meetup.id == 0 {
            inner.next_meetup_id += 1;
            let id = inner.next_meetup_id;
            let mut stored = meetup.clone();
            stored.id = id;
            inner.meetups.insert(id, stored);
            Ok(id)
        } else {
            let existing = inner
                .meetups
                .get_mut(&meetup.id)
                .ok_or(DomainError::MeetupNotFound(meetup.id))?;
            existing.name.clone_from(&meetup.name);
            existing.start_ts = meetup.start_ts;
            existing.end_ts = meetup.end_ts;
            existing.max_persons = meetup.max_persons;
            existing.updated_at = meetup.updated_at;
            Ok(meetup.id)
        }
    }

    async fn list(&self, filter: MeetupFilter) -> RepoResult<Vec<Meetup>> {
        let inner = self.store.inner.lock().unwrap();
        let mut result: Vec<Meetup> = inner
            .meetups
            .values()
            .filter(|m| m.status == MeetupStatus::Open)
            .filter(|m| filter.event_id.is_none_or(|id| m.event.id == id))
            .filter_map(|m| inner.project(m.id, 0).map(|(mut p, _)| {
                p.joined_persons = None;
                p.is_joined = false;
                p
            }))
            .collect();
        result.sort_by_key(|m| m.start_ts);
        if let Some(limit) = filter.limit {
            result.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(result)
    }

    async fn get(&self, meetup_id: i64, viewer_user_id: i64) -> RepoResult<Option<(Meetup, bool)>> {
        let inner = self.store.inner.lock().unwrap();
        Ok(inner.project(meetup_id, viewer_user_id))
    }

    async fn cancel(&self, meetup_id: i64, reason: &str, cancelled_at: i64) -> RepoResult<()> {
        let mut inner = self.store.inner.lock().unwrap();
        let meetup = inner
            .meetups
            .get_mut(&meetup_id)
            .ok_or(DomainError::MeetupNotFound(meetup_id))?;
        meetup.status = MeetupStatus::Cancelled;
        meetup.cancelled_reason = Some(reason.to_string());
        meetup.cancelled_at = Some(cancelled_at);
        meetup.updated_at = cancelled_at;
        Ok(())
    }

    async fn count_overlapping_for_user(
        &self,
        user_id: i64,
        start_ts: i64,
        end_ts: i64,
    ) -> RepoResult<i64> {
        let inner = self.store.inner.lock().unwrap();
        let count = inner
            .memberships
            .iter()
            .filter(|mb| mb.user_id == user_id)
            .filter_map(|mb| inner.meetups.get(&mb.meetup_id))
            .filter(|m| overlaps(m.start_ts, m.end_ts, start_ts, end_ts))
            .count();
        Ok(count as i64)
    }

    async fn incoming_for_user(
        &self,
        filter: IncomingMeetupFilter,
        now: i64,
    ) -> RepoResult<Vec<Meetup>> {
        let event_ids = parse_id_list(filter.event_ids.as_deref());
        let venue_ids = parse_id_list(filter.venue_ids.as_deref());

        let inner = self.store.inner.lock().unwrap();
        let mut result: Vec<Meetup> = inner
            .memberships
            .iter()
            .filter(|mb| mb.user_id == filter.user_id)
            .filter_map(|mb| inner.meetups.get(&mb.meetup_id))
            .filter(|m| m.end_ts > now)
            .filter(|m| match filter.status {
                IncomingStatus::Open => m.status == MeetupStatus::Open,
                IncomingStatus::Cancelled => m.status == MeetupStatus::Cancelled,
                IncomingStatus::All => true,
            })
            .filter(|m| event_ids.as_ref().is_none_or(|ids| ids.contains(&m.event.id)))
            .filter(|m| venue_ids.as_ref().is_none_or(|ids| ids.contains(&m.venue.id)))
            .filter_map(|m| inner.project(m.id, 0).map(|(mut p, _)| {
                p.joined_persons = None;
                p.is_joined = false;
                p
            }))
            .collect();
        result.sort_by_key(|m| m.start_ts);
        Ok(result)
    }

    async fn joined_persons(&self, meetup_id: i64) -> RepoResult<Vec<JoinedPerson>> {
        let inner = self.store.inner.lock().unwrap();
        Ok(inner
            .members_of(meetup_id)
            .iter()
            .filter_map(|mb| {
                inner.users.get(&mb.user_id).map(|u| JoinedPerson {
                    id: u.id,
                    username: u.username.clone(),
                    email: u.email.clone(),
                    joined_at: mb.joined_at,
                })
            })
            .collect())
    }
}

fn parse_id_list(raw: Option<&str>) -> Option<Vec<i64>> {
    raw.map(|s| {
        s.split(',')
            .filter_map(|part| part.trim().parse::<i64>().ok())
            .collect()
    })
}

// ============================================================================
// Membership repository
// ============================================================================

#[derive(Clone)]
pub struct InMemoryMembershipRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryMembershipRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn join(&self, meetup_id: i64, user_id: i64, joined_at: i64) -> RepoResult<()> {
        let mut inner = self.store.inner.lock().unwrap();
        let exists = inner
            .memberships
            .iter()
            .any(|m| m.meetup_id == meetup_id && m.user_id == user_id);
        if !exists {
            inner.memberships.push(Membership {
                meetup_id,
                user_id,
                joined_at,
            });
        }
        Ok(())
    }

    async fn leave(&self, meetup_id: i64, user_id: i64) -> RepoResult<()> {
        let mut inner = self.store.inner.lock().unwrap();
        inner
            .memberships
            .retain(|m| !(m.meetup_id == meetup_id && m.user_id == user_id));
        Ok(())
    }

    async fn count(&self, meetup_id: i64, user_id: i64) -> RepoResult<i64> {
        let inner = self.store.inner.lock().unwrap();
        let count = inner
            .memberships
            .iter()
            .filter(|m| m.meetup_id == meetup_id && m.user_id == user_id)
            .count();
        Ok(count as i64)
    }
}

// ============================================================================
// Venue repository
// ============================================================================

#[derive(Clone)]
pub struct InMemoryVenueRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryVenueRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl VenueRepository for InMemoryVenueRepository {
    async fn is_event_supported(&self, venue_id: i64, event_id: i64) -> RepoResult<bool> {
        let inner = self.store.inner.lock().unwrap();
        Ok(inner
            .venues
            .get(&venue_id)
            .is_some_and(|v| v.supports_event(event_id)))
    }

    async fn event_capacity(&self, venue_id: i64, event_id: i64) -> RepoResult<Option<i32>> {
        let inner = self.store.inner.lock().unwrap();
        Ok(inner
            .venues
            .get(&venue_id)
            .and_then(|v| v.event_capacity(event_id)))
    }

    async fn get(&self, venue_id: i64) -> RepoResult<Option<Venue>> {
        let inner = self.store.inner.lock().unwrap();
        Ok(inner.venues.get(&venue_id).cloned())
    }

    async fn list(&self, filter: VenueFilter) -> RepoResult<Vec<Venue>> {
        let inner = self.store.inner.lock().unwrap();
        Ok(inner
            .venues
            .values()
            .filter(|v| filter.event_id.is_none_or(|id| v.supports_event(id)))
            .filter(|v| filter.meetup_start.is_none_or(|start| v.open_at <= start))
            .filter(|v| filter.meetup_end.is_none_or(|end| v.closed_at >= end))
            .cloned()
            .collect())
    }
}

// ============================================================================
// Event and user repositories
// ============================================================================

#[derive(Clone)]
pub struct InMemoryEventRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryEventRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn get(&self, event_id: i64) -> RepoResult<Option<Event>> {
        let inner = self.store.inner.lock().unwrap();
        Ok(inner.events.get(&event_id).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<Event>> {
        let inner = self.store.inner.lock().unwrap();
        Ok(inner.events.values().cloned().collect())
    }
}

#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_id(&self, user_id: i64) -> RepoResult<Option<User>> {
        let inner = self.store.inner.lock().unwrap();
        Ok(inner.users.get(&user_id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let inner = self.store.inner.lock().unwrap();
        Ok(inner
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

// ============================================================================
// Recording notifier
// ============================================================================

/// A cancellation email captured by the recording notifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancellationEmail {
    pub to_emails: Vec<String>,
    pub reason: String,
}

/// An organizer notice captured by the recording notifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizerNotice {
    pub organizer_email: String,
    pub joiner_username: String,
    pub joined_count: i64,
}

/// Notifier that records every email instead of sending it
#[derive(Default)]
pub struct RecordingNotifier {
    cancellations: Mutex<Vec<CancellationEmail>>,
    organizer_notices: Mutex<Vec<OrganizerNotice>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn cancellations(&self) -> Vec<CancellationEmail> {
        self.cancellations.lock().unwrap().clone()
    }

    pub fn organizer_notices(&self) -> Vec<OrganizerNotice> {
        self.organizer_notices.lock().unwrap().clone()
    }
}

#[async_trait]
impl MeetupNotifier for RecordingNotifier {
    async fn send_cancellation_email(
        &self,
        to_emails: &[String],
        reason: &str,
    ) -> Result<(), DomainError> {
        self.cancellations.lock().unwrap().push(CancellationEmail {
            to_emails: to_emails.to_vec(),
            reason: reason.to_string(),
        });
        Ok(())
    }

    async fn notify_organizer(
        &self,
        organizer_email: &str,
        joiner_username: &str,
        joined_count: i64,
    ) -> Result<(), DomainError> {
        self.organizer_notices.lock().unwrap().push(OrganizerNotice {
            organizer_email: organizer_email.to_string(),
            joiner_username: joiner_username.to_string(),
            joined_count,
        });
        Ok(())
    }
}
