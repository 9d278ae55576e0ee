//! Service context - dependency container for services
//!
//! Holds all repositories, the notifier, the clock, and the JWT service
//! needed by services. Everything is behind a trait object so tests can
//! swap in in-memory implementations.

use std::sync::Arc;

use meetup_common::auth::JwtService;
use meetup_core::traits::{
    Clock, EventRepository, MeetupNotifier, MeetupRepository, MembershipRepository,
    UserRepository, VenueRepository,
};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The email notifier
/// - The clock (injected so tests can freeze time)
/// - JWT service for authentication
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    meetup_repo: Arc<dyn MeetupRepository>,
    venue_repo: Arc<dyn VenueRepository>,
    event_repo: Arc<dyn EventRepository>,
    user_repo: Arc<dyn UserRepository>,
    membership_repo: Arc<dyn MembershipRepository>,

    // Side effects
    notifier: Arc<dyn MeetupNotifier>,
    clock: Arc<dyn Clock>,

    // Services
    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        meetup_repo: Arc<dyn MeetupRepository>,
        venue_repo: Arc<dyn VenueRepository>,
        event_repo: Arc<dyn EventRepository>,
        user_repo: Arc<dyn UserRepository>,
        membership_repo: Arc<dyn MembershipRepository>,
        notifier: Arc<dyn MeetupNotifier>,
        clock: Arc<dyn Clock>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            meetup_repo,
            venue_repo,
            event_repo,
            user_repo,
            membership_repo,
            notifier,
            clock,
            jwt_service,
        }
    }

    // === Repositories ===

    /// Get the meetup repository
    pub fn meetup_repo(&self) -> &dyn MeetupRepository {
        self.meetup_repo.as_ref()
    }

    /// Get the venue repository
    pub fn venue_repo(&self) -> &dyn VenueRepository {
        self.venue_repo.as_ref()
    }

    /// Get the event repository
    pub fn event_repo(&self) -> &dyn EventRepository {
        self.event_repo.as_ref()
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the membership repository
    pub fn membership_repo(&self) -> &dyn MembershipRepository {
        self.membership_repo.as_ref()
    }

    // === Side Effects ===

    /// Get the email notifier
    pub fn notifier(&self) -> &dyn MeetupNotifier {
        self.notifier.as_ref()
    }

    /// Get the clock
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("notifier", &"...")
            .field("clock", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    meetup_repo: Option<Arc<dyn MeetupRepository>>,
    venue_repo: Option<Arc<dyn VenueRepository>>,
    event_repo: Option<Arc<dyn EventRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    membership_repo: Option<Arc<dyn MembershipRepository>>,
    notifier: Option<Arc<dyn MeetupNotifier>>,
    clock: Option<Arc<dyn Clock>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            meetup_repo: None,
            venue_repo: None,
            event_repo: None,
            user_repo: None,
            membership_repo: None,
            notifier: None,
            clock: None,
            jwt_service: None,
        }
    }

    pub fn meetup_repo(mut self, repo: Arc<dyn MeetupRepository>) -> Self {
        self.meetup_repo = Some(repo);
        self
    }

    pub fn venue_repo(mut self, repo: Arc<dyn VenueRepository>) -> Self {
        self.venue_repo = Some(repo);
        self
    }

    pub fn event_repo(mut self, repo: Arc<dyn EventRepository>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn membership_repo(mut self, repo: Arc<dyn MembershipRepository>) -> Self {
        self.membership_repo = Some(repo);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn MeetupNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.meetup_repo
                .ok_or_else(|| super::error::ServiceError::validation("meetup_repo is required"))?,
            self.venue_repo
                .ok_or_else(|| super::error::ServiceError::validation("venue_repo is required"))?,
            self.event_repo
                .ok_or_else(|| super::error::ServiceError::validation("event_repo is required"))?,
            self.user_repo
                .ok_or_else(|| super::error::ServiceError::validation("user_repo is required"))?,
            self.membership_repo.ok_or_else(|| {
                super::error::ServiceError::validation("membership_repo is required")
            })?,
            self.notifier
                .ok_or_else(|| super::error::ServiceError::validation("notifier is required"))?,
            self.clock
                .ok_or_else(|| super::error::ServiceError::validation("clock is required"))?,
            self.jwt_service
                .ok_or_else(|| super::error::ServiceError::validation("jwt_service is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
