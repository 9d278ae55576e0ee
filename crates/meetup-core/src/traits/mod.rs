//! Ports of the domain layer: storage, notification, and time

mod clock;
mod notifier;
mod repositories;

pub use clock::{Clock, FixedClock, SystemClock};
pub use notifier::MeetupNotifier;
pub use repositories::{
    EventRepository, IncomingMeetupFilter, IncomingStatus, MeetupFilter, MeetupRepository,
    MembershipRepository, RepoResult, UserRepository, VenueFilter, VenueRepository,
};
