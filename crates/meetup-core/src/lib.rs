//! # meetup-core
//!
//! Domain layer containing entities, value objects, ports, the
//! opening-hours validator, and the domain error taxonomy. This crate has
//! zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod schedule;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Event, JoinedPerson, Meetup, MeetupConfig, MeetupEvent, MeetupOrganizer, MeetupStatus,
    MeetupVenue, Membership, SupportedEvent, User, Venue,
};
pub use error::DomainError;
pub use schedule::validate_opening_hours;
pub use traits::{
    Clock, EventRepository, FixedClock, IncomingMeetupFilter, IncomingStatus, MeetupFilter,
    MeetupNotifier, MeetupRepository, MembershipRepository, RepoResult, SystemClock,
    UserRepository, VenueFilter, VenueRepository,
};
pub use value_objects::{overlaps, Interval, TimeOfDay, TimeOfDayParseError};
