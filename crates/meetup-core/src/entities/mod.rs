//! Domain entities

mod event;
mod meetup;
mod membership;
mod user;
mod venue;

pub use event::Event;
pub use meetup::{
    Meetup, MeetupConfig, MeetupEvent, MeetupOrganizer, MeetupStatus, MeetupVenue,
};
pub use membership::{JoinedPerson, Membership};
pub use user::User;
pub use venue::{SupportedEvent, Venue};
