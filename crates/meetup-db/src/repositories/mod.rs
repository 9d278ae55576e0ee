//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! meetup-core. Each repository handles database operations for a specific
//! domain entity.

mod error;
mod event;
mod meetup;
mod membership;
mod user;
mod venue;

pub use event::PgEventRepository;
pub use meetup::PgMeetupRepository;
pub use membership::PgMembershipRepository;
pub use user::PgUserRepository;
pub use venue::PgVenueRepository;
