//! Database row models with SQLx `FromRow` derives

mod event;
mod meetup;
mod user;
mod venue;

pub use event::EventRow;
pub use meetup::{JoinedPersonRow, MeetupDetailRow, MeetupSummaryRow};
pub use user::UserRow;
pub use venue::{rows_to_venues, VenueEventRow};
