//! Value objects used across the domain layer

mod interval;
mod time_of_day;

pub use interval::{overlaps, Interval};
pub use time_of_day::{TimeOfDay, TimeOfDayParseError};
