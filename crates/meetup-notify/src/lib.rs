//! # meetup-notify
//!
//! SMTP implementation of the meetup-core notifier trait: cancellation
//! fan-out to joined persons and the join notice to organizers.

mod smtp;

pub use smtp::SmtpNotifier;
