//! HTTP request handlers
//!
//! Handlers are thin: extract, call the matching service, serialize.

pub mod events;
pub mod health;
pub mod incoming;
pub mod meetups;
pub mod session;
pub mod venues;
