//! Request extractors
//!
//! Custom Axum extractors for authentication and validated input.

pub mod auth;

pub use auth::AuthUser;
