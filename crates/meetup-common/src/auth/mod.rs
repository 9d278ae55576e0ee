//! Authentication utilities

mod jwt;

pub use jwt::{AccessToken, Claims, JwtService};
