//! # meetup-db
//!
//! Database layer implementing the meetup-core repository traits with
//! PostgreSQL via SQLx: connection pool management, `FromRow` row models,
//! and repository implementations.

pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgEventRepository, PgMeetupRepository, PgMembershipRepository, PgUserRepository,
    PgVenueRepository,
};
