//! User entity - identity for authentication and display
//!
//! Read-only to the meetup core; mutation happens outside this system.

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub created_at: i64,
}

impl User {
    /// Check a login attempt against the stored credential
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}
