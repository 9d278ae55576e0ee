//! Membership entity - the record that a user has joined a meetup
//!
//! Unique per (meetup, user) pair. Removed on leave, retained on
//! cancellation so the fan-out and historical queries still see the list.

/// Membership entity (meetup-user relation)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Membership {
    pub meetup_id: i64,
    pub user_id: i64,
    pub joined_at: i64,
}

/// A joined person as projected into meetup detail reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedPerson {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub joined_at: i64,
}
