//! Notification port - outbound email to joined persons and organizers

use async_trait::async_trait;

use crate::error::DomainError;

/// Outbound notifications emitted by the meetup lifecycle
///
/// Send failures are currently fatal to the calling operation; see
/// DESIGN.md for the flagged outbox redesign.
#[async_trait]
pub trait MeetupNotifier: Send + Sync {
    /// Fan out a cancellation notice to all joined persons
    async fn send_cancellation_email(
        &self,
        to_emails: &[String],
        reason: &str,
    ) -> Result<(), DomainError>;

    /// Tell the organizer that someone joined, with the new member count
    async fn notify_organizer(
        &self,
        organizer_email: &str,
        joiner_username: &str,
        joined_count: i64,
    ) -> Result<(), DomainError>;
}
