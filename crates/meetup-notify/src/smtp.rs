//! SMTP notifier backed by lettre
//!
//! Plain-text mails matching the wording participants and organizers
//! already receive. A relay without credentials (e.g. a local mailpit)
//! is supported for development.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, instrument};

use meetup_common::SmtpConfig;
use meetup_core::error::DomainError;
use meetup_core::traits::MeetupNotifier;

/// SMTP implementation of MeetupNotifier
#[derive(Clone)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpNotifier {
    /// Create a notifier from SMTP configuration
    ///
    /// # Errors
    /// Returns an error when the relay address cannot be resolved
    pub fn new(config: &SmtpConfig) -> Result<Self, DomainError> {
        let transport = if config.username.is_empty() {
            // Unauthenticated relay, plain connection
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .port(config.port)
                .build()
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| DomainError::NotificationError(format!("SMTP relay error: {e}")))?
                .port(config.port)
                .credentials(Credentials::new(
                    config.username.clone(),
                    config.password.clone(),
                ))
                .build()
        };

        Ok(Self {
            transport,
            from: config.from.clone(),
        })
    }

    async fn send(&self, to: &str, subject: &str, body: String) -> Result<(), DomainError> {
        let email = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| DomainError::NotificationError(format!("invalid from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| DomainError::NotificationError(format!("invalid to address: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| DomainError::NotificationError(format!("failed to build email: {e}")))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| DomainError::NotificationError(format!("failed to send email: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl MeetupNotifier for SmtpNotifier {
    #[instrument(skip(self, to_emails))]
    async fn send_cancellation_email(
        &self,
        to_emails: &[String],
        reason: &str,
    ) -> Result<(), DomainError> {
        let body = format!(
            "We regret to inform you that the meetup you joined has been canceled for the following reason:\n\n{reason}"
        );

        for to in to_emails {
            self.send(to, "Meetup Cancellation Notice", body.clone())
                .await?;
        }

        info!(recipients = to_emails.len(), "cancellation emails sent");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn notify_organizer(
        &self,
        organizer_email: &str,
        joiner_username: &str,
        joined_count: i64,
    ) -> Result<(), DomainError> {
        let body = format!(
            "User {joiner_username} just joined your meetup. Current number of joined persons: {joined_count}."
        );

        self.send(organizer_email, "New User Joined Your Meetup", body)
            .await?;

        info!(organizer_email, "organizer notified");
        Ok(())
    }
}
