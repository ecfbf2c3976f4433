use chrono::{DateTime, Utc};

use crate::client::{Email, EmailClient};
use crate::domain::{EmailAddress, EventDetails, Guest};
use crate::service::templates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    GuestConfirmation,
    AdminNotice,
}

/// Outcome of one attempted send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationResult {
    pub kind: NotificationKind,
    pub sent: bool,
}

/// Sends the guest confirmation and the admin notice for an RSVP.
/// Transport faults are logged and reported as `sent: false`, never returned.
#[derive(Debug)]
pub struct Notifier {
    email_client: EmailClient,
    admin: EmailAddress,
    event: EventDetails,
}

impl Notifier {
    pub fn new(email_client: EmailClient, admin: EmailAddress, event: EventDetails) -> Self {
        Self {
            email_client,
            admin,
            event,
        }
    }

    /// Attempt both messages concurrently. One failing does not stop the other.
    pub async fn notify(
        &self,
        guest: &Guest,
        submitted_at: DateTime<Utc>,
    ) -> (NotificationResult, NotificationResult) {
        tokio::join!(
            self.send_guest_confirmation(guest),
            self.send_admin_notice(guest, submitted_at),
        )
    }

    pub async fn send_guest_confirmation(&self, guest: &Guest) -> NotificationResult {
        let email = templates::guest_confirmation(&self.event, guest);
        self.deliver(NotificationKind::GuestConfirmation, &email)
            .await
    }

    pub async fn send_admin_notice(
        &self,
        guest: &Guest,
        submitted_at: DateTime<Utc>,
    ) -> NotificationResult {
        let email = templates::admin_notice(&self.event, guest, &self.admin, submitted_at);
        self.deliver(NotificationKind::AdminNotice, &email).await
    }

    async fn deliver(&self, kind: NotificationKind, email: &Email) -> NotificationResult {
        let sent = match self.email_client.send(email).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to send {:?} to {}: {}", kind, email.recipient, e);
                false
            }
        };

        NotificationResult { kind, sent }
    }
}
