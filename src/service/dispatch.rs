use std::sync::Arc;

use chrono::Utc;

use tokio::task::JoinHandle;

use tracing::Instrument;

use uuid::Uuid;

use crate::domain::Guest;
use crate::service::{NotificationResult, Notifier, RowOutcome, RsvpLog};

/// What happened to the side effects of one attending RSVP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub guest_confirmation: NotificationResult,
    pub admin_notice: NotificationResult,
    pub row: RowOutcome,
}

/// Fires the notifications and spreadsheet row for an attending guest in the
/// background, detached from the request that triggered them
#[derive(Debug, Clone)]
pub struct Dispatcher {
    notifier: Arc<Notifier>,
    rsvp_log: Arc<RsvpLog>,
}

impl Dispatcher {
    pub fn new(notifier: Notifier, rsvp_log: RsvpLog) -> Self {
        Self {
            notifier: Arc::new(notifier),
            rsvp_log: Arc::new(rsvp_log),
        }
    }

    /// Spawn the background work for `guest` and return without waiting on it.
    /// Dropping the handle does not cancel the task.
    pub fn dispatch(&self, guest: Guest) -> JoinHandle<DispatchReport> {
        let notifier = Arc::clone(&self.notifier);
        let rsvp_log = Arc::clone(&self.rsvp_log);
        let submitted_at = Utc::now();

        let span = tracing::info_span!(
            "Deliver RSVP side effects",
            submission_id = %Uuid::new_v4(),
            guest = %guest.email,
        );

        tokio::spawn(
            async move {
                let ((guest_confirmation, admin_notice), row) = tokio::join!(
                    notifier.notify(&guest, submitted_at),
                    rsvp_log.record(&guest, submitted_at),
                );

                let report = DispatchReport {
                    guest_confirmation,
                    admin_notice,
                    row,
                };

                tracing::info!(
                    guest_sent = report.guest_confirmation.sent,
                    admin_sent = report.admin_notice.sent,
                    row = ?report.row,
                    "RSVP submission: {}, {}, {}, {}",
                    guest.name,
                    guest.email,
                    guest.gender,
                    submitted_at.to_rfc3339(),
                );

                report
            }
            .instrument(span),
        )
    }
}
