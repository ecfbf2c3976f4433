mod dispatch;
mod notifier;
mod rsvp_log;
mod templates;

pub use dispatch::{DispatchReport, Dispatcher};
pub use notifier::{NotificationKind, NotificationResult, Notifier};
pub use rsvp_log::{RowOutcome, RsvpLog};
