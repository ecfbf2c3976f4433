use chrono::{DateTime, SecondsFormat, Utc};

use crate::client::SheetsClient;
use crate::domain::Guest;

/// Outcome of attempting to record an RSVP in the spreadsheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Appended,
    Failed,
    Skipped,
}

/// Optional spreadsheet record of attending guests. Disabled when no
/// spreadsheet is configured.
#[derive(Debug)]
pub struct RsvpLog {
    sheets_client: Option<SheetsClient>,
}

impl RsvpLog {
    pub fn new(sheets_client: SheetsClient) -> Self {
        Self {
            sheets_client: Some(sheets_client),
        }
    }

    pub fn disabled() -> Self {
        Self {
            sheets_client: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sheets_client.is_some()
    }

    pub async fn record(&self, guest: &Guest, submitted_at: DateTime<Utc>) -> RowOutcome {
        let Some(sheets_client) = &self.sheets_client else {
            tracing::debug!("Spreadsheet not configured, skipping RSVP log");
            return RowOutcome::Skipped;
        };

        let submitted_at = submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        let row = [
            guest.name.as_ref(),
            guest.email.as_ref(),
            guest.gender.as_ref(),
            submitted_at.as_str(),
        ];

        match sheets_client.append_row(&row).await {
            Ok(()) => RowOutcome::Appended,
            Err(e) if e.status() == Some(reqwest::StatusCode::UNAUTHORIZED) => {
                tracing::error!(
                    "Sheets access token rejected, it has likely expired and must be replaced: {}",
                    e
                );
                RowOutcome::Failed
            }
            Err(e) => {
                tracing::error!("Failed to append RSVP to spreadsheet: {}", e);
                RowOutcome::Failed
            }
        }
    }
}

impl From<Option<SheetsClient>> for RsvpLog {
    fn from(sheets_client: Option<SheetsClient>) -> Self {
        Self { sheets_client }
    }
}
