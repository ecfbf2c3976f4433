mod email_client;
mod sheets_client;

pub use email_client::{Email, EmailClient, SendError};
pub use sheets_client::SheetsClient;
