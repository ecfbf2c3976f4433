use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use config::{Config, Environment, File};

use secrecy::Secret;

use serde::Deserialize;
use serde_aux::prelude::*;

use url::Url;

use crate::client::{EmailClient, SheetsClient};
use crate::domain::{EmailAddress, EventDetails};
use crate::service::RsvpLog;

/// Runtime environment, either `Dev` for local development, or `Prod` for release
#[derive(Debug)]
pub enum Runtime {
    Dev,
    Prod,
}

impl Runtime {
    pub fn as_str(&self) -> &str {
        match self {
            Runtime::Dev => "dev",
            Runtime::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Runtime {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => anyhow::bail!("{} is not a valid runtime environment", other),
        }
    }
}

/// Application settings wrapper
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub email: EmailSettings,
    pub event: EventDetails,
    pub sheets: Option<SheetsSettings>,
}

impl Settings {
    /// Load application settings from the settings directory
    pub fn load() -> anyhow::Result<Self> {
        // Get the path to the settings directory
        let path = env::current_dir()?.join("settings");
        // Get the current environment based on the `APP_ENV` environment variable, default to `Dev`
        let runtime: Runtime = env::var("APP_ENV")
            .unwrap_or_else(|_| "dev".into())
            .try_into()?;

        Self::load_from(runtime, &path)
    }
    /// Load application settings from a specified path and runtime
    pub fn load_from(runtime: Runtime, base_path: &Path) -> anyhow::Result<Self> {
        Config::builder()
            // Include the base settings
            .add_source(File::from(base_path.join("base")).required(true))
            // Include the runtime settings
            .add_source(File::from(base_path.join(runtime.as_str())).required(true))
            // Override/include any settings from environment variables
            // NOTE: Should be used for any prod secrets. Takes the form `APP_<settings category>__<setting name>`.
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .context("Failed to load/deserialize settings")
    }
    /// The spreadsheet log, disabled unless a spreadsheet is configured
    pub fn rsvp_log(&self) -> anyhow::Result<RsvpLog> {
        let sheets_client = match &self.sheets {
            Some(sheets) => sheets.client()?,
            None => None,
        };
        Ok(sheets_client.into())
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
}

impl ApplicationSettings {
    /// The application address to bind to
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailSettings {
    sender: String,
    admin: String,
    api_base_url: String,
    api_auth_token: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    api_timeout_milliseconds: u64,
}

impl EmailSettings {
    /// The email address to send application emails from
    pub fn sender(&self) -> anyhow::Result<EmailAddress> {
        self.sender
            .parse()
            .context("Failed to parse email sender address")
    }
    /// The organizer address that receives RSVP notices
    pub fn admin(&self) -> anyhow::Result<EmailAddress> {
        self.admin
            .parse()
            .context("Failed to parse email admin address")
    }
    /// The email REST API timeout duration
    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_milliseconds)
    }
    /// The base URL for the email REST service
    pub fn api_base_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.api_base_url).context("Failed to parse email base URL")
    }
    /// The authentication token to include when making email requests
    pub fn api_auth_token(&self) -> Secret<String> {
        self.api_auth_token.clone()
    }
    /// Build the mail transport client
    pub fn client(&self) -> anyhow::Result<EmailClient> {
        EmailClient::new(
            self.sender()?,
            self.api_timeout(),
            self.api_base_url()?,
            self.api_auth_token(),
        )
        .context("Failed to create email client")
    }
}

#[derive(Debug, Deserialize)]
pub struct SheetsSettings {
    #[serde(default)]
    spreadsheet_id: String,
    #[serde(default = "default_sheets_range")]
    range: String,
    #[serde(default = "default_sheets_api_base_url")]
    api_base_url: String,
    #[serde(default)]
    api_access_token: Option<Secret<String>>,
    #[serde(
        default = "default_sheets_api_timeout",
        deserialize_with = "deserialize_number_from_string"
    )]
    api_timeout_milliseconds: u64,
}

fn default_sheets_range() -> String {
    "A1".into()
}

fn default_sheets_api_base_url() -> String {
    "https://sheets.googleapis.com".into()
}

fn default_sheets_api_timeout() -> u64 {
    10_000
}

impl SheetsSettings {
    /// The target spreadsheet, if one is configured
    pub fn spreadsheet_id(&self) -> Option<&str> {
        Some(self.spreadsheet_id.trim()).filter(|id| !id.is_empty())
    }
    /// The Sheets REST API timeout duration
    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_milliseconds)
    }
    /// The base URL for the Sheets REST service
    pub fn api_base_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.api_base_url).context("Failed to parse sheets base URL")
    }
    /// Build the spreadsheet client, or `None` when no spreadsheet is configured
    pub fn client(&self) -> anyhow::Result<Option<SheetsClient>> {
        let Some(spreadsheet_id) = self.spreadsheet_id() else {
            return Ok(None);
        };
        let api_access_token = self
            .api_access_token
            .clone()
            .context("A spreadsheet is configured without a sheets access token")?;

        SheetsClient::new(
            self.api_base_url()?,
            spreadsheet_id,
            &self.range,
            self.api_timeout(),
            api_access_token,
        )
        .map(Some)
        .context("Failed to create sheets client")
    }
}
