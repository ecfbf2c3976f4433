use std::time::Duration;

use reqwest::{Client, StatusCode};

use secrecy::{ExposeSecret, Secret};

use serde::{Deserialize, Serialize};

use url::Url;

use crate::domain::EmailAddress;

const SERVER_TOKEN_HEADER: &str = "X-Postmark-Server-Token";
const MESSAGE_STREAM: &str = "outbound";

/// Why a message did not go out
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("Mail API unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Mail API rejected the message ({status}): {reason}")]
    Rejected { status: StatusCode, reason: String },
}

/// A rendered message, addressed but not yet sent
#[derive(Debug, Clone)]
pub struct Email {
    pub recipient: EmailAddress,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    /// Lets the organizer filter messages by kind in the provider's dashboard
    pub tag: Option<&'static str>,
}

/// Mail transport for a Postmark-compatible `POST /email` endpoint
#[derive(Debug)]
pub struct EmailClient {
    http: Client,
    endpoint: Url,
    from: EmailAddress,
    server_token: Secret<String>,
}

impl EmailClient {
    pub fn new(
        from: EmailAddress,
        api_timeout: Duration,
        api_base_url: Url,
        server_token: Secret<String>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            http: Client::builder().timeout(api_timeout).build()?,
            endpoint: api_base_url.join("email")?,
            from,
            server_token,
        })
    }

    #[tracing::instrument(
        name = "Send an email via API",
        skip(self, email),
        fields(recipient = %email.recipient, tag = ?email.tag)
    )]
    pub async fn send(&self, email: &Email) -> Result<(), SendError> {
        let message = OutboundMessage {
            from: self.from.as_ref(),
            to: email.recipient.as_ref(),
            subject: &email.subject,
            html_body: &email.html_body,
            text_body: &email.text_body,
            tag: email.tag,
            message_stream: MESSAGE_STREAM,
        };

        let res = self
            .http
            .post(self.endpoint.clone())
            .header(SERVER_TOKEN_HEADER, self.server_token.expose_secret())
            .json(&message)
            .send()
            .await?;

        let status = res.status();
        if status.is_success() {
            return Ok(());
        }

        // Postmark explains rejections in the body, other gateways may not
        let reason = match res.json::<ApiError>().await {
            Ok(err) => format!("{} (code {})", err.message, err.error_code),
            Err(_) => status.canonical_reason().unwrap_or("unknown").to_string(),
        };
        Err(SendError::Rejected { status, reason })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct OutboundMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
    message_stream: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiError {
    error_code: i64,
    message: String,
}
