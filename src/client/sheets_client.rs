use std::time::Duration;

use anyhow::Context;

use reqwest::Client;

use serde::Serialize;

use secrecy::Secret;

use url::Url;

/// Spreadsheet appender backed by the Google Sheets `values.append` API
#[derive(Debug)]
pub struct SheetsClient {
    client: Client,

    api_append_url: Url,
    api_access_token: Secret<String>,
}

impl SheetsClient {
    pub fn new(
        api_base_url: Url,
        spreadsheet_id: &str,
        range: &str,
        api_timeout: Duration,
        api_access_token: Secret<String>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(api_timeout)
            .build()
            .context("Failed to build http client")?;

        let append = format!("{}:append", range);

        let mut api_append_url = api_base_url;
        api_append_url
            .path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Sheets API base URL cannot be a base"))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", spreadsheet_id, "values", append.as_str()]);
        api_append_url
            .query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");

        Ok(Self {
            client,
            api_append_url,
            api_access_token,
        })
    }

    #[tracing::instrument(name = "Append a row via Sheets API", skip(self, row))]
    pub async fn append_row(&self, row: &[&str]) -> reqwest::Result<()> {
        use secrecy::ExposeSecret;

        let body = AppendRowRequest { values: [row] };

        self.client
            .post(self.api_append_url.clone())
            .bearer_auth(self.api_access_token.expose_secret())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct AppendRowRequest<'a> {
    values: [&'a [&'a str]; 1],
}
