use std::time::Duration;

use amzviral_core::AppConfig;
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use serde_json::json;

use crate::{SheetRow, SheetsError, SheetsExporter};

/// Target range; rows land after the last filled row of `Sheet1`.
const APPEND_RANGE: &str = "Sheet1!A:H";
const TIMEOUT_SECS: u64 = 30;
/// Spreadsheet ids are URL-safe base64; keep `-` and `_` literal.
const ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Google Sheets v4 client authenticated with a bearer token.
pub struct GoogleSheetsClient {
    client: Client,
    api_base: String,
    access_token: String,
}

impl GoogleSheetsClient {
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_base: &str, access_token: &str) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_owned(),
            access_token: access_token.to_owned(),
        })
    }

    /// Returns `None` when no access token is configured.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, SheetsError> {
        config
            .sheets_access_token
            .as_deref()
            .map(|token| Self::new(&config.sheets_api_base, token))
            .transpose()
    }

    fn append_url(&self, spreadsheet_id: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{APPEND_RANGE}:append?valueInputOption=RAW",
            self.api_base,
            utf8_percent_encode(spreadsheet_id, ID_SEGMENT)
        )
    }
}

#[async_trait]
impl SheetsExporter for GoogleSheetsClient {
    async fn append_row(&self, spreadsheet_id: &str, row: &SheetRow) -> Result<(), SheetsError> {
        let spreadsheet_id = spreadsheet_id.trim();
        if spreadsheet_id.is_empty() {
            return Err(SheetsError::MissingSpreadsheetId);
        }

        let response = self
            .client
            .post(self.append_url(spreadsheet_id))
            .bearer_auth(&self.access_token)
            .json(&json!({ "values": [row.values()] }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(spreadsheet_id, title = %row.product_title, "row appended to sheet");
        Ok(())
    }
}
