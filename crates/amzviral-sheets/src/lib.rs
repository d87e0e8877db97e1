//! Spreadsheet export: one row per processed product.
//!
//! [`SheetsExporter`] is the seam the server depends on;
//! [`GoogleSheetsClient`] implements it against the Sheets v4 REST API with
//! a pre-issued OAuth bearer token.

mod client;
mod row;

pub use client::GoogleSheetsClient;
pub use row::SheetRow;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("no spreadsheet id provided")]
    MissingSpreadsheetId,
}

/// Appends rows to an external spreadsheet.
#[async_trait]
pub trait SheetsExporter: Send + Sync {
    /// Appends `row` after the last filled row of the first sheet.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError`] when the id is blank or the upstream call fails.
    async fn append_row(&self, spreadsheet_id: &str, row: &SheetRow) -> Result<(), SheetsError>;
}
