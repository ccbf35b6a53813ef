//! Spreadsheet CSV export over HTTP
//!
//! Google Sheets publishes a CSV rendition of a sheet at
//! `{GOOGLE_SHEETS_BASE}/{sheet_id}/gviz/tq?tqx=out:csv`. When the sheet is
//! not shared, the endpoint redirects to a sign-in page; that case is reported
//! as [`InventoryError::NotShared`] rather than a CSV parse failure.

use crate::columns::ColumnHints;
use crate::parse::read_inventory;
use crate::InventoryError;
use reqwest::header::CONTENT_TYPE;
use sommelier_domain::traits::InventorySource;
use sommelier_domain::InventoryRow;
use std::time::Duration;
use tracing::info;

/// Base URL for Google Sheets documents
pub const GOOGLE_SHEETS_BASE: &str = "https://docs.google.com/spreadsheets/d";

/// Default timeout for the export request (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ERROR_BODY_LIMIT: usize = 200;

/// Inventory fetched from a CSV URL
pub struct SheetSource {
    url: String,
    hints: ColumnHints,
    client: reqwest::blocking::Client,
}

impl SheetSource {
    /// Create a source for an arbitrary CSV URL
    pub fn new(url: impl Into<String>, hints: ColumnHints) -> Result<Self, InventoryError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(InventoryError::Config("inventory URL is empty".to_string()));
        }

        let client = build_client(DEFAULT_TIMEOUT_SECS)?;
        Ok(Self { url, hints, client })
    }

    /// Replace the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Result<Self, InventoryError> {
        if timeout_secs == 0 {
            return Err(InventoryError::Config(
                "inventory timeout must be at least one second".to_string(),
            ));
        }
        self.client = build_client(timeout_secs)?;
        Ok(self)
    }

    /// Create a source for a Google Sheets document id
    pub fn google_sheet(sheet_id: &str, hints: ColumnHints) -> Result<Self, InventoryError> {
        let sheet_id = sheet_id.trim();
        if sheet_id.is_empty() || sheet_id.contains('/') || sheet_id.contains(char::is_whitespace) {
            return Err(InventoryError::Config(format!(
                "invalid spreadsheet id '{}'",
                sheet_id
            )));
        }
        Self::new(Self::export_url(sheet_id), hints)
    }

    /// CSV export URL for a Google Sheets document id
    pub fn export_url(sheet_id: &str) -> String {
        format!("{}/{}/gviz/tq?tqx=out:csv", GOOGLE_SHEETS_BASE, sheet_id)
    }

    /// URL this source reads from
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl InventorySource for SheetSource {
    type Error = InventoryError;

    fn load(&self) -> Result<Vec<InventoryRow>, Self::Error> {
        info!(url = %self.url, "Fetching inventory");

        let response = self.client.get(&self.url).send()?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(InventoryError::Http {
                status: status.as_u16(),
                body: snippet(&body),
            });
        }

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("text/html"));
        let body = response.text()?;

        if is_html || body.trim_start().starts_with('<') {
            return Err(InventoryError::NotShared);
        }

        let rows = read_inventory(body.as_bytes(), &self.hints)?;
        info!(count = rows.len(), "Loaded inventory");
        Ok(rows)
    }
}

fn build_client(timeout_secs: u64) -> Result<reqwest::blocking::Client, InventoryError> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// First line of a body, capped for one-line error messages
fn snippet(body: &str) -> String {
    let line = body.lines().next().unwrap_or("").trim();
    match line.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((cut, _)) => format!("{}...", &line[..cut]),
        None => line.to_string(),
    }
}
