//! Spreadsheet service access: authentication, tab naming, and the API seam.
pub mod client;
pub mod credentials;
pub mod range;
pub mod tab_name;

use serde::Serialize;

use crate::{lib::errors::SheetsError, report::Row};

pub use client::SheetsClient;
pub use credentials::{AccessToken, ServiceAccount, SPREADSHEETS_SCOPE};
pub use range::{column_letters, quote_title, table_range};
pub use tab_name::{tab_name, TabNaming, DEFAULT_TAB_PREFIX};

/// How the service interprets written cell values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueInputOption {
    /// Stored exactly as given.
    #[serde(rename = "RAW")]
    Raw,
    /// Parsed as if typed into the UI (numbers, dates, formulas).
    #[serde(rename = "USER_ENTERED")]
    UserEntered,
}

impl ValueInputOption {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "RAW" => Some(ValueInputOption::Raw),
            "USER_ENTERED" => Some(ValueInputOption::UserEntered),
            _ => None,
        }
    }
}

/// A tab created during this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabHandle {
    pub sheet_id: i64,
    pub title: String,
}

/// Grid dimensions requested for a new tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSize {
    pub rows: usize,
    pub columns: usize,
}

impl GridSize {
    /// At least one cell in each dimension.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows: rows.max(1),
            columns: columns.max(1),
        }
    }
}

/// What the service reports after a range write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub updated_range: String,
    pub updated_rows: usize,
    pub updated_columns: usize,
}

/// Remote operations needed to publish a table into a fresh tab.
#[allow(async_fn_in_trait)]
pub trait SpreadsheetApi {
    /// Create a new tab titled `title` sized to `grid`. Fails if the title is taken.
    async fn add_tab(&self, title: &str, grid: GridSize) -> Result<TabHandle, SheetsError>;

    /// Write `rows` into the A1 `range`.
    async fn write_values(&self, range: &str, rows: &[Row]) -> Result<WriteSummary, SheetsError>;

    /// Remove a tab created earlier in the run.
    async fn delete_tab(&self, tab: &TabHandle) -> Result<(), SheetsError>;
}
