//! Report parsing into rectangular tables.
mod delimited;
mod key_value;

use std::fmt;

use serde::Serialize;

use crate::lib::errors::ReportError;

pub use self::delimited::parse_csv;
pub use self::key_value::{parse_key_value, KEY_VALUE_WIDTH};

/// Input format of a report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Csv,
    KeyValue,
}

impl ReportFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::KeyValue => "key_value",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "csv" => Some(ReportFormat::Csv),
            "key_value" | "kv" => Some(ReportFormat::KeyValue),
            _ => None,
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of string cells.
pub type Row = Vec<String>;

/// Ordered rows sharing a single column count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    rows: Vec<Row>,
    width: usize,
}

impl Table {
    /// Build a table, padding short rows with empty cells up to the widest row.
    pub fn from_rows(mut rows: Vec<Row>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { rows, width }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.width == 0
    }
}

/// Parse report text according to `format`.
///
/// Content that yields no rows becomes a single row of empty cells rather
/// than an error: one cell for CSV, a key/value pair for metrics.
pub fn parse_report(content: &str, format: ReportFormat) -> Result<Table, ReportError> {
    let rows = match format {
        ReportFormat::Csv => parse_csv(content)?,
        ReportFormat::KeyValue => parse_key_value(content),
    };
    if rows.is_empty() {
        let width = match format {
            ReportFormat::Csv => 1,
            ReportFormat::KeyValue => KEY_VALUE_WIDTH,
        };
        return Ok(Table::from_rows(vec![vec![String::new(); width]]));
    }
    Ok(Table::from_rows(rows))
}
