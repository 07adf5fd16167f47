use serde::Deserialize;

/// Canonical name of the timestamp column after extraction.
pub const DATETIME_COLUMN: &str = "DateTime";
/// Canonical name of the balance column after extraction.
pub const BALANCE_COLUMN: &str = "Balance";

/// Which source columns hold the data and how footer rows are recognised.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    pub timestamp_column: String,
    pub balance_column: String,
    /// Substring that marks the report's end-of-data row in the timestamp field.
    pub summary_marker: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            timestamp_column: "時間".to_string(),
            balance_column: "残高".to_string(),
            summary_marker: "end of test".to_string(),
        }
    }
}

impl LoaderOptions {
    pub fn new(
        timestamp_column: impl Into<String>,
        balance_column: impl Into<String>,
        summary_marker: impl Into<String>,
    ) -> Self {
        Self {
            timestamp_column: timestamp_column.into(),
            balance_column: balance_column.into(),
            summary_marker: summary_marker.into(),
        }
    }

    /// Options for re-reading a file this tool wrote (`DateTime,Balance` header).
    pub fn canonical() -> Self {
        Self {
            timestamp_column: DATETIME_COLUMN.to_string(),
            balance_column: BALANCE_COLUMN.to_string(),
            ..Self::default()
        }
    }
}

/// One data row reduced to the two canonical fields, still as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the source file, header included.
    pub line: usize,
    pub timestamp: String,
    pub balance: String,
}

impl RawRow {
    pub fn new(line: usize, timestamp: impl Into<String>, balance: impl Into<String>) -> Self {
        Self {
            line,
            timestamp: timestamp.into(),
            balance: balance.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadedTable {
    pub rows: Vec<RawRow>,
    /// Data rows seen in the file before summary rows were removed.
    pub total_rows: usize,
    pub summary_rows: usize,
}
