use std::fs::File;
use std::path::{Path, PathBuf};

use balgrid_parser::{BALANCE_COLUMN, DATETIME_COLUMN};
use chrono::NaiveDateTime;
use polars::prelude::*;
use thiserror::Error;

use crate::series::{BalanceSeries, TIMESTAMP_FORMAT};

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Polars operation failed: {0}")]
    Polars(#[from] PolarsError),
}

pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Renders the series as a `DateTime,Balance` table. Absent balances stay null.
pub fn to_dataframe(series: &BalanceSeries) -> Result<DataFrame, OutputError> {
    let timestamps: Vec<String> = series.timestamps().map(format_timestamp).collect();
    let balances: Vec<Option<f64>> = series.balances().collect();

    let df = DataFrame::new(vec![
        Series::new(DATETIME_COLUMN.into(), timestamps).into(),
        Series::new(BALANCE_COLUMN.into(), balances).into(),
    ])?;
    Ok(df)
}

/// Writes `df` as comma-separated UTF-8 with a byte-order mark so spreadsheet tools pick the
/// right encoding.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), OutputError> {
    let mut file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .include_bom(true)
        .with_separator(b',')
        .finish(df)?;
    Ok(())
}

/// `dir/report.csv` becomes `dir/report{suffix}.csv`; a missing extension stays missing.
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    input.with_file_name(file_name)
}
