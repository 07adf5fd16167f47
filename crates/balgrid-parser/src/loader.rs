use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::errors::LoadError;
use crate::model::{LoadedTable, LoaderOptions, RawRow};

const BYTE_ORDER_MARK: char = '\u{feff}';

pub fn load_path(path: &Path, options: &LoaderOptions) -> Result<LoadedTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(file, options)
}

/// Reads a headed CSV, keeps the timestamp and balance columns in row order and
/// drops report footer rows.
pub fn load_reader<R: Read>(reader: R, options: &LoaderOptions) -> Result<LoadedTable, LoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = csv_reader.headers()?.clone();
    if header.is_empty() {
        return Err(LoadError::EmptyHeader);
    }

    let timestamp_idx = find_column(&header, &options.timestamp_column)?;
    let balance_idx = find_column(&header, &options.balance_column)?;

    let mut table = LoadedTable::default();
    for (idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        table.total_rows += 1;

        // short footer rows may not reach either column
        let timestamp = record.get(timestamp_idx).unwrap_or_default();
        if is_summary_row(timestamp, &options.summary_marker) {
            table.summary_rows += 1;
            continue;
        }

        let line = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(idx + 2);
        let balance = record.get(balance_idx).unwrap_or_default();
        table.rows.push(RawRow::new(line, timestamp, balance));
    }

    Ok(table)
}

/// A row is a summary row when its timestamp field is blank or carries the end-of-data marker.
pub fn is_summary_row(timestamp: &str, marker: &str) -> bool {
    let trimmed = timestamp.trim();
    trimmed.is_empty() || (!marker.is_empty() && trimmed.contains(marker))
}

fn find_column(header: &StringRecord, name: &str) -> Result<usize, LoadError> {
    let wanted = name.trim();
    header
        .iter()
        .position(|field| field.trim_start_matches(BYTE_ORDER_MARK).trim() == wanted)
        .ok_or_else(|| LoadError::MissingColumn {
            column: wanted.to_string(),
            header: header.iter().map(str::to_string).collect(),
        })
}
