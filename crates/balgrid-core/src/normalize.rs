use std::collections::HashSet;

use balgrid_parser::RawRow;
use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;
use tracing::debug;

use crate::series::{BalanceSeries, Record, TIMESTAMP_FORMAT};

const TIMESTAMP_LAYOUT: &[u8] = b"dddd.dd.dd dd:dd:dd";

#[derive(Debug, Error, PartialEq)]
#[error("line {line}: balance '{raw}' is not numeric")]
pub struct ValueConversionError {
    pub line: usize,
    pub raw: String,
}

#[derive(Debug, Error, PartialEq)]
#[error("line {line}: timestamp '{raw}' does not match YYYY.MM.DD HH:MM:SS")]
pub struct TimestampParseError {
    pub line: usize,
    pub raw: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub invalid_balance: usize,
    pub invalid_timestamp: usize,
    pub duplicates: usize,
}

impl NormalizeStats {
    pub fn dropped(&self) -> usize {
        self.invalid_balance + self.invalid_timestamp + self.duplicates
    }
}

#[derive(Debug, Clone)]
pub struct Normalized {
    pub series: BalanceSeries,
    pub stats: NormalizeStats,
}

/// Strips every whitespace character (thousands separators in the export) and parses the rest.
pub fn coerce_balance(raw: &str, line: usize) -> Result<f64, ValueConversionError> {
    let compact: String = raw.chars().filter(|ch| !ch.is_whitespace()).collect();
    match compact.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValueConversionError {
            line,
            raw: raw.to_string(),
        }),
    }
}

pub fn parse_timestamp(raw: &str, line: usize) -> Result<NaiveDateTime, TimestampParseError> {
    let trimmed = raw.trim();
    let err = || TimestampParseError {
        line,
        raw: raw.to_string(),
    };
    if !matches_layout(trimmed) {
        return Err(err());
    }
    let parsed = NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT).map_err(|_| err())?;
    // chrono reads second 60 as a leap second; the export never carries one
    if parsed.second() >= 60 || parsed.nanosecond() >= 1_000_000_000 {
        return Err(err());
    }
    Ok(parsed)
}

fn matches_layout(text: &str) -> bool {
    text.len() == TIMESTAMP_LAYOUT.len()
        && text
            .bytes()
            .zip(TIMESTAMP_LAYOUT)
            .all(|(byte, &expected)| match expected {
                b'd' => byte.is_ascii_digit(),
                other => byte == other,
            })
}

/// Coerces raw rows into records. Rows with an unusable balance or timestamp are dropped,
/// then repeated timestamps collapse onto their first occurrence.
pub fn normalize_rows(rows: &[RawRow]) -> Normalized {
    let mut stats = NormalizeStats::default();
    let mut seen = HashSet::with_capacity(rows.len());
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let balance = match coerce_balance(&row.balance, row.line) {
            Ok(value) => value,
            Err(err) => {
                debug!(%err, "dropping row");
                stats.invalid_balance += 1;
                continue;
            }
        };
        let timestamp = match parse_timestamp(&row.timestamp, row.line) {
            Ok(value) => value,
            Err(err) => {
                debug!(%err, "dropping row");
                stats.invalid_timestamp += 1;
                continue;
            }
        };
        if !seen.insert(timestamp) {
            debug!(line = row.line, %timestamp, "dropping duplicate timestamp");
            stats.duplicates += 1;
            continue;
        }
        records.push(Record::observed(timestamp, balance));
    }

    Normalized {
        series: BalanceSeries::new(records),
        stats,
    }
}
