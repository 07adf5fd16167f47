use chrono::NaiveDateTime;
use thiserror::Error;

use crate::series::{BalanceSeries, Record};

#[derive(Debug, Error, PartialEq)]
pub enum FillError {
    #[error("first record at {timestamp} has no balance to carry forward")]
    UnfillableLead { timestamp: NaiveDateTime },
}

#[derive(Debug, Clone)]
pub struct Filled {
    pub series: BalanceSeries,
    /// Placeholder rows that received a carried-forward balance.
    pub synthesized: usize,
}

// Observed rows sort ahead of placeholders that share their timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Origin {
    Observed,
    Placeholder,
}

/// Merges placeholders for `missing` into `series`, forward-fills absent balances and keeps one
/// record per timestamp, preferring the observed one.
pub fn fill_gaps(series: &BalanceSeries, missing: &[NaiveDateTime]) -> Result<Filled, FillError> {
    let mut union: Vec<(Record, Origin)> = series
        .records()
        .iter()
        .map(|record| (*record, Origin::Observed))
        .chain(
            missing
                .iter()
                .map(|instant| (Record::placeholder(*instant), Origin::Placeholder)),
        )
        .collect();
    union.sort_by_key(|(record, origin)| (record.timestamp, *origin));

    let mut records: Vec<Record> = Vec::with_capacity(union.len());
    let mut carried: Option<f64> = None;
    let mut synthesized = 0;

    for (record, origin) in union {
        if records
            .last()
            .is_some_and(|previous| previous.timestamp == record.timestamp)
        {
            continue;
        }

        let balance = match record.balance.or(carried) {
            Some(value) => value,
            None => {
                return Err(FillError::UnfillableLead {
                    timestamp: record.timestamp,
                })
            }
        };
        if origin == Origin::Placeholder {
            synthesized += 1;
        }
        carried = Some(balance);
        records.push(Record::observed(record.timestamp, balance));
    }

    Ok(Filled {
        series: BalanceSeries::new(records),
        synthesized,
    })
}
