use chrono::NaiveDateTime;

/// Literal layout of timestamps on input and output (`2024.01.01 00:15:00`).
pub const TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub timestamp: NaiveDateTime,
    pub balance: Option<f64>,
}

impl Record {
    pub fn observed(timestamp: NaiveDateTime, balance: f64) -> Self {
        Self {
            timestamp,
            balance: Some(balance),
        }
    }

    /// A grid slot with no observation yet.
    pub fn placeholder(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            balance: None,
        }
    }
}

/// Balance records in stage order. After sorting the timestamps are non-decreasing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceSeries {
    records: Vec<Record>,
}

impl BalanceSeries {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.records.iter().map(|record| record.timestamp)
    }

    pub fn balances(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.records.iter().map(|record| record.balance)
    }

    /// Earliest and latest timestamp, or `None` for an empty series.
    pub fn bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let min = self.timestamps().min()?;
        let max = self.timestamps().max()?;
        Some((min, max))
    }

    /// Stable chronological sort; records sharing a timestamp keep their relative order.
    pub fn sorted(self) -> Self {
        let mut records = self.records;
        records.sort_by_key(|record| record.timestamp);
        Self { records }
    }

    pub fn is_strictly_increasing(&self) -> bool {
        self.records
            .windows(2)
            .all(|pair| pair[0].timestamp < pair[1].timestamp)
    }
}

impl From<Vec<Record>> for BalanceSeries {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for BalanceSeries {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).expect("timestamp")
    }

    #[test]
    fn sorted_is_stable_for_equal_timestamps() {
        let series = BalanceSeries::new(vec![
            Record::observed(ts("2024.01.01 00:30:00"), 3.0),
            Record::observed(ts("2024.01.01 00:00:00"), 1.0),
            Record::observed(ts("2024.01.01 00:30:00"), 4.0),
        ])
        .sorted();

        let balances: Vec<Option<f64>> = series.balances().collect();
        assert_eq!(balances, vec![Some(1.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn bounds_of_empty_series() {
        assert!(BalanceSeries::default().bounds().is_none());
    }
}
