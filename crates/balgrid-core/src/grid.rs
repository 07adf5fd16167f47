use std::collections::HashSet;

use chrono::{Duration, NaiveDateTime};

use crate::error::{PipelineError, Result};
use crate::series::BalanceSeries;

/// Spacing of the output grid. Fixed; not a configuration option.
pub const GRID_INTERVAL_SECONDS: i64 = 15 * 60;

/// Upper bound on grid length, roughly 285 years of 15-minute slots.
pub const MAX_GRID_SLOTS: i64 = 10_000_000;

pub fn grid_interval() -> Duration {
    Duration::seconds(GRID_INTERVAL_SECONDS)
}

/// The regular 15-minute grid anchored at the earliest observation.
///
/// The grid runs `min, min + 15m, ...` up to the last instant that does not pass `max`,
/// so an observed maximum that sits between grid points is not itself a grid instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    instants: Vec<NaiveDateTime>,
}

impl Grid {
    pub fn build(min: NaiveDateTime, max: NaiveDateTime) -> Self {
        if max < min {
            return Self {
                instants: Vec::new(),
            };
        }

        let steps = (max - min).num_seconds() / GRID_INTERVAL_SECONDS;
        let step = grid_interval();
        let mut instants = Vec::with_capacity(steps as usize + 1);
        let mut current = min;
        for _ in 0..=steps {
            instants.push(current);
            match current.checked_add_signed(step) {
                Some(next) => current = next,
                None => break,
            }
        }
        Self { instants }
    }

    /// Number of instants `build(min, max)` would produce.
    pub fn slot_count(min: NaiveDateTime, max: NaiveDateTime) -> i64 {
        if max < min {
            return 0;
        }
        (max - min).num_seconds() / GRID_INTERVAL_SECONDS + 1
    }

    pub fn for_series(series: &BalanceSeries) -> Result<Self> {
        let (min, max) = series.bounds().ok_or(PipelineError::EmptySeries)?;
        let slots = Self::slot_count(min, max);
        if slots > MAX_GRID_SLOTS {
            return Err(PipelineError::GridTooLarge {
                slots,
                limit: MAX_GRID_SLOTS,
            });
        }
        Ok(Self::build(min, max))
    }

    pub fn instants(&self) -> &[NaiveDateTime] {
        &self.instants
    }

    pub fn len(&self) -> usize {
        self.instants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    /// Grid instants with no record in `series`, ascending.
    pub fn missing_from(&self, series: &BalanceSeries) -> Vec<NaiveDateTime> {
        let observed: HashSet<NaiveDateTime> = series.timestamps().collect();
        self.instants
            .iter()
            .copied()
            .filter(|instant| !observed.contains(instant))
            .collect()
    }
}
