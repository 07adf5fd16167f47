use std::path::{Path, PathBuf};

use balgrid_parser::{load_path, LoadedTable};
use polars::prelude::DataFrame;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::fill::fill_gaps;
use crate::grid::Grid;
use crate::normalize::{normalize_rows, NormalizeStats};
use crate::output::{derive_output_path, to_dataframe, write_csv};
use crate::series::BalanceSeries;

/// Row counts gathered along the way, for the caller to present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub rows_read: usize,
    pub summary_rows: usize,
    pub extracted_rows: usize,
    pub invalid_balance: usize,
    pub invalid_timestamp: usize,
    pub duplicates: usize,
    pub observed_rows: usize,
    pub grid_slots: usize,
    pub missing_slots: usize,
    pub output_rows: usize,
}

impl PipelineReport {
    fn from_load(table: &LoadedTable) -> Self {
        Self {
            rows_read: table.total_rows,
            summary_rows: table.summary_rows,
            extracted_rows: table.rows.len(),
            ..Self::default()
        }
    }

    fn record_normalize(&mut self, stats: NormalizeStats, observed: usize) {
        self.invalid_balance = stats.invalid_balance;
        self.invalid_timestamp = stats.invalid_timestamp;
        self.duplicates = stats.duplicates;
        self.observed_rows = observed;
    }
}

#[derive(Debug, Clone)]
pub struct Resampled {
    pub series: BalanceSeries,
    pub grid_slots: usize,
    pub missing_slots: usize,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub series: BalanceSeries,
    pub dataframe: DataFrame,
    pub output_path: PathBuf,
    pub report: PipelineReport,
}

/// Sort, build the grid, fill the gaps. Expects a series with unique timestamps.
pub fn resample(series: BalanceSeries) -> Result<Resampled> {
    let sorted = series.sorted();
    let grid = Grid::for_series(&sorted)?;
    let missing = grid.missing_from(&sorted);
    info!(missing = missing.len(), "slots needing fill");

    let filled = fill_gaps(&sorted, &missing)?;
    Ok(Resampled {
        series: filled.series,
        grid_slots: grid.len(),
        missing_slots: missing.len(),
    })
}

/// Normalize and resample already-loaded rows, without touching the filesystem.
pub fn run_table(table: &LoadedTable) -> Result<(BalanceSeries, PipelineReport)> {
    let mut report = PipelineReport::from_load(table);
    info!(rows = report.extracted_rows, "extracted time and balance rows");

    let normalized = normalize_rows(&table.rows);
    report.record_normalize(normalized.stats, normalized.series.len());
    log_dropped(&normalized.stats);
    info!(
        rows = normalized.series.len(),
        "rows after removing duplicates and invalid values"
    );

    if normalized.series.is_empty() {
        return Err(PipelineError::EmptySeries);
    }

    let resampled = resample(normalized.series)?;
    report.grid_slots = resampled.grid_slots;
    report.missing_slots = resampled.missing_slots;
    report.output_rows = resampled.series.len();
    Ok((resampled.series, report))
}

/// Cleanup only: normalize and sort the rows without filling the grid.
pub fn clean(table: &LoadedTable) -> Result<(BalanceSeries, PipelineReport)> {
    let mut report = PipelineReport::from_load(table);
    let normalized = normalize_rows(&table.rows);
    report.record_normalize(normalized.stats, normalized.series.len());
    log_dropped(&normalized.stats);

    if normalized.series.is_empty() {
        return Err(PipelineError::EmptySeries);
    }

    let series = normalized.series.sorted();
    report.output_rows = series.len();
    Ok((series, report))
}

/// Full run for one file: load, resample, write `<stem><suffix>.<ext>` next to the input.
/// Nothing is written unless every stage succeeds.
pub fn process_file(input: &Path, config: &PipelineConfig) -> Result<PipelineOutput> {
    info!(path = %input.display(), "loading CSV");
    let table = load_path(input, &config.loader)?;
    info!(
        rows = table.total_rows,
        summary_rows = table.summary_rows,
        "CSV loaded"
    );

    let (series, report) = run_table(&table)?;

    let mut dataframe = to_dataframe(&series)?;
    let output_path = derive_output_path(input, &config.output_suffix);
    write_csv(&mut dataframe, &output_path)?;
    info!(path = %output_path.display(), "saved results");
    info!(rows = report.output_rows, "final row count");

    Ok(PipelineOutput {
        series,
        dataframe,
        output_path,
        report,
    })
}

fn log_dropped(stats: &NormalizeStats) {
    if stats.invalid_balance > 0 || stats.invalid_timestamp > 0 {
        warn!(
            invalid_balance = stats.invalid_balance,
            invalid_timestamp = stats.invalid_timestamp,
            "dropped rows that could not be coerced"
        );
    }
    if stats.duplicates > 0 {
        info!(duplicates = stats.duplicates, "dropped duplicate timestamps");
    }
}
