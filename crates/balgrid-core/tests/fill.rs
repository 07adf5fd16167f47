use balgrid_core::fill::{fill_gaps, FillError};
use balgrid_core::grid::Grid;
use balgrid_core::series::{BalanceSeries, Record, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;

fn ts(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).expect("parse timestamp")
}

fn balances(series: &BalanceSeries) -> Vec<f64> {
    series
        .balances()
        .map(|balance| balance.expect("balance filled"))
        .collect()
}

#[test]
fn forward_fills_each_missing_slot() {
    let series = BalanceSeries::new(vec![
        Record::observed(ts("2024.01.01 00:00:00"), 1000.0),
        Record::observed(ts("2024.01.01 00:45:00"), 2000.0),
    ]);
    let missing = Grid::for_series(&series).expect("grid").missing_from(&series);

    let filled = fill_gaps(&series, &missing).expect("fill");

    assert_eq!(filled.synthesized, 2);
    assert_eq!(balances(&filled.series), vec![1000.0, 1000.0, 1000.0, 2000.0]);
    assert!(filled.series.is_strictly_increasing());
}

#[test]
fn observed_record_wins_over_coinciding_placeholder() {
    let series = BalanceSeries::new(vec![
        Record::observed(ts("2024.01.01 00:00:00"), 10.0),
        Record::observed(ts("2024.01.01 00:15:00"), 20.0),
    ]);
    // every grid instant is passed as a placeholder, including the observed ones
    let all = vec![ts("2024.01.01 00:00:00"), ts("2024.01.01 00:15:00")];

    let filled = fill_gaps(&series, &all).expect("fill");

    assert_eq!(filled.synthesized, 0);
    assert_eq!(balances(&filled.series), vec![10.0, 20.0]);
}

#[test]
fn off_grid_observation_feeds_the_next_slot() {
    let series = BalanceSeries::new(vec![
        Record::observed(ts("2024.01.01 00:00:00"), 100.0),
        Record::observed(ts("2024.01.01 00:20:00"), 150.0),
        Record::observed(ts("2024.01.01 00:45:00"), 300.0),
    ]);
    let missing = Grid::for_series(&series).expect("grid").missing_from(&series);

    let filled = fill_gaps(&series, &missing).expect("fill");

    let timestamps: Vec<NaiveDateTime> = filled.series.timestamps().collect();
    assert_eq!(
        timestamps,
        vec![
            ts("2024.01.01 00:00:00"),
            ts("2024.01.01 00:15:00"),
            ts("2024.01.01 00:20:00"),
            ts("2024.01.01 00:30:00"),
            ts("2024.01.01 00:45:00"),
        ]
    );
    assert_eq!(balances(&filled.series), vec![100.0, 100.0, 150.0, 150.0, 300.0]);
}

#[test]
fn placeholder_before_first_observation_is_unfillable() {
    let series = BalanceSeries::new(vec![Record::observed(ts("2024.01.01 00:15:00"), 5.0)]);

    let err = fill_gaps(&series, &[ts("2024.01.01 00:00:00")]).expect_err("expected error");

    assert_eq!(
        err,
        FillError::UnfillableLead {
            timestamp: ts("2024.01.01 00:00:00")
        }
    );
}

#[test]
fn absent_observed_lead_is_unfillable() {
    let series = BalanceSeries::new(vec![
        Record::placeholder(ts("2024.01.01 00:00:00")),
        Record::observed(ts("2024.01.01 00:15:00"), 5.0),
    ]);

    assert!(matches!(
        fill_gaps(&series, &[]),
        Err(FillError::UnfillableLead { .. })
    ));
}

#[test]
fn nothing_missing_leaves_series_unchanged() {
    let series = BalanceSeries::new(vec![
        Record::observed(ts("2024.01.01 00:00:00"), 1.0),
        Record::observed(ts("2024.01.01 00:15:00"), 2.0),
    ]);

    let filled = fill_gaps(&series, &[]).expect("fill");
    assert_eq!(filled.series, series);
}
