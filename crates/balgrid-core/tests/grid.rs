use balgrid_core::error::PipelineError;
use balgrid_core::grid::{grid_interval, Grid, MAX_GRID_SLOTS};
use balgrid_core::series::{BalanceSeries, Record, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;

fn ts(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).expect("parse timestamp")
}

#[test]
fn grid_spans_min_to_max_inclusive() {
    let grid = Grid::build(ts("2024.01.01 00:00:00"), ts("2024.01.01 01:00:00"));

    assert_eq!(grid.len(), 5);
    assert_eq!(grid.instants()[0], ts("2024.01.01 00:00:00"));
    assert_eq!(grid.instants()[4], ts("2024.01.01 01:00:00"));
    assert!(grid
        .instants()
        .windows(2)
        .all(|pair| pair[1] - pair[0] == grid_interval()));
}

#[test]
fn single_observation_gives_single_slot() {
    let instant = ts("2024.05.05 12:34:56");
    let grid = Grid::build(instant, instant);
    assert_eq!(grid.instants(), &[instant]);
}

#[test]
fn off_grid_maximum_is_not_extended_past() {
    // 00:50 is 3 full intervals plus 5 minutes after 00:00
    let grid = Grid::build(ts("2024.01.01 00:00:00"), ts("2024.01.01 00:50:00"));

    assert_eq!(grid.len(), 4);
    assert_eq!(grid.instants().last(), Some(&ts("2024.01.01 00:45:00")));
}

#[test]
fn grid_anchors_at_unaligned_minimum() {
    let grid = Grid::build(ts("2024.01.01 00:07:30"), ts("2024.01.01 00:40:00"));

    let rendered: Vec<String> = grid
        .instants()
        .iter()
        .map(|instant| instant.format(TIMESTAMP_FORMAT).to_string())
        .collect();
    assert_eq!(
        rendered,
        vec![
            "2024.01.01 00:07:30",
            "2024.01.01 00:22:30",
            "2024.01.01 00:37:30",
        ]
    );
}

#[test]
fn grid_crosses_day_boundary() {
    let grid = Grid::build(ts("2023.12.31 23:30:00"), ts("2024.01.01 00:30:00"));
    assert_eq!(grid.len(), 5);
    assert_eq!(grid.instants()[2], ts("2024.01.01 00:00:00"));
}

#[test]
fn missing_instants_are_the_set_difference() {
    let series = BalanceSeries::new(vec![
        Record::observed(ts("2024.01.01 00:00:00"), 1000.0),
        Record::observed(ts("2024.01.01 00:20:00"), 1100.0),
        Record::observed(ts("2024.01.01 00:45:00"), 2000.0),
    ]);
    let grid = Grid::for_series(&series).expect("grid");

    assert_eq!(
        grid.missing_from(&series),
        vec![ts("2024.01.01 00:15:00"), ts("2024.01.01 00:30:00")]
    );
}

#[test]
fn empty_series_has_no_grid() {
    let err = Grid::for_series(&BalanceSeries::default()).expect_err("expected error");
    assert!(matches!(err, PipelineError::EmptySeries));
}

#[test]
fn span_beyond_slot_limit_is_refused() {
    let series: BalanceSeries = vec![
        Record::observed(ts("0001.01.01 00:00:00"), 1.0),
        Record::observed(ts("9999.12.31 00:00:00"), 2.0),
    ]
    .into_iter()
    .collect();

    match Grid::for_series(&series) {
        Err(PipelineError::GridTooLarge { slots, limit }) => {
            assert!(slots > limit);
            assert_eq!(limit, MAX_GRID_SLOTS);
        }
        other => panic!("expected GridTooLarge, got {other:?}"),
    }
}

#[test]
fn slot_count_matches_built_grid() {
    let (min, max) = (ts("2024.01.01 00:00:00"), ts("2024.01.01 00:50:00"));
    assert_eq!(Grid::slot_count(min, max), 4);
    assert_eq!(Grid::build(min, max).len(), 4);
    assert_eq!(Grid::slot_count(max, min), 0);
}
