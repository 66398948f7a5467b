// Property-based tests for the month grid and capsule layout
// Random months, week starts and date sets

#[path = "../fixtures/mod.rs"]
mod fixtures;

use capsule_calendar::models::event::EventColor;
use capsule_calendar::models::grid::{GRID_CELLS, GRID_COLUMNS};
use capsule_calendar::services::event::EventStore;
use capsule_calendar::services::layout::{
    assign_lanes, build_month_grid, normalize_range, segment_dates, GridLayoutEngine,
};
use capsule_calendar::utils::date::{first_of_month, shift_month};
use chrono::{Datelike, NaiveDate};
use fixtures::dates::ymd;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (1990..2060i32, 1..=12u32, 1..=28u32).prop_map(|(y, m, d)| ymd(y, m, d))
}

proptest! {
    /// Property: every grid has 42 cells starting on the configured weekday
    #[test]
    fn prop_grid_shape(reference in any_date(), week_start in 0..7u8) {
        let grid = build_month_grid(reference, week_start);

        prop_assert_eq!(grid.cells().len(), GRID_CELLS);
        let first = grid.cells()[0].date;
        prop_assert_eq!(first.weekday().num_days_from_sunday(), u32::from(week_start));

        // Cells are consecutive days
        for pair in grid.cells().windows(2) {
            prop_assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
    }

    /// Property: the current-month cells are exactly the days of the month
    #[test]
    fn prop_current_month_cells(reference in any_date(), week_start in 0..7u8) {
        let grid = build_month_grid(reference, week_start);
        let current: Vec<_> = grid
            .cells()
            .iter()
            .filter(|cell| cell.is_current_month)
            .map(|cell| cell.date)
            .collect();

        let month_start = first_of_month(reference);
        let month_length = (shift_month(reference, 1) - month_start).num_days();
        prop_assert_eq!(current.len() as i64, month_length);
        prop_assert_eq!(current[0].day(), 1);
        prop_assert!(current.iter().all(|d| d.month() == reference.month()));
        // The 1st always lands in the first row
        prop_assert!(grid.index_of(current[0]).unwrap() < GRID_COLUMNS);
    }

    /// Property: range normalization ignores argument order
    #[test]
    fn prop_normalize_range_symmetric(a in any_date(), offset in -60..60i64) {
        let b = a + chrono::Duration::days(offset);
        let forward = normalize_range(a, b);
        let backward = normalize_range(b, a);

        prop_assert_eq!(&forward, &backward);
        prop_assert_eq!(forward.len() as i64, offset.abs() + 1);
        prop_assert_eq!(forward[0], a.min(b));
    }

    /// Property: a same-day range is that single day
    #[test]
    fn prop_normalize_range_same_day(a in any_date(), hour in 0..24u32, minute in 0..60u32) {
        let morning = a.and_hms_opt(0, 0, 0).unwrap();
        let later = a.and_hms_opt(hour, minute, 0).unwrap();
        prop_assert_eq!(normalize_range(later, morning), vec![a]);
    }

    /// Property: segments stay within one row and cover exactly the visible dates
    #[test]
    fn prop_segments_cover_dates(
        reference in any_date(),
        week_start in 0..7u8,
        indices in proptest::collection::btree_set(0..GRID_CELLS, 0..20),
    ) {
        let grid = build_month_grid(reference, week_start);
        let dates: BTreeSet<NaiveDate> = indices
            .iter()
            .filter_map(|i| grid.date_at(*i))
            .collect();

        let segments = segment_dates(&grid, &dates);

        let mut covered = BTreeSet::new();
        for segment in &segments {
            prop_assert!(segment.start_column <= segment.end_column);
            prop_assert!(segment.end_column < GRID_COLUMNS);
            for index in segment.start_index()..=segment.end_index() {
                prop_assert!(covered.insert(index), "cell {} covered twice", index);
            }
        }
        prop_assert_eq!(covered, indices);
    }

    /// Property: capsules sharing a row never share a lane where they overlap
    #[test]
    fn prop_lanes_never_overlap(
        reference in any_date(),
        ranges in proptest::collection::vec((0..GRID_CELLS, 0..10usize), 1..8),
    ) {
        let engine = GridLayoutEngine::new(0);
        let grid = engine.month_grid(reference);
        let mut store = EventStore::new();
        for (start, len) in ranges {
            let end = (start + len).min(GRID_CELLS - 1);
            let dates = normalize_range(
                grid.date_at(start).unwrap(),
                grid.date_at(end).unwrap(),
            );
            store.add("Event", dates, EventColor::Blue).unwrap();
        }

        let layouts = engine.layout(&grid, store.iter());
        let lanes = assign_lanes(&layouts);

        let mut taken = BTreeSet::new();
        for (i, layout) in layouts.iter().enumerate() {
            for (j, segment) in layout.segments.iter().enumerate() {
                let lane = lanes.lane(i, j);
                prop_assert!(lane < lanes.row_lane_counts[segment.row]);
                for column in segment.start_column..=segment.end_column {
                    prop_assert!(taken.insert((segment.row, lane, column)));
                }
            }
        }
    }
}
