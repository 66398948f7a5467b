//! Month grid layout.
//!
//! Builds the fixed 42-cell grid for a month and maps event date sets onto it
//! as capsule segments. Everything here is pure and recomputed from scratch on
//! every render; there is no incremental update path.

use chrono::{Datelike, Days, NaiveDate};
use std::collections::BTreeSet;

use crate::models::event::CalendarEvent;
use crate::models::grid::{
    column_of, row_of, CapsuleSegment, EventLayout, GridCell, LabelAnchor, LabelSide, MonthGrid,
    GRID_CELLS, GRID_COLUMNS, GRID_ROWS,
};
use crate::utils::date::{first_of_month, CalendarDay};

/// Label pills start on the left of the grid for events starting before
/// this column, on the right otherwise.
const LEFT_LABEL_COLUMNS: usize = 3;

/// Layout entry point bound to a week start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayoutEngine {
    first_day_of_week: u8,
}

impl GridLayoutEngine {
    /// `first_day_of_week` is 0 = Sunday .. 6 = Saturday; larger values wrap.
    pub fn new(first_day_of_week: u8) -> Self {
        Self {
            first_day_of_week: first_day_of_week % 7,
        }
    }

    pub fn month_grid(&self, reference: NaiveDate) -> MonthGrid {
        build_month_grid(reference, self.first_day_of_week)
    }

    /// Capsule segments for every event, in the order given.
    pub fn layout<'a>(
        &self,
        grid: &MonthGrid,
        events: impl IntoIterator<Item = &'a CalendarEvent>,
    ) -> Vec<EventLayout> {
        events
            .into_iter()
            .map(|event| EventLayout {
                event_id: event.id,
                segments: segment_dates(grid, &event.dates),
            })
            .collect()
    }
}

impl Default for GridLayoutEngine {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Six rows of seven days covering the month of `reference`.
///
/// Leading cells come from the previous month so the 1st lands on its weekday
/// column; trailing cells from the next month fill the grid to 42. At the
/// edges of the representable range the grid is clamped to stay inside it.
pub fn build_month_grid(reference: NaiveDate, first_day_of_week: u8) -> MonthGrid {
    let first = first_of_month(reference);
    let week_start = u32::from(first_day_of_week % 7);
    let leading = (first.weekday().num_days_from_sunday() + 7 - week_start) % 7;
    let grid_start = first
        .checked_sub_days(Days::new(u64::from(leading)))
        .unwrap_or(NaiveDate::MIN);
    // iter_days never yields NaiveDate::MAX itself
    let grid_start = NaiveDate::MAX
        .checked_sub_days(Days::new(GRID_CELLS as u64))
        .map_or(grid_start, |latest| grid_start.min(latest));

    let cells = grid_start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| GridCell {
            date,
            is_current_month: date.year() == first.year() && date.month() == first.month(),
        })
        .collect();

    MonthGrid::from_cells(first_day_of_week % 7, cells)
}

/// Every day from the earlier to the later of `a` and `b`, inclusive.
///
/// Both ends are truncated to their calendar day first, so the argument order
/// and any time-of-day never change the result.
pub fn normalize_range(a: impl CalendarDay, b: impl CalendarDay) -> Vec<NaiveDate> {
    let (a, b) = (a.calendar_day(), b.calendar_day());
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// Split the grid cells covered by `dates` into per-row capsule segments.
///
/// Each maximal run of consecutive covered cells is one capsule; a run that
/// wraps past column 6 is cut at every row boundary. Only the first piece of
/// a run has a rounded start and only the last has a rounded end.
pub fn segment_dates(grid: &MonthGrid, dates: &BTreeSet<NaiveDate>) -> Vec<CapsuleSegment> {
    let mut segments = Vec::new();
    let mut run_start: Option<usize> = None;

    for (index, cell) in grid.cells().iter().enumerate() {
        let covered = dates.contains(&cell.date);
        match (covered, run_start) {
            (true, None) => run_start = Some(index),
            (false, Some(start)) => {
                split_run(start, index - 1, &mut segments);
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start {
        split_run(start, grid.cells().len() - 1, &mut segments);
    }

    segments
}

fn split_run(start: usize, end: usize, segments: &mut Vec<CapsuleSegment>) {
    let (first_row, last_row) = (row_of(start), row_of(end));
    for row in first_row..=last_row {
        let row_start = if row == first_row { start } else { row * GRID_COLUMNS };
        let row_end = if row == last_row {
            end
        } else {
            row * GRID_COLUMNS + GRID_COLUMNS - 1
        };
        segments.push(CapsuleSegment {
            row,
            start_column: column_of(row_start),
            end_column: column_of(row_end),
            rounded_start: row == first_row,
            rounded_end: row == last_row,
            run_start: start,
        });
    }
}

/// Side label placement for an event, pointing at its first date.
///
/// Events whose first date is not visible on `grid` get no label.
pub fn label_anchor(grid: &MonthGrid, event: &CalendarEvent) -> Option<LabelAnchor> {
    let index = grid.index_of(event.first_date()?)?;
    let column = column_of(index);
    Some(LabelAnchor {
        row: row_of(index),
        column,
        side: if column < LEFT_LABEL_COLUMNS {
            LabelSide::Left
        } else {
            LabelSide::Right
        },
    })
}

/// Vertical lane of every capsule segment.
///
/// `lanes[i][j]` is the lane of segment `j` of layout `i`. Lanes are assigned
/// greedily per row in layout order, so segments sharing a row never overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneAssignment {
    pub lanes: Vec<Vec<usize>>,
    /// Number of lanes in use on each grid row
    pub row_lane_counts: [usize; GRID_ROWS],
}

impl LaneAssignment {
    pub fn lane(&self, layout: usize, segment: usize) -> usize {
        self.lanes
            .get(layout)
            .and_then(|segments| segments.get(segment))
            .copied()
            .unwrap_or(0)
    }
}

pub fn assign_lanes(layouts: &[EventLayout]) -> LaneAssignment {
    // Occupied column spans per row, per lane
    let mut rows: [Vec<Vec<(usize, usize)>>; GRID_ROWS] = std::array::from_fn(|_| Vec::new());

    let lanes: Vec<Vec<usize>> = layouts
        .iter()
        .map(|layout| {
            layout
                .segments
                .iter()
                .map(|segment| {
                    let row_lanes = &mut rows[segment.row];
                    let span = (segment.start_column, segment.end_column);
                    let free = row_lanes.iter().position(|taken| {
                        taken
                            .iter()
                            .all(|(start, end)| span.1 < *start || span.0 > *end)
                    });
                    match free {
                        Some(lane) => {
                            row_lanes[lane].push(span);
                            lane
                        }
                        None => {
                            row_lanes.push(vec![span]);
                            row_lanes.len() - 1
                        }
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect();

    LaneAssignment {
        lanes,
        row_lane_counts: std::array::from_fn(|row| rows[row].len()),
    }
}
