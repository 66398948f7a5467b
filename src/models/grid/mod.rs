// Grid module
// Fixed 6x7 month grid and the capsule pieces laid out on it

use chrono::NaiveDate;

use crate::models::event::EventId;

/// Columns per grid row (one per weekday)
pub const GRID_COLUMNS: usize = 7;
/// Rows per month grid; always six so the layout never jumps between months
pub const GRID_ROWS: usize = 6;
pub const GRID_CELLS: usize = GRID_COLUMNS * GRID_ROWS;

/// One of the 42 day slots shown for a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    /// Whether the date belongs to the displayed month rather than padding
    pub is_current_month: bool,
}

/// The 42 cells for a displayed month, in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    first_day_of_week: u8,
    cells: Vec<GridCell>,
}

impl MonthGrid {
    pub(crate) fn from_cells(first_day_of_week: u8, cells: Vec<GridCell>) -> Self {
        debug_assert_eq!(cells.len(), GRID_CELLS);
        Self {
            first_day_of_week,
            cells,
        }
    }

    /// 0 = Sunday .. 6 = Saturday; the weekday shown in column 0
    pub fn first_day_of_week(&self) -> u8 {
        self.first_day_of_week
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        self.cells.get(index).map(|cell| cell.date)
    }

    /// Grid index of `date`, if it is visible in this grid
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let first = self.cells.first()?.date;
        let offset = date.signed_duration_since(first).num_days();
        usize::try_from(offset).ok().filter(|idx| *idx < self.cells.len())
    }
}

pub fn row_of(index: usize) -> usize {
    index / GRID_COLUMNS
}

pub fn column_of(index: usize) -> usize {
    index % GRID_COLUMNS
}

/// Piece of one event run confined to a single grid row.
///
/// `rounded_start`/`rounded_end` mark the ends that coincide with the run's
/// real start and end, so a run crossing several rows renders as one pill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapsuleSegment {
    pub row: usize,
    pub start_column: usize,
    pub end_column: usize,
    pub rounded_start: bool,
    pub rounded_end: bool,
    /// Grid index where the owning run starts; drag-reposition anchors here
    pub run_start: usize,
}

impl CapsuleSegment {
    pub fn start_index(&self) -> usize {
        self.row * GRID_COLUMNS + self.start_column
    }

    pub fn end_index(&self) -> usize {
        self.row * GRID_COLUMNS + self.end_column
    }
}

/// Segments computed for one event on the current grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLayout {
    pub event_id: EventId,
    pub segments: Vec<CapsuleSegment>,
}

/// Which side of the grid an event label is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    Left,
    Right,
}

/// Where the side label of an event points: the cell of its first date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelAnchor {
    pub row: usize,
    pub column: usize,
    pub side: LabelSide,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_and_column_of_index() {
        assert_eq!((row_of(0), column_of(0)), (0, 0));
        assert_eq!((row_of(6), column_of(6)), (0, 6));
        assert_eq!((row_of(7), column_of(7)), (1, 0));
        assert_eq!((row_of(41), column_of(41)), (5, 6));
    }

    #[test]
    fn test_segment_indices() {
        let segment = CapsuleSegment {
            row: 2,
            start_column: 1,
            end_column: 4,
            rounded_start: true,
            rounded_end: false,
            run_start: 15,
        };
        assert_eq!(segment.start_index(), 15);
        assert_eq!(segment.end_index(), 18);
    }
}
