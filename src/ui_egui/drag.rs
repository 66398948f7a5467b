use chrono::NaiveDate;
use std::time::{Duration, Instant};

use crate::models::event::EventId;
use crate::models::grid::MonthGrid;
use crate::services::layout::normalize_range;

/// In-progress drag over day cells picking a date range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragSelection {
    anchor: NaiveDate,
    cursor: NaiveDate,
}

impl DragSelection {
    pub fn begin(anchor: NaiveDate) -> Self {
        Self {
            anchor,
            cursor: anchor,
        }
    }

    /// Move the cursor; returns whether it changed.
    pub fn update_hover(&mut self, date: NaiveDate) -> bool {
        let changed = self.cursor != date;
        self.cursor = date;
        changed
    }

    /// Anchor-to-cursor range, also used for the live preview.
    pub fn range(&self) -> Vec<NaiveDate> {
        normalize_range(self.anchor, self.cursor)
    }
}

/// Press on a capsule that has not been held long enough to drag yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LongPress {
    pub event_id: EventId,
    /// Grid index the drag will be anchored at (start of the pressed run)
    pub anchor_index: usize,
    /// Cell under the pointer when pressed; the drag's initial end
    pub pressed_index: usize,
    pressed_at: Instant,
    threshold: Duration,
}

impl LongPress {
    pub fn begin(
        event_id: EventId,
        anchor_index: usize,
        pressed_index: usize,
        now: Instant,
        threshold: Duration,
    ) -> Self {
        Self {
            event_id,
            anchor_index,
            pressed_index,
            pressed_at: now,
            threshold,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.pressed_at) >= self.threshold
    }

    /// Time left until the press turns into a drag
    pub fn remaining(&self, now: Instant) -> Duration {
        self.threshold
            .saturating_sub(now.saturating_duration_since(self.pressed_at))
    }

    pub fn into_drag(self) -> RepositionDrag {
        let mut drag = RepositionDrag::begin(self.event_id, self.anchor_index);
        drag.update_hover(self.pressed_index);
        drag
    }
}

/// Long-press drag moving an event to a new range of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepositionDrag {
    event_id: EventId,
    start_index: usize,
    end_index: usize,
}

impl RepositionDrag {
    pub fn begin(event_id: EventId, start_index: usize) -> Self {
        Self {
            event_id,
            start_index,
            end_index: start_index,
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn update_hover(&mut self, index: usize) {
        self.end_index = index;
    }

    /// Dates the event would cover if dropped now. `None` when either end is
    /// not on `grid`.
    pub fn range(&self, grid: &MonthGrid) -> Option<Vec<NaiveDate>> {
        let start = grid.date_at(self.start_index)?;
        let end = grid.date_at(self.end_index)?;
        Some(normalize_range(start, end))
    }
}
