//! Pointer interaction state machine for the month grid.
//!
//! The view translates raw egui pointer input into [`PointerGesture`]s; this
//! module decides what they mean. Only one mode is active at a time, and the
//! event dialog lives inside [`InteractionMode::Editing`] so it can never be
//! open while a drag is in progress.

use chrono::NaiveDate;
use std::mem;
use std::time::{Duration, Instant};

use super::drag::{DragSelection, LongPress, RepositionDrag};
use super::event_dialog::EventDialogState;
use crate::models::event::EventId;
use crate::models::grid::MonthGrid;

/// Grid cell under the pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridHit {
    pub index: usize,
    pub date: NaiveDate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerGesture {
    /// Pointer went down on a day cell with no capsule under it
    DayPressed(GridHit),
    /// Pointer went down on a capsule of `event_id`
    CapsulePressed {
        event_id: EventId,
        run_start: usize,
        hit: GridHit,
    },
    Moved(GridHit),
    /// Pointer released, over a cell or outside the grid
    Released(Option<GridHit>),
    /// Pointer left the surface, Escape, or month navigation
    Cancelled,
}

/// Result of a finished gesture for the app to apply
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionOutcome {
    RangeCommitted(Vec<NaiveDate>),
    EditRequested(EventId),
    Repositioned {
        event_id: EventId,
        dates: Vec<NaiveDate>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    RangeSelecting(DragSelection),
    PressingEvent(LongPress),
    EventDragging(RepositionDrag),
    Editing(EventDialogState),
}

#[derive(Debug)]
pub struct Interaction {
    mode: InteractionMode,
    long_press: Duration,
}

impl Interaction {
    pub fn new(long_press: Duration) -> Self {
        Self {
            mode: InteractionMode::Idle,
            long_press,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.mode, InteractionMode::Idle)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, InteractionMode::Editing(_))
    }

    /// Feed one gesture through the state machine.
    pub fn handle(
        &mut self,
        gesture: PointerGesture,
        grid: &MonthGrid,
        now: Instant,
    ) -> Option<InteractionOutcome> {
        // A press held past the threshold is a drag even if no frame ticked
        // in between.
        self.tick(now);

        match (mem::take(&mut self.mode), gesture) {
            (InteractionMode::Idle, PointerGesture::DayPressed(hit)) => {
                self.mode = InteractionMode::RangeSelecting(DragSelection::begin(hit.date));
                None
            }
            (
                InteractionMode::Idle,
                PointerGesture::CapsulePressed {
                    event_id,
                    run_start,
                    hit,
                },
            ) => {
                self.mode = InteractionMode::PressingEvent(LongPress::begin(
                    event_id,
                    run_start,
                    hit.index,
                    now,
                    self.long_press,
                ));
                None
            }

            (InteractionMode::RangeSelecting(mut selection), PointerGesture::Moved(hit)) => {
                selection.update_hover(hit.date);
                self.mode = InteractionMode::RangeSelecting(selection);
                None
            }
            (InteractionMode::RangeSelecting(mut selection), PointerGesture::Released(hit)) => {
                if let Some(hit) = hit {
                    selection.update_hover(hit.date);
                }
                Some(InteractionOutcome::RangeCommitted(selection.range()))
            }

            // A press has to hold still on its cell to become a drag
            (InteractionMode::PressingEvent(press), PointerGesture::Moved(hit)) => {
                if hit.index == press.pressed_index {
                    self.mode = InteractionMode::PressingEvent(press);
                } else {
                    log::debug!("Press on {} slid off, abandoned", press.event_id);
                }
                None
            }
            (InteractionMode::PressingEvent(press), PointerGesture::Released(_)) => {
                Some(InteractionOutcome::EditRequested(press.event_id))
            }

            (InteractionMode::EventDragging(mut drag), PointerGesture::Moved(hit)) => {
                drag.update_hover(hit.index);
                self.mode = InteractionMode::EventDragging(drag);
                None
            }
            (InteractionMode::EventDragging(mut drag), PointerGesture::Released(hit)) => {
                if let Some(hit) = hit {
                    drag.update_hover(hit.index);
                }
                drag.range(grid).map(|dates| InteractionOutcome::Repositioned {
                    event_id: drag.event_id(),
                    dates,
                })
            }

            (InteractionMode::Editing(dialog), _) => {
                self.mode = InteractionMode::Editing(dialog);
                None
            }
            (_, PointerGesture::Cancelled) => None,
            (mode, _) => {
                self.mode = mode;
                None
            }
        }
    }

    /// Promote a pending long press once its threshold has passed. Returns
    /// true when the mode changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.mode {
            InteractionMode::PressingEvent(press) if press.is_due(now) => {
                let drag = press.into_drag();
                log::debug!("Long press on {} started a drag", drag.event_id());
                self.mode = InteractionMode::EventDragging(drag);
                true
            }
            _ => false,
        }
    }

    /// Time until a pending long press fires
    pub fn long_press_remaining(&self, now: Instant) -> Option<Duration> {
        match &self.mode {
            InteractionMode::PressingEvent(press) => Some(press.remaining(now)),
            _ => None,
        }
    }

    /// Dates to highlight: the live selection, or the range waiting in the
    /// add dialog.
    pub fn preview_dates(&self) -> Vec<NaiveDate> {
        match &self.mode {
            InteractionMode::RangeSelecting(selection) => selection.range(),
            InteractionMode::Editing(dialog) => dialog.pending_dates().to_vec(),
            _ => Vec::new(),
        }
    }

    /// Event being dragged and where it would land
    pub fn drag_preview(&self, grid: &MonthGrid) -> Option<(EventId, Vec<NaiveDate>)> {
        match &self.mode {
            InteractionMode::EventDragging(drag) => {
                drag.range(grid).map(|dates| (drag.event_id(), dates))
            }
            _ => None,
        }
    }

    /// Open the dialog, dropping whatever gesture was in progress
    pub fn open_dialog(&mut self, dialog: EventDialogState) {
        self.mode = InteractionMode::Editing(dialog);
    }

    pub fn close_dialog(&mut self) {
        if self.is_editing() {
            self.mode = InteractionMode::Idle;
        }
    }

    pub fn dialog_mut(&mut self) -> Option<&mut EventDialogState> {
        match &mut self.mode {
            InteractionMode::Editing(dialog) => Some(dialog),
            _ => None,
        }
    }

    /// Abandon an in-progress gesture. An open dialog is left alone.
    /// Returns true when something was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.mode {
            InteractionMode::Idle | InteractionMode::Editing(_) => false,
            _ => {
                self.mode = InteractionMode::Idle;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventColor;
    use crate::services::layout::build_month_grid;
    use pretty_assertions::assert_eq;

    const LONG_PRESS: Duration = Duration::from_millis(500);

    // June 2025 with a Sunday start: index n is June n + 1
    fn grid() -> MonthGrid {
        build_month_grid(day(1), 0)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn hit(d: u32) -> GridHit {
        GridHit {
            index: d as usize - 1,
            date: day(d),
        }
    }

    fn capsule_press(event_id: EventId, run_start: u32, at: u32) -> PointerGesture {
        PointerGesture::CapsulePressed {
            event_id,
            run_start: run_start as usize - 1,
            hit: hit(at),
        }
    }

    #[test]
    fn test_range_selection_commits_last_hover() {
        let grid = grid();
        let now = Instant::now();
        let mut interaction = Interaction::new(LONG_PRESS);

        assert_eq!(interaction.handle(PointerGesture::DayPressed(hit(12)), &grid, now), None);
        interaction.handle(PointerGesture::Moved(hit(14)), &grid, now);
        interaction.handle(PointerGesture::Moved(hit(10)), &grid, now);
        assert_eq!(interaction.preview_dates(), vec![day(10), day(11), day(12)]);

        let outcome = interaction.handle(PointerGesture::Released(None), &grid, now);

        assert_eq!(
            outcome,
            Some(InteractionOutcome::RangeCommitted(vec![day(10), day(11), day(12)]))
        );
        assert!(interaction.is_idle());
    }

    #[test]
    fn test_single_click_selects_one_day() {
        let grid = grid();
        let now = Instant::now();
        let mut interaction = Interaction::new(LONG_PRESS);

        interaction.handle(PointerGesture::DayPressed(hit(3)), &grid, now);
        let outcome = interaction.handle(PointerGesture::Released(Some(hit(3))), &grid, now);

        assert_eq!(outcome, Some(InteractionOutcome::RangeCommitted(vec![day(3)])));
    }

    #[test]
    fn test_cancel_discards_selection() {
        let grid = grid();
        let now = Instant::now();
        let mut interaction = Interaction::new(LONG_PRESS);

        interaction.handle(PointerGesture::DayPressed(hit(3)), &grid, now);
        interaction.handle(PointerGesture::Cancelled, &grid, now);

        assert!(interaction.is_idle());
        assert_eq!(interaction.handle(PointerGesture::Released(None), &grid, now), None);
    }

    #[test]
    fn test_short_press_requests_edit() {
        let grid = grid();
        let start = Instant::now();
        let id = EventId::generate();
        let mut interaction = Interaction::new(LONG_PRESS);

        interaction.handle(capsule_press(id, 8, 9), &grid, start);
        interaction.handle(PointerGesture::Moved(hit(9)), &grid, start);
        let outcome = interaction.handle(
            PointerGesture::Released(Some(hit(9))),
            &grid,
            start + Duration::from_millis(200),
        );

        assert_eq!(outcome, Some(InteractionOutcome::EditRequested(id)));
        assert!(interaction.is_idle());
    }

    #[test]
    fn test_press_sliding_off_capsule_is_abandoned() {
        let grid = grid();
        let start = Instant::now();
        let mut interaction = Interaction::new(LONG_PRESS);

        interaction.handle(capsule_press(EventId::generate(), 8, 9), &grid, start);
        interaction.handle(
            PointerGesture::Moved(hit(30)),
            &grid,
            start + Duration::from_millis(100),
        );
        assert!(interaction.is_idle());
        assert_eq!(interaction.long_press_remaining(start), None);

        let outcome = interaction.handle(
            PointerGesture::Released(Some(hit(30))),
            &grid,
            start + Duration::from_millis(900),
        );

        assert_eq!(outcome, None);
        assert_eq!(interaction.drag_preview(&grid), None);
        assert!(interaction.is_idle());
    }

    #[test]
    fn test_long_press_drag_repositions_from_run_start() {
        let grid = grid();
        let start = Instant::now();
        let id = EventId::generate();
        let mut interaction = Interaction::new(LONG_PRESS);

        interaction.handle(capsule_press(id, 8, 9), &grid, start);
        assert_eq!(
            interaction.long_press_remaining(start + Duration::from_millis(100)),
            Some(Duration::from_millis(400))
        );
        assert!(!interaction.tick(start + Duration::from_millis(499)));
        assert!(interaction.tick(start + LONG_PRESS));

        let later = start + Duration::from_secs(1);
        interaction.handle(PointerGesture::Moved(hit(12)), &grid, later);
        assert_eq!(
            interaction.drag_preview(&grid),
            Some((id, vec![day(8), day(9), day(10), day(11), day(12)]))
        );

        let outcome = interaction.handle(PointerGesture::Released(Some(hit(5))), &grid, later);

        assert_eq!(
            outcome,
            Some(InteractionOutcome::Repositioned {
                event_id: id,
                dates: vec![day(5), day(6), day(7), day(8)],
            })
        );
        assert!(interaction.is_idle());
    }

    #[test]
    fn test_release_after_threshold_without_tick_is_a_drop() {
        let grid = grid();
        let start = Instant::now();
        let id = EventId::generate();
        let mut interaction = Interaction::new(LONG_PRESS);

        interaction.handle(capsule_press(id, 8, 8), &grid, start);
        let outcome = interaction.handle(
            PointerGesture::Released(Some(hit(9))),
            &grid,
            start + Duration::from_millis(800),
        );

        assert_eq!(
            outcome,
            Some(InteractionOutcome::Repositioned {
                event_id: id,
                dates: vec![day(8), day(9)],
            })
        );
    }

    #[test]
    fn test_cancelled_drag_leaves_no_outcome() {
        let grid = grid();
        let start = Instant::now();
        let mut interaction = Interaction::new(LONG_PRESS);

        interaction.handle(capsule_press(EventId::generate(), 8, 8), &grid, start);
        interaction.tick(start + LONG_PRESS);
        assert!(interaction.cancel());

        assert!(interaction.is_idle());
        assert_eq!(interaction.drag_preview(&grid), None);
    }

    #[test]
    fn test_dialog_blocks_gestures_and_survives_cancel() {
        let grid = grid();
        let now = Instant::now();
        let mut interaction = Interaction::new(LONG_PRESS);
        interaction.open_dialog(EventDialogState::new_event(vec![day(2)], EventColor::Blue));

        interaction.handle(PointerGesture::DayPressed(hit(5)), &grid, now);
        interaction.handle(PointerGesture::Cancelled, &grid, now);
        assert!(!interaction.cancel());

        assert!(interaction.is_editing());
        assert_eq!(interaction.preview_dates(), vec![day(2)]);
        if let Some(dialog) = interaction.dialog_mut() {
            dialog.label = "Trip".to_string();
        }
        interaction.close_dialog();
        assert!(interaction.is_idle());
    }
}
