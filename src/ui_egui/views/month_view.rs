use chrono::{Datelike, NaiveDate};
use egui::epaint::QuadraticBezierShape;
use egui::{Align2, Color32, FontId, Pos2, Rect, Rounding, Sense, Stroke, Vec2};
use std::collections::{BTreeSet, HashMap};

use super::grid_geometry::GridGeometry;
use super::palette::{blend, CapsulePalette, MonthGridPalette};
use crate::models::event::{CalendarEvent, EventId};
use crate::models::grid::{EventLayout, LabelSide, MonthGrid, GRID_ROWS};
use crate::services::event::EventStore;
use crate::services::layout::{assign_lanes, label_anchor, segment_dates};
use crate::ui_egui::interaction::{GridHit, PointerGesture};
use crate::ui_egui::theme::CalendarTheme;

/// Space on each side of the grid for event label pills
const LABEL_GUTTER: f32 = 120.0;
const HEADER_HEIGHT: f32 = 28.0;
const CELL_HEIGHT: f32 = 44.0;
const MIN_CELL_WIDTH: f32 = 32.0;
const LABEL_HEIGHT: f32 = 20.0;
/// Gap between a label pill and the grid edge
const LABEL_GAP: f32 = 10.0;
const PULSE_HZ: f64 = 1.5;

/// Everything the month view draws from
pub struct MonthViewInput<'a> {
    pub grid: &'a MonthGrid,
    pub store: &'a EventStore,
    pub today: NaiveDate,
    /// Live selection or pending add range
    pub highlighted_dates: &'a [NaiveDate],
    /// Event being dragged and where it would land
    pub drag_preview: Option<(EventId, &'a [NaiveDate])>,
    /// Legend entry under the pointer
    pub pulsing_event: Option<EventId>,
    pub show_tooltips: bool,
}

/// What happened in the month view this frame
#[derive(Default)]
pub struct MonthViewResponse {
    pub gestures: Vec<PointerGesture>,
    /// Event whose side label was clicked
    pub label_clicked: Option<EventId>,
}

/// Capsule piece hit area, in draw order
struct CapsuleHit {
    rect: Rect,
    event_id: EventId,
    run_start: usize,
}

pub struct MonthView;

impl MonthView {
    pub fn show(
        ui: &mut egui::Ui,
        input: &MonthViewInput<'_>,
        theme: &CalendarTheme,
    ) -> MonthViewResponse {
        let mut response = MonthViewResponse::default();
        let palette = MonthGridPalette::from_theme(theme);

        let grid_width = (ui.available_width() - 2.0 * LABEL_GUTTER).max(7.0 * MIN_CELL_WIDTH);
        let total = Vec2::new(
            grid_width + 2.0 * LABEL_GUTTER,
            HEADER_HEIGHT + GRID_ROWS as f32 * CELL_HEIGHT,
        );
        let (outer, _) = ui.allocate_exact_size(total, Sense::hover());
        let header_rect = Rect::from_min_size(
            outer.min + Vec2::new(LABEL_GUTTER, 0.0),
            Vec2::new(grid_width, HEADER_HEIGHT),
        );
        let geometry = GridGeometry::new(Rect::from_min_size(
            header_rect.left_bottom(),
            Vec2::new(grid_width, GRID_ROWS as f32 * CELL_HEIGHT),
        ));

        Self::render_weekday_header(ui, header_rect, input.grid.first_day_of_week(), palette);
        Self::render_selection(ui, &geometry, input, palette);

        let events: Vec<&CalendarEvent> = input.store.iter().collect();
        let layouts = Self::compute_layouts(input, &events);
        let hits = Self::render_capsules(ui, &geometry, input, &events, &layouts, theme);

        Self::render_day_numbers(ui, &geometry, input, palette);
        response.label_clicked = Self::render_side_labels(ui, &geometry, input.grid, &events, theme);

        if input.show_tooltips {
            Self::render_tooltips(ui, &geometry, input);
        }

        response.gestures = Self::pointer_gestures(ui, &geometry, outer, input.grid, &hits);
        response
    }

    fn get_day_initials(first_day_of_week: u8) -> Vec<&'static str> {
        let all_days = ["S", "M", "T", "W", "T", "F", "S"];
        (0..7)
            .map(|i| all_days[(first_day_of_week as usize + i) % 7])
            .collect()
    }

    fn render_weekday_header(
        ui: &egui::Ui,
        rect: Rect,
        first_day_of_week: u8,
        palette: MonthGridPalette,
    ) {
        let col_width = rect.width() / 7.0;
        for (idx, initial) in Self::get_day_initials(first_day_of_week).iter().enumerate() {
            let center = Pos2::new(rect.left() + (idx as f32 + 0.5) * col_width, rect.center().y);
            ui.painter().text(
                center,
                Align2::CENTER_CENTER,
                *initial,
                FontId::proportional(14.0),
                palette.header_text,
            );
        }
    }

    fn render_selection(
        ui: &egui::Ui,
        geometry: &GridGeometry,
        input: &MonthViewInput<'_>,
        palette: MonthGridPalette,
    ) {
        for date in input.highlighted_dates {
            if let Some(index) = input.grid.index_of(*date) {
                ui.painter()
                    .rect_filled(geometry.cell_rect(index).shrink(1.0), 4.0, palette.selection_bg);
            }
        }
    }

    /// Segments per event, with the dragged event moved to its preview dates
    fn compute_layouts(input: &MonthViewInput<'_>, events: &[&CalendarEvent]) -> Vec<EventLayout> {
        events
            .iter()
            .map(|event| {
                let segments = match input.drag_preview {
                    Some((dragged, dates)) if dragged == event.id => {
                        let preview: BTreeSet<NaiveDate> = dates.iter().copied().collect();
                        segment_dates(input.grid, &preview)
                    }
                    _ => segment_dates(input.grid, &event.dates),
                };
                EventLayout {
                    event_id: event.id,
                    segments,
                }
            })
            .collect()
    }

    fn render_capsules(
        ui: &egui::Ui,
        geometry: &GridGeometry,
        input: &MonthViewInput<'_>,
        events: &[&CalendarEvent],
        layouts: &[EventLayout],
        theme: &CalendarTheme,
    ) -> Vec<CapsuleHit> {
        let lanes = assign_lanes(layouts);
        let mut hits = Vec::new();

        let pulse = if input.pulsing_event.is_some() {
            ui.ctx().request_repaint();
            let t = ui.input(|i| i.time);
            (0.5 + 0.5 * (t * PULSE_HZ * std::f64::consts::TAU).sin()) as f32
        } else {
            0.0
        };

        for (layout_idx, (event, layout)) in events.iter().zip(layouts).enumerate() {
            let colors = CapsulePalette::for_event(theme, event.color);
            let dragging = matches!(input.drag_preview, Some((id, _)) if id == event.id);
            let pulsing = input.pulsing_event == Some(event.id);

            for (segment_idx, segment) in layout.segments.iter().enumerate() {
                let rect = geometry.capsule_rect(
                    segment,
                    lanes.lane(layout_idx, segment_idx),
                    lanes.row_lane_counts[segment.row],
                );
                let radius = rect.height() / 2.0;
                let rounding = Rounding {
                    nw: if segment.rounded_start { radius } else { 0.0 },
                    sw: if segment.rounded_start { radius } else { 0.0 },
                    ne: if segment.rounded_end { radius } else { 0.0 },
                    se: if segment.rounded_end { radius } else { 0.0 },
                };

                let fill = if dragging {
                    colors.ghost_fill
                } else if pulsing {
                    blend(colors.fill, colors.pulse_fill, pulse)
                } else {
                    colors.fill
                };
                ui.painter().rect_filled(rect, rounding, fill);
                if dragging {
                    ui.painter()
                        .rect_stroke(rect, rounding, Stroke::new(1.5, colors.accent));
                }

                hits.push(CapsuleHit {
                    rect,
                    event_id: event.id,
                    run_start: segment.run_start,
                });
            }
        }

        hits
    }

    fn render_day_numbers(
        ui: &egui::Ui,
        geometry: &GridGeometry,
        input: &MonthViewInput<'_>,
        palette: MonthGridPalette,
    ) {
        for (index, cell) in input.grid.cells().iter().enumerate() {
            let center = geometry.cell_rect(index).center();
            let color = if cell.is_current_month {
                palette.day_text
            } else {
                palette.outside_day_text
            };
            if cell.date == input.today {
                ui.painter()
                    .circle_stroke(center, 12.0, Stroke::new(1.5, palette.today_ring));
            }
            ui.painter().text(
                center,
                Align2::CENTER_CENTER,
                cell.date.day().to_string(),
                FontId::proportional(14.0),
                color,
            );
        }
    }

    /// Label pills beside the grid with a curved leader line to the event's
    /// first cell. Returns the event whose pill was clicked.
    fn render_side_labels(
        ui: &egui::Ui,
        geometry: &GridGeometry,
        grid: &MonthGrid,
        events: &[&CalendarEvent],
        theme: &CalendarTheme,
    ) -> Option<EventId> {
        let mut clicked = None;
        let mut stacked: HashMap<(usize, bool), usize> = HashMap::new();
        let font = FontId::proportional(12.0);
        let grid_rect = geometry.rect();

        for event in events {
            let Some(anchor) = label_anchor(grid, event) else {
                continue;
            };
            let colors = CapsulePalette::for_event(theme, event.color);
            let is_left = anchor.side == LabelSide::Left;

            let slot = stacked.entry((anchor.row, is_left)).or_insert(0);
            let center_y = geometry.cell_center(anchor.row, 0).y + *slot as f32 * (LABEL_HEIGHT + 2.0);
            *slot += 1;

            let max_text = LABEL_GUTTER - LABEL_GAP - 12.0;
            let text = Self::truncate_to_width(ui, &event.label, &font, max_text);
            let galley = ui
                .painter()
                .layout_no_wrap(text, font.clone(), colors.text);
            let pill_size = Vec2::new(galley.size().x + 12.0, LABEL_HEIGHT);
            let pill = if is_left {
                Rect::from_min_size(
                    Pos2::new(grid_rect.left() - LABEL_GAP - pill_size.x, center_y - pill_size.y / 2.0),
                    pill_size,
                )
            } else {
                Rect::from_min_size(
                    Pos2::new(grid_rect.right() + LABEL_GAP, center_y - pill_size.y / 2.0),
                    pill_size,
                )
            };

            let start = if is_left {
                pill.right_center()
            } else {
                pill.left_center()
            };
            let end = geometry.cell_center(anchor.row, anchor.column);
            let control = Pos2::new((start.x + end.x) / 2.0, start.y);
            ui.painter().add(QuadraticBezierShape::from_points_stroke(
                [start, control, end],
                false,
                Color32::TRANSPARENT,
                Stroke::new(1.0, colors.accent),
            ));

            let label_response = ui
                .interact(pill, ui.id().with(("event_label", event.id)), Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand);
            ui.painter()
                .rect_filled(pill, Rounding::same(pill.height() / 2.0), colors.fill);
            ui.painter().galley(
                pill.center() - galley.size() / 2.0,
                galley,
                colors.text,
            );

            if label_response.clicked() {
                clicked = Some(event.id);
            }
        }

        clicked
    }

    fn render_tooltips(ui: &egui::Ui, geometry: &GridGeometry, input: &MonthViewInput<'_>) {
        for (index, cell) in input.grid.cells().iter().enumerate() {
            let events = input.store.events_on(cell.date);
            if events.is_empty() {
                continue;
            }
            ui.interact(
                geometry.cell_rect(index),
                ui.id().with(("day_cell", index)),
                Sense::hover(),
            )
            .on_hover_ui(|ui| {
                ui.label(egui::RichText::new(cell.date.format("%A, %B %-d").to_string()).strong());
                for event in events {
                    ui.label(format!("• {}", event.label));
                }
            });
        }
    }

    /// Translate raw pointer input over the grid into gestures.
    fn pointer_gestures(
        ui: &egui::Ui,
        geometry: &GridGeometry,
        surface: Rect,
        grid: &MonthGrid,
        capsules: &[CapsuleHit],
    ) -> Vec<PointerGesture> {
        let mut gestures = Vec::new();
        let (pos, pressed, down, released) = ui.input(|i| {
            (
                i.pointer.interact_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
            )
        });

        let hit_at = |pos: Pos2| {
            geometry.hit_index(pos).and_then(|index| {
                grid.date_at(index).map(|date| GridHit { index, date })
            })
        };
        let hit = pos.and_then(hit_at);

        if pressed && ui.rect_contains_pointer(geometry.rect()) {
            if let (Some(pos), Some(hit)) = (pos, hit) {
                let capsule = capsules.iter().rev().find(|capsule| capsule.rect.contains(pos));
                gestures.push(match capsule {
                    Some(capsule) => PointerGesture::CapsulePressed {
                        event_id: capsule.event_id,
                        run_start: capsule.run_start,
                        hit,
                    },
                    None => PointerGesture::DayPressed(hit),
                });
            }
        } else if down {
            match pos {
                Some(pos) if surface.contains(pos) => {
                    if let Some(hit) = hit {
                        gestures.push(PointerGesture::Moved(hit));
                    }
                }
                _ => gestures.push(PointerGesture::Cancelled),
            }
        }

        if released {
            gestures.push(PointerGesture::Released(hit));
        }

        if let Some(pos) = pos {
            if capsules.iter().any(|capsule| capsule.rect.contains(pos))
                && ui.rect_contains_pointer(geometry.rect())
            {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
            }
        }

        gestures
    }

    /// Truncate text to fit within a given pixel width, appending "…".
    fn truncate_to_width(ui: &egui::Ui, text: &str, font_id: &FontId, max_width: f32) -> String {
        let measure = |candidate: &str| {
            ui.painter()
                .layout_no_wrap(candidate.to_string(), font_id.clone(), Color32::WHITE)
                .size()
                .x
        };
        if measure(text) <= max_width {
            return text.to_string();
        }

        let mut chars: Vec<char> = text.chars().collect();
        while !chars.is_empty() {
            chars.pop();
            let candidate: String = chars.iter().collect::<String>() + "…";
            if measure(&candidate) <= max_width {
                return candidate;
            }
        }
        "…".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_initials_follow_week_start() {
        assert_eq!(
            MonthView::get_day_initials(0),
            vec!["S", "M", "T", "W", "T", "F", "S"]
        );
        assert_eq!(
            MonthView::get_day_initials(1),
            vec!["M", "T", "W", "T", "F", "S", "S"]
        );
    }
}
