use super::state::SnapshotRequest;
use super::CalendarApp;
use crate::ui_egui::views::{MonthView, MonthViewInput};
use chrono::Local;
use egui::{Margin, RichText, Sense, Stroke};
use std::time::Instant;

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

impl CalendarApp {
    pub(super) fn render_main_panel(&mut self, ctx: &egui::Context, now: Instant) {
        let panel_frame = egui::Frame::central_panel(&ctx.style())
            .outer_margin(Margin::ZERO)
            .inner_margin(Margin::same(16.0));

        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .drag_to_scroll(false)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.render_toolbar(ui);
                        ui.add_space(8.0);

                        // Everything inside this frame ends up in the snapshot
                        let card = egui::Frame::none()
                            .fill(self.active_theme.calendar_background)
                            .stroke(Stroke::new(1.0, self.active_theme.calendar_border))
                            .rounding(8.0)
                            .inner_margin(Margin::same(16.0))
                            .show(ui, |ui| {
                                self.render_month_header(ui);
                                ui.add_space(8.0);
                                self.render_grid(ui, now);
                                ui.add_space(12.0);
                                self.render_legend(ui);
                            });
                        self.state.calendar_rect = Some(card.response.rect);

                        ui.add_space(12.0);
                        self.render_snapshot_buttons(ui);
                    });
            });
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        let mut theme_changed = false;
        let mut week_start = self.settings.first_day_of_week;

        ui.horizontal(|ui| {
            let dark = self.active_theme.is_dark;
            ui.add_enabled_ui(!self.settings.use_system_theme, |ui| {
                let label = if dark { "☀ Light" } else { "🌙 Dark" };
                if ui.button(label).on_hover_text("Toggle theme").clicked() {
                    self.settings.theme = if dark { "light" } else { "dark" }.to_string();
                    theme_changed = true;
                }
            });
            if ui
                .checkbox(&mut self.settings.use_system_theme, "Follow system theme")
                .changed()
            {
                theme_changed = true;
            }

            ui.separator();
            ui.label("Week starts on");
            egui::ComboBox::from_id_source("week_start")
                .selected_text(WEEKDAY_NAMES[week_start as usize % 7])
                .show_ui(ui, |ui| {
                    for (idx, name) in WEEKDAY_NAMES.iter().enumerate() {
                        ui.selectable_value(&mut week_start, idx as u8, *name);
                    }
                });
        });

        if theme_changed {
            self.apply_theme(ui.ctx());
            self.save_settings();
        }
        if week_start != self.settings.first_day_of_week {
            self.set_first_day_of_week(week_start);
        }
    }

    fn render_month_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(
                RichText::new(self.current_month.format("%B %Y").to_string())
                    .size(24.0)
                    .strong(),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // Right-to-left: added in reverse of display order
                if ui.button("▶").on_hover_text("Next month (→ Arrow)").clicked() {
                    self.navigate_next();
                }
                if ui.button("◀").on_hover_text("Previous month (← Arrow)").clicked() {
                    self.navigate_previous();
                }
                if ui.button("Today").on_hover_text("Ctrl+T").clicked() {
                    self.jump_to_today();
                }
            });
        });
    }

    fn render_grid(&mut self, ui: &mut egui::Ui, now: Instant) {
        let highlighted = self.interaction.preview_dates();
        let drag_preview = self.interaction.drag_preview(&self.grid);
        let input = MonthViewInput {
            grid: &self.grid,
            store: &self.store,
            today: Local::now().date_naive(),
            highlighted_dates: &highlighted,
            drag_preview: drag_preview
                .as_ref()
                .map(|(event_id, dates)| (*event_id, dates.as_slice())),
            pulsing_event: self.state.hovered_legend,
            show_tooltips: self.interaction.is_idle(),
        };
        let response = MonthView::show(ui, &input, &self.active_theme);

        for gesture in response.gestures {
            if let Some(outcome) = self.interaction.handle(gesture, &self.grid, now) {
                self.apply_outcome(outcome);
            }
        }
        if let Some(event_id) = response.label_clicked {
            if self.interaction.is_idle() {
                self.open_edit_dialog(event_id);
            }
        }
    }

    fn render_legend(&mut self, ui: &mut egui::Ui) {
        ui.separator();
        ui.label(RichText::new("Legend").size(16.0).strong());
        ui.add_space(4.0);

        if self.store.is_empty() {
            ui.label(
                RichText::new("Drag across days to add an event")
                    .italics()
                    .color(self.active_theme.text_muted),
            );
        }

        let mut hovered = None;
        let mut clicked = None;
        ui.horizontal_wrapped(|ui| {
            for event in self.store.iter() {
                let enlarged = self.state.hovered_legend == Some(event.id);
                let response = ui
                    .horizontal(|ui| {
                        let (rect, _) = ui.allocate_exact_size(egui::vec2(16.0, 16.0), Sense::hover());
                        ui.painter().circle_filled(
                            rect.center(),
                            if enlarged { 8.0 } else { 7.0 },
                            self.active_theme.event_fill(event.color),
                        );
                        ui.label(RichText::new(&event.label).size(if enlarged { 15.0 } else { 13.0 }));
                    })
                    .response
                    .interact(Sense::click())
                    .on_hover_cursor(egui::CursorIcon::PointingHand);

                if response.hovered() {
                    hovered = Some(event.id);
                }
                if response.clicked() {
                    clicked = Some(event.id);
                }
                ui.add_space(8.0);
            }
        });

        if hovered != self.state.hovered_legend {
            ui.ctx().request_repaint();
        }
        self.state.hovered_legend = hovered;

        if let Some(event_id) = clicked {
            if self.interaction.is_idle() {
                self.open_edit_dialog(event_id);
            }
        }
    }

    fn render_snapshot_buttons(&mut self, ui: &mut egui::Ui) {
        let busy = self.state.pending_snapshot.is_some();
        let mut request = None;

        ui.columns(2, |columns| {
            let size = egui::vec2(columns[0].available_width(), 44.0);
            let download = egui::Button::new(RichText::new("⬇ Download").size(18.0)).min_size(size);
            if columns[0].add_enabled(!busy, download).clicked() {
                request = Some(SnapshotRequest::Download);
            }
            let share = egui::Button::new(RichText::new("Share on Twitter").size(18.0)).min_size(size);
            if columns[1].add_enabled(!busy, share).clicked() {
                request = Some(SnapshotRequest::Share);
            }
        });

        if let Some(request) = request {
            let ctx = ui.ctx().clone();
            self.request_snapshot(&ctx, request);
        }
    }
}
