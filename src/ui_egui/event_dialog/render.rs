use egui::{Color32, RichText};

use crate::models::event::EventColor;
use crate::ui_egui::theme::CalendarTheme;

use super::state::{DialogCommand, EventDialogState};

const FORM_LABEL_WIDTH: f32 = 60.0;
const SWATCH_RADIUS: f32 = 7.0;

/// Draw the add/edit dialog. Returns the command the user triggered this
/// frame, if any. Closing the window counts as `Cancel`.
pub fn render_event_dialog(
    ctx: &egui::Context,
    state: &mut EventDialogState,
    theme: &CalendarTheme,
) -> Option<DialogCommand> {
    let mut command = None;
    let mut dialog_open = true;

    egui::Window::new(state.title())
        .id(egui::Id::new("event_dialog"))
        .open(&mut dialog_open)
        .collapsible(false)
        .resizable(false)
        .default_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            if render_label_row(ui, state) {
                command = Some(DialogCommand::Submit);
            }
            ui.add_space(8.0);
            render_color_row(ui, state, theme);
            ui.add_space(12.0);
            ui.separator();
            if let Some(clicked) = render_action_buttons(ui, state) {
                command = Some(clicked);
            }
        });

    if !dialog_open || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        command = Some(DialogCommand::Cancel);
    }

    command
}

/// Returns true when Enter was pressed in the label field
fn render_label_row(ui: &mut egui::Ui, state: &mut EventDialogState) -> bool {
    let mut submitted = false;
    labeled_row(ui, "Label", |ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.label)
                .desired_width(f32::INFINITY)
                .hint_text("What's happening?"),
        );
        if state.is_new() && !response.has_focus() && state.label.is_empty() {
            response.request_focus();
        }
        submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    });
    submitted
}

fn render_color_row(ui: &mut egui::Ui, state: &mut EventDialogState, theme: &CalendarTheme) {
    labeled_row(ui, "Color", |ui| {
        ui.horizontal_wrapped(|ui| {
            for color in EventColor::ALL {
                color_swatch(ui, theme, color, state.color == color);
                ui.radio_value(&mut state.color, color, color.label());
            }
        });
    });
}

fn color_swatch(ui: &mut egui::Ui, theme: &CalendarTheme, color: EventColor, selected: bool) {
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(SWATCH_RADIUS * 2.0, SWATCH_RADIUS * 2.0),
        egui::Sense::hover(),
    );
    let border = if selected {
        egui::Stroke::new(2.0, theme.text_primary)
    } else {
        egui::Stroke::new(1.0, theme.event_accent(color))
    };
    ui.painter()
        .circle(rect.center(), SWATCH_RADIUS, theme.event_fill(color), border);
}

fn render_action_buttons(ui: &mut egui::Ui, state: &EventDialogState) -> Option<DialogCommand> {
    let mut command = None;

    ui.horizontal(|ui| {
        let submit_label = if state.is_new() {
            "Add Event"
        } else {
            "Save Changes"
        };
        if ui.button(RichText::new(submit_label).strong()).clicked() {
            command = Some(DialogCommand::Submit);
        }

        if !state.is_new() {
            ui.add_space(12.0);
            if ui
                .button(RichText::new("Remove Event").color(Color32::from_rgb(220, 38, 38)))
                .clicked()
            {
                command = Some(DialogCommand::Remove);
            }
        }
    });

    command
}

fn labeled_row<F>(ui: &mut egui::Ui, label: impl Into<egui::WidgetText>, add_contents: F)
where
    F: FnOnce(&mut egui::Ui),
{
    ui.horizontal(|ui| {
        let text = label.into();
        ui.allocate_ui_with_layout(
            egui::Vec2::new(FORM_LABEL_WIDTH, 24.0),
            egui::Layout::right_to_left(egui::Align::Center),
            move |ui| {
                ui.label(text);
            },
        );
        add_contents(ui);
    });
}
