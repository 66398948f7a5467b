use super::CalendarApp;

impl CalendarApp {
    pub(super) fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        // The dialog owns the keyboard while it is open
        if self.interaction.is_editing() || ctx.wants_keyboard_input() {
            return;
        }

        let (escape, left, right, today) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.modifiers.ctrl && i.key_pressed(egui::Key::T),
            )
        });

        if escape && self.interaction.cancel() {
            log::debug!("Escape cancelled an in-progress drag");
        }
        if left {
            self.navigate_previous();
        }
        if right {
            self.navigate_next();
        }
        if today {
            self.jump_to_today();
        }
    }
}
