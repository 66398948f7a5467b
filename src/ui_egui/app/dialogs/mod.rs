use super::CalendarApp;
use crate::models::event::{EventError, EventId};
use crate::ui_egui::event_dialog::{
    render_event_dialog, DialogCommand, DialogOutcome, EventDialogState,
};
use crate::ui_egui::interaction::InteractionOutcome;

impl CalendarApp {
    /// Apply a finished grid gesture
    pub(super) fn apply_outcome(&mut self, outcome: InteractionOutcome) {
        match outcome {
            InteractionOutcome::RangeCommitted(dates) => {
                log::debug!("Selected {} day(s), opening add dialog", dates.len());
                self.interaction
                    .open_dialog(EventDialogState::new_event(dates, self.settings.default_color));
            }
            InteractionOutcome::EditRequested(event_id) => self.open_edit_dialog(event_id),
            InteractionOutcome::Repositioned { event_id, dates } => {
                if let Err(e) = self.store.reposition(event_id, dates) {
                    log::error!("Failed to move event {}: {}", event_id, e);
                    self.toast_manager.error(format!("Failed to move event: {}", e));
                }
            }
        }
    }

    pub(super) fn open_edit_dialog(&mut self, event_id: EventId) {
        match self.store.get(event_id) {
            Some(event) => self
                .interaction
                .open_dialog(EventDialogState::from_event(event)),
            None => log::warn!("Edit requested for unknown event {}", event_id),
        }
    }

    pub(super) fn render_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.interaction.dialog_mut() else {
            return;
        };
        let Some(command) = render_event_dialog(ctx, dialog, &self.active_theme) else {
            return;
        };

        let done_message = match (command, dialog.is_new()) {
            (DialogCommand::Submit, true) => Some("Event added"),
            (DialogCommand::Submit, false) => Some("Event updated"),
            (DialogCommand::Remove, false) => Some("Event removed"),
            _ => None,
        };

        match dialog.execute(command, &mut self.store) {
            Ok(DialogOutcome::KeepOpen) => {}
            Ok(DialogOutcome::Close) => {
                self.interaction.close_dialog();
                if let Some(message) = done_message {
                    self.toast_manager.success(message);
                }
            }
            Err(e @ EventError::NotFound(_)) => {
                log::error!("Dialog action failed: {}", e);
                self.interaction.close_dialog();
                self.toast_manager.error("That event no longer exists");
            }
            Err(e) => {
                log::error!("Dialog action failed: {}", e);
                self.toast_manager.error(e.to_string());
            }
        }
    }
}
