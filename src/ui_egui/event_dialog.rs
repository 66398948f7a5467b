//! Add/edit event dialog: editable state plus the egui window drawing it.

mod render;
mod state;

pub use render::render_event_dialog;
pub use state::{DialogCommand, DialogOutcome, DialogTarget, EventDialogState};
