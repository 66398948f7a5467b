use chrono::NaiveDate;

use crate::models::event::{CalendarEvent, EventColor, EventError, EventId};
use crate::services::event::EventStore;

/// What the dialog is working on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogTarget {
    /// New event over a committed selection
    Create { dates: Vec<NaiveDate> },
    Edit { event_id: EventId },
}

/// Button or key the user triggered in the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogCommand {
    Submit,
    Remove,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    KeepOpen,
    Close,
}

/// State for the add/edit event dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDialogState {
    pub target: DialogTarget,
    pub label: String,
    pub color: EventColor,
}

impl EventDialogState {
    /// Create a new event dialog state for creating a new event
    pub fn new_event(dates: Vec<NaiveDate>, color: EventColor) -> Self {
        Self {
            target: DialogTarget::Create { dates },
            label: String::new(),
            color,
        }
    }

    /// Create a new event dialog state for editing an existing event
    pub fn from_event(event: &CalendarEvent) -> Self {
        Self {
            target: DialogTarget::Edit { event_id: event.id },
            label: event.label.clone(),
            color: event.color,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.target {
            DialogTarget::Create { .. } => "Add New Event",
            DialogTarget::Edit { .. } => "Edit Event",
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self.target, DialogTarget::Create { .. })
    }

    /// Dates highlighted behind the dialog while creating
    pub fn pending_dates(&self) -> &[NaiveDate] {
        match &self.target {
            DialogTarget::Create { dates } => dates,
            DialogTarget::Edit { .. } => &[],
        }
    }

    /// Apply `command` to `store`.
    ///
    /// Validation failures (empty label, no dates) are a silent no-op that
    /// keeps the dialog open. Only a vanished event is an error.
    pub fn execute(
        &self,
        command: DialogCommand,
        store: &mut EventStore,
    ) -> Result<DialogOutcome, EventError> {
        let result = match (command, &self.target) {
            (DialogCommand::Cancel, _) => return Ok(DialogOutcome::Close),
            (DialogCommand::Remove, DialogTarget::Create { .. }) => return Ok(DialogOutcome::Close),
            (DialogCommand::Remove, DialogTarget::Edit { event_id }) => {
                store.remove(*event_id).map(|_| ())
            }
            (DialogCommand::Submit, DialogTarget::Create { dates }) => store
                .add(self.label.trim(), dates.iter().copied(), self.color)
                .map(|_| ()),
            (DialogCommand::Submit, DialogTarget::Edit { event_id }) => {
                store.update(*event_id, self.label.trim(), self.color)
            }
        };

        match result {
            Ok(()) => Ok(DialogOutcome::Close),
            Err(err @ (EventError::EmptyLabel | EventError::NoDates)) => {
                log::debug!("{} rejected: {}", self.title(), err);
                Ok(DialogOutcome::KeepOpen)
            }
            Err(err) => Err(err),
        }
    }
}
