//! In-memory event store.
//!
//! The store owns every `CalendarEvent` for the session. Events are kept in
//! creation order (legend and label order follow it) and addressed by their
//! generated `EventId`. `add`, `update`, `reposition` and `remove` are the only
//! ways to change them.

use chrono::NaiveDate;

use crate::models::event::{validate_label, CalendarEvent, EventColor, EventError, EventId};

#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an event and return its new identifier.
    pub fn add(
        &mut self,
        label: impl Into<String>,
        dates: impl IntoIterator<Item = NaiveDate>,
        color: EventColor,
    ) -> Result<EventId, EventError> {
        let event = CalendarEvent::new(label, dates, color)?;
        let id = event.id;
        log::info!(
            "Added event '{}' ({} day{})",
            event.label,
            event.dates.len(),
            if event.dates.len() == 1 { "" } else { "s" }
        );
        self.events.push(event);
        Ok(id)
    }

    pub fn get(&self, id: EventId) -> Option<&CalendarEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Change label and color of an existing event. Dates are untouched.
    pub fn update(
        &mut self,
        id: EventId,
        label: impl Into<String>,
        color: EventColor,
    ) -> Result<(), EventError> {
        let label = label.into();
        validate_label(&label)?;
        let event = self.get_mut(id)?;
        event.label = label;
        event.color = color;
        log::info!("Updated event {}", id);
        Ok(())
    }

    /// Replace the whole date set of an event.
    ///
    /// The previous dates are discarded, never merged with the new ones.
    pub fn reposition(
        &mut self,
        id: EventId,
        dates: impl IntoIterator<Item = NaiveDate>,
    ) -> Result<(), EventError> {
        let dates: std::collections::BTreeSet<_> = dates.into_iter().collect();
        if dates.is_empty() {
            return Err(EventError::NoDates);
        }
        let event = self.get_mut(id)?;
        log::info!(
            "Repositioned event '{}' to {:?}..={:?}",
            event.label,
            dates.first(),
            dates.last()
        );
        event.dates = dates;
        Ok(())
    }

    /// Remove exactly the event with `id` and hand it back.
    pub fn remove(&mut self, id: EventId) -> Result<CalendarEvent, EventError> {
        let position = self
            .events
            .iter()
            .position(|event| event.id == id)
            .ok_or(EventError::NotFound(id))?;
        let removed = self.events.remove(position);
        log::info!("Removed event '{}'", removed.label);
        Ok(removed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events covering `date`, in creation order
    pub fn events_on(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        self.events.iter().filter(|event| event.covers(date)).collect()
    }

    fn get_mut(&mut self, id: EventId) -> Result<&mut CalendarEvent, EventError> {
        self.events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or(EventError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::layout::normalize_range;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    #[test]
    fn test_add_event() {
        let mut store = EventStore::new();
        let id = store.add("Holiday", [day(1), day(2)], EventColor::Green).unwrap();

        let event = store.get(id).unwrap();
        assert_eq!(event.label, "Holiday");
        assert_eq!(event.dates.len(), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_with_empty_label_leaves_store_unchanged() {
        let mut store = EventStore::new();
        store.add("Existing", [day(1)], EventColor::Red).unwrap();

        let result = store.add("", [day(3)], EventColor::Blue);

        assert_eq!(result, Err(EventError::EmptyLabel));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_without_dates_is_rejected() {
        let mut store = EventStore::new();
        let result = store.add("Empty", Vec::new(), EventColor::Blue);
        assert_eq!(result, Err(EventError::NoDates));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_event() {
        let mut store = EventStore::new();
        let id = store.add("Draft", [day(4)], EventColor::Blue).unwrap();

        store.update(id, "Final", EventColor::Purple).unwrap();

        let event = store.get(id).unwrap();
        assert_eq!(event.label, "Final");
        assert_eq!(event.color, EventColor::Purple);
        assert_eq!(event.dates.iter().copied().collect::<Vec<_>>(), vec![day(4)]);
    }

    #[test]
    fn test_update_rejects_empty_label() {
        let mut store = EventStore::new();
        let id = store.add("Keep", [day(4)], EventColor::Blue).unwrap();

        assert_eq!(store.update(id, "  ", EventColor::Red), Err(EventError::EmptyLabel));
        assert_eq!(store.get(id).unwrap().label, "Keep");
        assert_eq!(store.get(id).unwrap().color, EventColor::Blue);
    }

    #[test]
    fn test_update_nonexistent_event() {
        let mut store = EventStore::new();
        let missing = EventId::generate();
        assert_eq!(
            store.update(missing, "Label", EventColor::Red),
            Err(EventError::NotFound(missing))
        );
    }

    #[test]
    fn test_remove_only_targets_matching_id() {
        let mut store = EventStore::new();
        let first = store.add("Twin", [day(5)], EventColor::Pink).unwrap();
        let second = store.add("Twin", [day(5)], EventColor::Pink).unwrap();
        let third = store.add("Twin", [day(5)], EventColor::Pink).unwrap();

        let removed = store.remove(second).unwrap();

        assert_eq!(removed.id, second);
        let remaining: Vec<_> = store.iter().map(|event| event.id).collect();
        assert_eq!(remaining, vec![first, third]);
    }

    #[test]
    fn test_remove_nonexistent_event() {
        let mut store = EventStore::new();
        store.add("Only", [day(5)], EventColor::Pink).unwrap();
        let missing = EventId::generate();

        assert_eq!(store.remove(missing), Err(EventError::NotFound(missing)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reposition_replaces_dates() {
        let mut store = EventStore::new();
        let id = store
            .add("Trip", normalize_range(day(1), day(3)), EventColor::Yellow)
            .unwrap();

        store.reposition(id, normalize_range(day(10), day(11))).unwrap();

        let dates: Vec<_> = store.get(id).unwrap().dates.iter().copied().collect();
        assert_eq!(dates, vec![day(10), day(11)]);
    }

    #[test]
    fn test_reposition_with_no_dates_keeps_previous() {
        let mut store = EventStore::new();
        let id = store.add("Trip", [day(1)], EventColor::Yellow).unwrap();

        assert_eq!(store.reposition(id, Vec::new()), Err(EventError::NoDates));
        assert!(store.get(id).unwrap().covers(day(1)));
    }

    #[test]
    fn test_events_on_date() {
        let mut store = EventStore::new();
        store.add("Long", normalize_range(day(1), day(10)), EventColor::Red).unwrap();
        store.add("Short", [day(3)], EventColor::Blue).unwrap();

        let labels: Vec<_> = store.events_on(day(3)).iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Long", "Short"]);
        assert_eq!(store.events_on(day(11)).len(), 0);
    }
}
