// Event module
// Labeled, colored set of calendar days shown as capsules on the month grid

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identity of a calendar event, generated on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(Uuid);

impl EventId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed palette an event can be painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    Red,
    Yellow,
    Green,
    #[default]
    Blue,
    Purple,
    Pink,
}

impl EventColor {
    pub const ALL: [EventColor; 6] = [
        EventColor::Red,
        EventColor::Yellow,
        EventColor::Green,
        EventColor::Blue,
        EventColor::Purple,
        EventColor::Pink,
    ];

    /// Human readable name used by the color picker
    pub fn label(&self) -> &'static str {
        match self {
            EventColor::Red => "Red",
            EventColor::Yellow => "Yellow",
            EventColor::Green => "Green",
            EventColor::Blue => "Blue",
            EventColor::Purple => "Purple",
            EventColor::Pink => "Pink",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("Event label cannot be empty")]
    EmptyLabel,
    #[error("Event must cover at least one date")]
    NoDates,
    #[error("Event with id {0} not found")]
    NotFound(EventId),
}

/// Calendar event covering an ordered, deduplicated set of days.
///
/// The set is usually a contiguous range but may be sparse; layout code
/// treats each run of consecutive days independently.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: EventId,
    pub dates: BTreeSet<NaiveDate>,
    pub label: String,
    pub color: EventColor,
}

impl CalendarEvent {
    /// Create a new event with a fresh identifier
    ///
    /// # Examples
    /// ```
    /// use capsule_calendar::models::event::{CalendarEvent, EventColor};
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    /// let event = CalendarEvent::new("Pi day", [day], EventColor::Yellow).unwrap();
    /// assert_eq!(event.first_date(), Some(day));
    /// ```
    pub fn new(
        label: impl Into<String>,
        dates: impl IntoIterator<Item = NaiveDate>,
        color: EventColor,
    ) -> Result<Self, EventError> {
        let event = Self {
            id: EventId::generate(),
            dates: dates.into_iter().collect(),
            label: label.into(),
            color,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn validate(&self) -> Result<(), EventError> {
        validate_label(&self.label)?;
        if self.dates.is_empty() {
            return Err(EventError::NoDates);
        }
        Ok(())
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

pub(crate) fn validate_label(label: &str) -> Result<(), EventError> {
    if label.trim().is_empty() {
        return Err(EventError::EmptyLabel);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_new_event_success() {
        let event = CalendarEvent::new("Trip", [day(3), day(4)], EventColor::Green).unwrap();
        assert_eq!(event.label, "Trip");
        assert_eq!(event.color, EventColor::Green);
        assert_eq!(event.first_date(), Some(day(3)));
        assert_eq!(event.dates.last(), Some(&day(4)));
    }

    #[test]
    fn test_new_event_empty_label() {
        let result = CalendarEvent::new("", [day(1)], EventColor::Red);
        assert_eq!(result.unwrap_err(), EventError::EmptyLabel);
    }

    #[test]
    fn test_new_event_whitespace_label() {
        let result = CalendarEvent::new("   ", [day(1)], EventColor::Red);
        assert_eq!(result.unwrap_err(), EventError::EmptyLabel);
    }

    #[test]
    fn test_new_event_without_dates() {
        let result = CalendarEvent::new("Nothing", Vec::<NaiveDate>::new(), EventColor::Red);
        assert_eq!(result.unwrap_err(), EventError::NoDates);
    }

    #[test]
    fn test_dates_are_sorted_and_deduplicated() {
        let event =
            CalendarEvent::new("Dup", [day(9), day(2), day(9), day(5)], EventColor::Blue).unwrap();
        let dates: Vec<_> = event.dates.iter().copied().collect();
        assert_eq!(dates, vec![day(2), day(5), day(9)]);
    }

    #[test]
    fn test_covers_only_listed_dates() {
        let sparse = CalendarEvent::new("Gap", [day(1), day(3)], EventColor::Blue).unwrap();
        assert!(sparse.covers(day(1)));
        assert!(sparse.covers(day(3)));
        assert!(!sparse.covers(day(2)));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = CalendarEvent::new("Same", [day(1)], EventColor::Pink).unwrap();
        let b = CalendarEvent::new("Same", [day(1)], EventColor::Pink).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_color_palette_labels() {
        let labels: Vec<_> = EventColor::ALL.iter().map(EventColor::label).collect();
        assert_eq!(labels, ["Red", "Yellow", "Green", "Blue", "Purple", "Pink"]);
        assert_eq!(EventColor::default(), EventColor::Blue);
    }
}
