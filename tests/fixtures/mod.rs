// Test fixtures - reusable test data
// Shared by the integration and property tests

#![allow(dead_code)]

use capsule_calendar::models::event::{EventColor, EventId};
use capsule_calendar::services::event::EventStore;
use capsule_calendar::services::layout::normalize_range;
use chrono::NaiveDate;

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// June 2025 starts on a Sunday, so a Sunday-start grid has no leading days
    pub fn june_2025(day: u32) -> NaiveDate {
        ymd(2025, 6, day)
    }

    /// March 2025 starts on a Saturday: five leading February days
    pub fn march_2025(day: u32) -> NaiveDate {
        ymd(2025, 3, day)
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        ymd(2024, 2, 29)
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// Store with a week-long trip crossing a row boundary and a one-day
    /// birthday in June 2025. Returns (store, trip, birthday).
    pub fn june_store() -> (EventStore, EventId, EventId) {
        let mut store = EventStore::new();
        let trip = store
            .add(
                "Beach trip",
                normalize_range(dates::june_2025(5), dates::june_2025(10)),
                EventColor::Blue,
            )
            .unwrap();
        let birthday = store
            .add("Birthday", [dates::june_2025(18)], EventColor::Pink)
            .unwrap();
        (store, trip, birthday)
    }
}
