// Date utility functions
// Day-granularity helpers shared by the grid builder and range normalizer

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, TimeZone};

/// Anything that falls on a calendar day.
///
/// Time-of-day is discarded, so two instants on the same day compare equal
/// once truncated.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month chrono can represent.
    date - chrono::Duration::days(i64::from(date.day0()))
}

/// Move the first-of-month for `date` by `delta` months, carrying into
/// neighbouring years. Out-of-range results saturate at `date`'s month.
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let first = first_of_month(date);
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    };
    shifted.unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveTime};
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_day_discards_time() {
        let morning = date(2025, 3, 4).and_time(NaiveTime::from_hms_opt(0, 5, 0).unwrap());
        let evening = date(2025, 3, 4).and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        assert_eq!(morning.calendar_day(), evening.calendar_day());
        assert_eq!(evening.calendar_day(), date(2025, 3, 4));
    }

    #[test]
    fn test_zoned_datetime_truncates_to_local_day() {
        let instant = Local.with_ymd_and_hms(2025, 7, 9, 18, 30, 0).unwrap();
        assert_eq!(instant.calendar_day(), date(2025, 7, 9));
    }

    #[test_case(date(2025, 1, 31), -1 => date(2024, 12, 1) ; "back across year")]
    #[test_case(date(2025, 12, 15), 1 => date(2026, 1, 1) ; "forward across year")]
    #[test_case(date(2025, 5, 20), 14 => date(2026, 7, 1) ; "more than a year")]
    #[test_case(date(2025, 5, 20), 0 => date(2025, 5, 1) ; "same month")]
    #[test_case(date(2024, 3, 31), -1 => date(2024, 2, 1) ; "into leap february")]
    fn test_shift_month(from: NaiveDate, delta: i32) -> NaiveDate {
        shift_month(from, delta)
    }

    #[test]
    fn test_shift_month_saturates_at_range_end() {
        assert_eq!(shift_month(NaiveDate::MAX, 1), first_of_month(NaiveDate::MAX));
    }
}
