// ABOUTME: Pure calendar-to-program-day projection and day-boundary arithmetic
// ABOUTME: Maps (start date, selected date) onto 1-based week and Monday-first day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! # Calendar Projection
//!
//! Pure date arithmetic, no I/O. The projection here is the single source of
//! truth for program-relative positions; no stored progress counter is ever
//! consulted, so paging across dates is deterministic for a fixed start date.

use crate::constants::limits;
use crate::models::{DayProjection, ProgramDay};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

/// Project a calendar date onto a program's schedule grid.
///
/// Both inputs are calendar dates; time-of-day never participates, which
/// keeps the comparison immune to timezone skew around midnight. A selected
/// date before the start date yields [`DayProjection::NotStarted`]. Week
/// numbers are 1-based; day indexes are Monday-first (0 = Monday).
#[must_use]
pub fn project(start: NaiveDate, selected: NaiveDate) -> DayProjection {
    let days = (selected - start).num_days();
    if days < 0 {
        return DayProjection::NotStarted;
    }

    let week_index = u32::try_from(days / limits::DAYS_PER_WEEK).unwrap_or(u32::MAX - 1);
    DayProjection::Day(ProgramDay {
        week_number: week_index + 1,
        day_of_week: weekday_index(selected),
    })
}

/// Monday-first weekday index for a calendar date (0 = Monday .. 6 = Sunday).
///
/// Weekly templates have no start epoch; their day slot comes straight from
/// this index on the selected date.
#[must_use]
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// UTC day boundaries for a calendar date, as a half-open interval.
///
/// Workout-log existence checks use `start <= t < end` so a session logged
/// at any instant of the selected date counts, and one logged at the next
/// midnight does not.
#[must_use]
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = (date + Duration::days(1)).and_time(NaiveTime::MIN).and_utc();
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_selected_before_start_is_not_started() {
        let start = date(2024, 1, 1);
        assert_eq!(
            project(start, date(2023, 12, 31)),
            DayProjection::NotStarted
        );
        assert_eq!(project(start, date(2020, 6, 15)), DayProjection::NotStarted);
    }

    #[test]
    fn test_start_day_is_week_one_day_zero() {
        // 2024-01-01 is a Monday
        let start = date(2024, 1, 1);
        assert_eq!(
            project(start, start),
            DayProjection::Day(ProgramDay {
                week_number: 1,
                day_of_week: 0
            })
        );
    }

    #[test]
    fn test_one_week_later_is_week_two() {
        let start = date(2024, 1, 1);
        assert_eq!(
            project(start, date(2024, 1, 8)),
            DayProjection::Day(ProgramDay {
                week_number: 2,
                day_of_week: 0
            })
        );
    }

    #[test]
    fn test_mid_week_projection() {
        let start = date(2024, 1, 1);
        // Wednesday of the first week
        assert_eq!(
            project(start, date(2024, 1, 3)),
            DayProjection::Day(ProgramDay {
                week_number: 1,
                day_of_week: 2
            })
        );
    }

    #[test]
    fn test_start_mid_week_keeps_calendar_weekday() {
        // Start on a Thursday: weeks advance every 7 elapsed days while the
        // day index tracks the calendar weekday independently.
        let start = date(2024, 1, 4);
        assert_eq!(
            project(start, start),
            DayProjection::Day(ProgramDay {
                week_number: 1,
                day_of_week: 3
            })
        );
        assert_eq!(
            project(start, date(2024, 1, 10)),
            DayProjection::Day(ProgramDay {
                week_number: 1,
                day_of_week: 2
            })
        );
        assert_eq!(
            project(start, date(2024, 1, 11)),
            DayProjection::Day(ProgramDay {
                week_number: 2,
                day_of_week: 3
            })
        );
    }

    #[test]
    fn test_weekday_index_is_monday_first() {
        assert_eq!(weekday_index(date(2024, 1, 1)), 0); // Monday
        assert_eq!(weekday_index(date(2024, 1, 6)), 5); // Saturday
        assert_eq!(weekday_index(date(2024, 1, 7)), 6); // Sunday
    }

    #[test]
    fn test_day_bounds_are_half_open() {
        let (start, end) = day_bounds(date(2024, 3, 15));
        assert_eq!(start.to_rfc3339(), "2024-03-15T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2024-03-16T00:00:00+00:00");
        assert!(start < end);
    }
}
