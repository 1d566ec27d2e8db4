// SPDX-FileCopyrightText: 2026 Tempora contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Primitive interval and day/week math shared by every engine in the crate.
//!
//! Weekday indices are Sunday-based (0 = Sunday .. 6 = Saturday) throughout.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

pub(crate) const fn start_of_day_naive() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 0, 0).expect("00:00:00 must exist in NaiveTime")
}

/// Using a leap second to represent the end of the day
pub(crate) const fn end_of_day_naive() -> NaiveTime {
    NaiveTime::from_hms_nano_opt(23, 59, 59, 1_999_999_999)
        .expect("23:59:59.1_999_999_999 must exist in NaiveTime")
}

/// The first instant (00:00:00) of the given date.
pub fn day_start(date: NaiveDate) -> NaiveDateTime {
    NaiveDateTime::new(date, start_of_day_naive())
}

/// The last instant of the given date.
pub fn day_end(date: NaiveDate) -> NaiveDateTime {
    NaiveDateTime::new(date, end_of_day_naive())
}

/// Whether two datetimes fall on the same calendar date, ignoring time.
pub fn same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Number of whole days between two datetimes, floored.
/// Negative when `end` is before `start`.
pub fn days_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_seconds().div_euclid(86_400)
}

/// The Sunday on or before the given date.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// The seven dates of the week containing `date`, starting on Sunday.
pub fn week_days(date: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(date);
    std::array::from_fn(|i| start + TimeDelta::days(i as i64))
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// Replaces the day-of-month of `date`, clamping to the last day of the month.
pub(crate) fn with_day_clamped(date: NaiveDate, day: u32) -> NaiveDate {
    let clamped = day.clamp(1, days_in_month(date.year(), date.month()));
    date.with_day(clamped).unwrap_or(date)
}

/// Whether `date` falls inside the day-granular range, boundaries included.
/// A reversed range is normalized rather than rejected.
pub fn date_in_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    let (min, max) = if start <= end { (start, end) } else { (end, start) };
    min <= date && date <= max
}
