// SPDX-FileCopyrightText: 2026 Tempora contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories shared by the scenario tests.

use chrono::{NaiveDate, NaiveDateTime};
use tempora_core::{Event, Frequency, RecurrenceRule};

/// Builds a naive datetime from its parts.
pub fn datetime(y: i32, m: u32, d: u32, h: u32, mm: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, mm, 0)
        .unwrap()
}

/// A plain event with only the interval filled in.
pub fn event(id: &str, start: NaiveDateTime, end: NaiveDateTime) -> Event {
    Event {
        id: id.to_string(),
        title: format!("Event {id}"),
        description: None,
        start,
        end,
        color: None,
        category: None,
        recurrence: None,
        template_id: None,
    }
}

/// An event carrying a category and color, for analytics scenarios.
pub fn categorized_event(
    id: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    category: &str,
    color: &str,
) -> Event {
    Event {
        category: Some(category.to_string()),
        color: Some(color.to_string()),
        ..event(id, start, end)
    }
}

/// An event repeating at the given frequency with no stop condition.
pub fn recurring_event(
    id: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    frequency: Frequency,
) -> Event {
    Event {
        recurrence: Some(RecurrenceRule::every(frequency, 1)),
        ..event(id, start, end)
    }
}
