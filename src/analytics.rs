// SPDX-FileCopyrightText: 2026 Tempora contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Aggregate analytics over an event collection.
//!
//! Four independent pure passes: category time breakdown, weekly load,
//! focus-slot discovery and event density. Category time sums each included
//! event's FULL duration while weekly load clips minutes to the day; the two
//! policies differ on purpose and match the displayed totals callers expect.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::datetime::{day_end, day_start};
use crate::event::CalendarEntry;

/// Default minimum length of a reported focus slot, in minutes.
pub const MIN_FOCUS_MINUTES: i64 = 90;

/// A clipped day total above this many hours counts as overbooked.
const OVERBOOKED_HOURS: f64 = 8.0;

/// Time spent in one category across the aggregated events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTime {
    /// The category name; events without one fall under "Uncategorized".
    pub category: String,

    /// Total minutes, rounded to the nearest minute.
    pub minutes: i64,

    /// Total hours, rounded to one decimal.
    pub hours: f64,

    /// Share of the total minutes across all categories, 0 when the total
    /// is zero.
    pub percentage: f64,

    /// The first color seen for the category, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Booked time for one day of a week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLoad {
    /// The day.
    pub date: NaiveDate,

    /// Hours falling inside the day, clipped to its bounds, one decimal.
    pub hours: f64,

    /// Number of events touching the day.
    pub event_count: usize,

    /// True when the clipped total exceeds eight hours.
    pub overbooked: bool,
}

/// An uninterrupted free interval on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSlot {
    /// Start of the free interval.
    pub start: NaiveDateTime,

    /// End of the free interval.
    pub end: NaiveDateTime,

    /// Length in minutes, rounded to the nearest minute.
    pub minutes: i64,

    /// Length in hours, rounded to one decimal.
    pub hours: f64,
}

/// How busy one day is relative to the busiest day in the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDensity {
    /// The day.
    pub date: NaiveDate,

    /// Number of events touching the day.
    pub event_count: usize,

    /// Booked hours clipped to the day, one decimal.
    pub hours: f64,

    /// Normalized busyness bucket, 0-4.
    pub intensity: u8,
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_seconds() as f64 / 60.0
}

/// Sums time per category over the events intersecting the optional window.
///
/// Window filtering is inclusive on both boundaries; an included event
/// contributes its full duration even when it sticks out of the window.
/// Results are sorted by descending minutes, first-seen order on ties.
pub fn time_by_category<E: CalendarEntry>(
    events: &[E],
    window_start: Option<NaiveDateTime>,
    window_end: Option<NaiveDateTime>,
) -> Vec<CategoryTime> {
    struct Acc {
        category: String,
        minutes: f64,
        color: Option<String>,
    }

    let mut accs: Vec<Acc> = Vec::new();

    for event in events {
        if let Some(start) = window_start
            && event.end() < start
        {
            continue;
        }
        if let Some(end) = window_end
            && event.start() > end
        {
            continue;
        }

        let minutes = minutes_between(event.start(), event.end());
        let category = event.category().unwrap_or("Uncategorized");

        match accs.iter_mut().find(|a| a.category == category) {
            Some(acc) => {
                acc.minutes += minutes;
                if acc.color.is_none() {
                    acc.color = event.color().map(str::to_owned);
                }
            }
            None => accs.push(Acc {
                category: category.to_owned(),
                minutes,
                color: event.color().map(str::to_owned),
            }),
        }
    }

    let total: f64 = accs.iter().map(|a| a.minutes).sum();

    let mut breakdown: Vec<CategoryTime> = accs
        .into_iter()
        .map(|a| CategoryTime {
            category: a.category,
            minutes: a.minutes.round() as i64,
            hours: round1(a.minutes / 60.0),
            percentage: if total > 0.0 {
                a.minutes / total * 100.0
            } else {
                0.0
            },
            color: a.color,
        })
        .collect();

    breakdown.sort_by(|a, b| b.minutes.cmp(&a.minutes));
    breakdown
}

/// Booked hours for each of the seven days starting at `week_start`.
///
/// Unlike [`time_by_category`], minutes here ARE clipped to the day bounds,
/// so a multi-day event only counts the part inside each day.
pub fn weekly_load<E: CalendarEntry>(events: &[E], week_start: NaiveDate) -> Vec<DayLoad> {
    (0..7)
        .map(|i| {
            let date = week_start + TimeDelta::days(i);
            let start = day_start(date);
            let end = day_end(date);

            let mut event_count = 0;
            let mut minutes = 0.0;
            for event in events {
                if event.start() > end || event.end() < start {
                    continue;
                }
                event_count += 1;
                minutes += minutes_between(event.start().max(start), event.end().min(end));
            }

            let hours = minutes / 60.0;
            DayLoad {
                date,
                hours: round1(hours),
                event_count,
                overbooked: hours > OVERBOOKED_HOURS,
            }
        })
        .collect()
}

/// Finds uninterrupted free intervals of at least `min_minutes` on `date`.
///
/// Walks forward from midnight over the day's events in start order and
/// reports each qualifying gap, including the tail gap to the end of day.
pub fn focus_slots<E: CalendarEntry>(
    events: &[E],
    date: NaiveDate,
    min_minutes: i64,
) -> Vec<FocusSlot> {
    let start = day_start(date);
    let end = day_end(date);

    let mut day_events: Vec<&E> = events
        .iter()
        .filter(|e| e.start() <= end && e.end() >= start)
        .collect();
    day_events.sort_by_key(|e| e.start());

    let mut slots = Vec::new();
    let mut cursor = start;

    for event in day_events {
        if event.start() > cursor {
            push_slot(&mut slots, cursor, event.start(), min_minutes);
        }
        if event.end() > cursor {
            cursor = event.end();
        }
    }

    if cursor < end {
        push_slot(&mut slots, cursor, end, min_minutes);
    }

    slots
}

fn push_slot(slots: &mut Vec<FocusSlot>, start: NaiveDateTime, end: NaiveDateTime, min_minutes: i64) {
    let minutes = minutes_between(start, end);
    if minutes >= min_minutes as f64 {
        slots.push(FocusSlot {
            start,
            end,
            minutes: minutes.round() as i64,
            hours: round1(minutes / 60.0),
        });
    }
}

/// Per-day event counts and clipped hours over a date window, normalized to
/// a 0-4 intensity bucket against the busiest day observed.
///
/// An event spanning multiple days contributes to every day it touches
/// inside the window. No events means an empty result, never a division by
/// zero.
pub fn event_density<E: CalendarEntry>(
    events: &[E],
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<DayDensity> {
    struct Acc {
        date: NaiveDate,
        event_count: usize,
        hours: f64,
    }

    let mut accs: Vec<Acc> = Vec::new();

    for event in events {
        let first = event.start().date().max(window_start);
        let last = event.end().date().min(window_end);

        let mut date = first;
        while date <= last {
            let clipped_start = event.start().max(day_start(date));
            let clipped_end = event.end().min(day_end(date));
            let hours = (clipped_end - clipped_start).num_seconds().max(0) as f64 / 3600.0;

            match accs.iter_mut().find(|a| a.date == date) {
                Some(acc) => {
                    acc.event_count += 1;
                    acc.hours += hours;
                }
                None => accs.push(Acc {
                    date,
                    event_count: 1,
                    hours,
                }),
            }

            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
    }

    if accs.is_empty() {
        return Vec::new();
    }

    let max_hours = accs.iter().map(|a| a.hours).fold(1.0_f64, f64::max);

    accs.sort_by_key(|a| a.date);
    accs.into_iter()
        .map(|a| DayDensity {
            date: a.date,
            event_count: a.event_count,
            hours: round1(a.hours),
            intensity: ((a.hours / max_hours * 4.0).floor() as u8).min(4),
        })
        .collect()
}
