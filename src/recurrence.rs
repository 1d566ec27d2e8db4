// SPDX-FileCopyrightText: 2026 Tempora contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Expansion of recurring events into concrete occurrences within a window.
//!
//! Expansion walks a cursor forward from the base event's start, one
//! recurrence step at a time, and stops as soon as the cursor leaves the
//! window, passes the rule's end date, or the occurrence cap is reached.
//! Only occurrences whose start falls inside the window are returned.

use chrono::{Datelike, Months, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::datetime::with_day_clamped;
use crate::event::{CalendarEntry, Event};

/// Hard cap on occurrences per event, so a rule without any stop condition
/// still terminates.
pub const MAX_OCCURRENCES: usize = 1000;

/// How often an event repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Frequency {
    /// Repeats every `interval` days.
    #[default]
    Daily,

    /// Repeats every `interval` weeks, optionally constrained to weekdays.
    Weekly,

    /// Repeats every `interval` months, optionally pinned to a day of month.
    Monthly,

    /// Repeats every year. The interval is not applied to yearly recurrence;
    /// this is an intentional simplification, not a defect.
    Yearly,

    /// Caller-defined repetition with no step of its own; expands to the
    /// base occurrence only.
    Custom,
}

/// Declarative description of how an event repeats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// The repetition frequency.
    pub frequency: Frequency,

    /// Step between occurrences, e.g. 2 for every other week.
    /// Values below 1 are treated as 1.
    #[serde(default = "default_interval")]
    pub interval: u32,

    /// Hard stop; occurrences after this instant are excluded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDateTime>,

    /// Maximum number of occurrences, capped at [`MAX_OCCURRENCES`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// Weekday constraint for weekly recurrence, 0 = Sunday .. 6 = Saturday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<u32>>,

    /// Day-of-month pin for monthly recurrence (1-31, clamped to the month).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,

    /// Week-of-month constraint for monthly recurrence (1-5, -1 for last).
    /// Carried for callers; not interpreted by the expansion step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_of_month: Option<i32>,
}

fn default_interval() -> u32 {
    1
}

impl RecurrenceRule {
    /// A rule repeating every `interval` units with no stop condition.
    pub fn every(frequency: Frequency, interval: u32) -> Self {
        RecurrenceRule {
            frequency,
            interval,
            end_date: None,
            count: None,
            days_of_week: None,
            day_of_month: None,
            week_of_month: None,
        }
    }
}

/// One concrete, time-bound materialization of a (possibly recurring) event.
///
/// Occurrences are recomputed on every query and never persisted or edited
/// directly; edits resolve back to the base event through `base_event_id`,
/// which is carried explicitly rather than re-derived from the synthesized id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    /// `"{base_id}-{index}"` for recurring events; the base id unchanged for
    /// a non-recurring event's single occurrence.
    pub id: String,

    /// The id of the event this occurrence was expanded from.
    pub base_event_id: String,

    /// Zero-based ordinal of this occurrence within the expansion.
    pub index: usize,

    /// Start of this occurrence.
    pub start: NaiveDateTime,

    /// End of this occurrence. Duration always equals the base event's.
    pub end: NaiveDateTime,

    /// Title copied from the base event.
    pub title: String,

    /// Description copied from the base event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Display tag copied from the base event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Category copied from the base event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Occurrence {
    fn base(event: &Event) -> Self {
        Occurrence {
            id: event.id.clone(),
            base_event_id: event.id.clone(),
            index: 0,
            start: event.start,
            end: event.end,
            title: event.title.clone(),
            description: event.description.clone(),
            color: event.color.clone(),
            category: event.category.clone(),
        }
    }

    fn nth(event: &Event, index: usize, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Occurrence {
            id: format!("{}-{}", event.id, index),
            base_event_id: event.id.clone(),
            index,
            start,
            end,
            title: event.title.clone(),
            description: event.description.clone(),
            color: event.color.clone(),
            category: event.category.clone(),
        }
    }
}

impl CalendarEntry for Occurrence {
    fn id(&self) -> &str {
        &self.id
    }

    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> NaiveDateTime {
        self.end
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

/// Expands one event into its occurrences within `[window_start, window_end]`.
///
/// A non-recurring event yields its single occurrence when its interval
/// intersects the window, and nothing otherwise. Expansion is deterministic:
/// the same event and window always produce identical timestamps and ids.
pub fn expand_event(
    event: &Event,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Vec<Occurrence> {
    let Some(rule) = &event.recurrence else {
        return if event.start <= window_end && event.end >= window_start {
            vec![Occurrence::base(event)]
        } else {
            Vec::new()
        };
    };

    let duration = event.end - event.start;
    let cap = rule
        .count
        .map(|c| c.min(MAX_OCCURRENCES))
        .unwrap_or(MAX_OCCURRENCES);
    let interval = i64::from(rule.interval.max(1));

    let mut occurrences = Vec::new();
    let mut cursor = event.start;

    while cursor <= window_end && occurrences.len() < cap {
        if let Some(stop) = rule.end_date
            && cursor > stop
        {
            break;
        }

        occurrences.push(Occurrence::nth(
            event,
            occurrences.len(),
            cursor,
            cursor + duration,
        ));

        cursor = match next_occurrence_start(rule, cursor, interval) {
            Some(next) => next,
            None => break,
        };
    }

    if occurrences.len() == MAX_OCCURRENCES {
        tracing::warn!(event_id = %event.id, "recurrence expansion hit the occurrence cap");
    }

    occurrences.retain(|o| window_start <= o.start && o.start <= window_end);
    occurrences
}

/// Expands every event in the collection into the materialized occurrence
/// list for the window, preserving input order between events.
pub fn expand_events(
    events: &[Event],
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Vec<Occurrence> {
    events
        .iter()
        .flat_map(|e| expand_event(e, window_start, window_end))
        .collect()
}

/// The start of the occurrence after `cursor`, or `None` when the rule has
/// no step of its own.
fn next_occurrence_start(
    rule: &RecurrenceRule,
    cursor: NaiveDateTime,
    interval: i64,
) -> Option<NaiveDateTime> {
    match rule.frequency {
        Frequency::Daily => Some(cursor + TimeDelta::days(interval)),

        Frequency::Weekly => {
            let days = normalized_weekdays(rule);
            if days.is_empty() {
                return Some(cursor + TimeDelta::days(7 * interval));
            }

            let current = cursor.weekday().num_days_from_sunday();
            let step = match days.iter().copied().find(|d| *d > current) {
                // A later listed weekday remains in the current week
                Some(next) => i64::from(next - current),
                // Wrap to the first listed weekday of the next interval-week
                None => 7 * interval - i64::from(current) + i64::from(days[0]),
            };
            Some(cursor + TimeDelta::days(step))
        }

        Frequency::Monthly => {
            let months = u32::try_from(interval).ok()?;
            let mut date = cursor.date().checked_add_months(Months::new(months))?;
            if let Some(day) = rule.day_of_month {
                let pinned = with_day_clamped(date, day);
                if pinned.day() != day {
                    tracing::warn!(
                        day,
                        month = date.month(),
                        "day-of-month pin clamped to month length"
                    );
                }
                date = pinned;
            }
            Some(NaiveDateTime::new(date, cursor.time()))
        }

        Frequency::Yearly => {
            let date = cursor.date().checked_add_months(Months::new(12))?;
            Some(NaiveDateTime::new(date, cursor.time()))
        }

        Frequency::Custom => None,
    }
}

/// Valid weekday indices from the rule, ascending and deduplicated.
fn normalized_weekdays(rule: &RecurrenceRule) -> Vec<u32> {
    let mut days: Vec<u32> = rule
        .days_of_week
        .iter()
        .flatten()
        .copied()
        .filter(|d| *d < 7)
        .collect();
    days.sort_unstable();
    days.dedup();
    days
}
