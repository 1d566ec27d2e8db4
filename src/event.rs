// SPDX-FileCopyrightText: 2026 Tempora contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::datetime::{day_end, day_start};
use crate::recurrence::RecurrenceRule;

/// Maximum length of an event title, in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum length of an event description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Read-only view of anything with a place on the calendar.
///
/// Implemented by [`Event`] and [`crate::Occurrence`] so the layout, conflict
/// and analytics engines can operate on either without conversion.
pub trait CalendarEntry {
    /// The unique identifier for the entry.
    fn id(&self) -> &str;

    /// The start of the entry's interval.
    fn start(&self) -> NaiveDateTime;

    /// The end of the entry's interval.
    fn end(&self) -> NaiveDateTime;

    /// The classification of the entry, if any.
    fn category(&self) -> Option<&str>;

    /// The display tag of the entry. Opaque to this crate.
    fn color(&self) -> Option<&str>;

    /// Whole minutes between start and end.
    fn duration_minutes(&self) -> i64 {
        (self.end() - self.start()).num_minutes()
    }
}

/// A calendar event as supplied by the caller's event store.
///
/// The crate never mutates an event in place; every engine produces new
/// derived values from read-only views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Opaque unique identifier, stable for the lifetime of the event.
    pub id: String,

    /// Non-empty title, at most [`MAX_TITLE_LEN`] characters.
    pub title: String,

    /// Optional description, at most [`MAX_DESCRIPTION_LEN`] characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Start of the event. Always strictly before `end`.
    pub start: NaiveDateTime,

    /// End of the event.
    pub end: NaiveDateTime,

    /// Display tag, passed through but never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Classification; absent means "Uncategorized" in aggregations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// How the event repeats, if it does.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,

    /// Back-reference to the template this event was created from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

impl CalendarEntry for Event {
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

/// Draft for an event, used for creating new events.
///
/// Both timestamps are optional so a partially parsed or partially filled
/// form can flow through [`validate_draft`] and have every problem reported
/// at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    /// The title of the event.
    pub title: String,

    /// The description of the event, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The start date and time of the event, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,

    /// The end date and time of the event, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,

    /// Display tag for the event, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Classification for the event, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// How the event repeats, if it does.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,

    /// The template this draft was created from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

impl EventDraft {
    /// Validates the draft and converts it into an [`Event`] under the given id.
    ///
    /// This is the commit path an event store calls before persisting;
    /// on failure every violation is returned, not just the first.
    pub fn into_event(self, id: String) -> Result<Event, Vec<String>> {
        let errors = validate_draft(&self);
        if !errors.is_empty() {
            return Err(errors);
        }

        // validate_draft guarantees both timestamps are present
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(vec!["Start date is required".into(), "End date is required".into()]);
        };

        Ok(Event {
            id,
            title: self.title.trim().to_string(),
            description: self.description,
            start,
            end,
            color: self.color,
            category: self.category,
            recurrence: self.recurrence,
            template_id: self.template_id,
        })
    }
}

/// Checks the draft against the event invariants.
///
/// Returns a list of human-readable violations so a caller can display all
/// problems at once; an empty list means the draft is valid.
pub fn validate_draft(draft: &EventDraft) -> Vec<String> {
    let mut errors = Vec::new();

    if draft.title.trim().is_empty() {
        errors.push("Title is required".to_string());
    }

    if draft.title.chars().count() > MAX_TITLE_LEN {
        errors.push("Title must be 100 characters or less".to_string());
    }

    if let Some(description) = &draft.description
        && description.chars().count() > MAX_DESCRIPTION_LEN
    {
        errors.push("Description must be 500 characters or less".to_string());
    }

    if draft.start.is_none() {
        errors.push("Start date is required".to_string());
    }

    if draft.end.is_none() {
        errors.push("End date is required".to_string());
    }

    if let (Some(start), Some(end)) = (draft.start, draft.end)
        && end <= start
    {
        errors.push("End date must be after start date".to_string());
    }

    errors
}

/// Generates a unique event id.
pub fn generate_event_id() -> String {
    format!("evt-{}", Uuid::new_v4())
}

/// Returns references to the entries ordered by ascending start time.
/// The order of entries sharing a start time is preserved.
pub fn sorted_by_start<E: CalendarEntry>(entries: &[E]) -> Vec<&E> {
    let mut sorted: Vec<&E> = entries.iter().collect();
    sorted.sort_by_key(|e| e.start());
    sorted
}

/// Groups entries by the calendar date they start on, in first-seen order.
pub fn group_by_day<E: CalendarEntry>(entries: &[E]) -> Vec<(NaiveDate, Vec<&E>)> {
    let mut grouped: Vec<(NaiveDate, Vec<&E>)> = Vec::new();

    for entry in entries {
        let date = entry.start().date();
        match grouped.iter_mut().find(|(d, _)| *d == date) {
            Some((_, bucket)) => bucket.push(entry),
            None => grouped.push((date, vec![entry])),
        }
    }

    grouped
}

/// Returns every entry whose interval touches the given date, in input order.
/// Multi-day entries are included on each day they span.
pub fn events_for_day<E: CalendarEntry>(entries: &[E], date: NaiveDate) -> Vec<&E> {
    let start = day_start(date);
    let end = day_end(date);
    entries
        .iter()
        .filter(|e| e.start() <= end && e.end() >= start)
        .collect()
}
