// SPDX-FileCopyrightText: 2026 Tempora contributors
//
// SPDX-License-Identifier: Apache-2.0

mod analytics;
mod conflict;
mod datetime;
mod event;
mod layout;
mod quick_add;
mod recurrence;
mod template;

pub use crate::analytics::{
    CategoryTime, DayDensity, DayLoad, FocusSlot, MIN_FOCUS_MINUTES, event_density, focus_slots,
    time_by_category, weekly_load,
};
pub use crate::conflict::find_conflicts;
pub use crate::datetime::{
    date_in_range, day_end, day_start, days_between, days_in_month, same_day, week_days, week_start,
};
pub use crate::event::{
    CalendarEntry, Event, EventDraft, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, events_for_day,
    generate_event_id, group_by_day, sorted_by_start, validate_draft,
};
pub use crate::layout::{EventPosition, overlaps, position};
pub use crate::quick_add::{ParsedEvent, parse_quick_add};
pub use crate::recurrence::{
    Frequency, MAX_OCCURRENCES, Occurrence, RecurrenceRule, expand_event, expand_events,
};
pub use crate::template::{
    BuiltinTemplates, EventTemplate, TemplateProvider, apply_template, suggest_duration,
};
