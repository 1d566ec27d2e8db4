// SPDX-FileCopyrightText: 2026 Tempora contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Event templates and duration suggestions.
//!
//! Template storage belongs to the caller; this crate only defines the
//! template shape, a provider seam to obtain them through, and the built-in
//! presets used when no caller-defined templates exist.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::event::EventDraft;
use crate::recurrence::{Frequency, RecurrenceRule};

/// A named preset from which a draft event can be stamped out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTemplate {
    /// Unique identifier of the template.
    pub id: String,

    /// Display name of the template.
    pub name: String,

    /// Title given to events created from this template.
    pub title: String,

    /// Description given to created events, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Event length in minutes.
    pub duration_minutes: i64,

    /// Display tag for created events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Category for created events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Recurrence attached to created events, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
}

/// Read-only source of templates, injected by the caller.
///
/// Keeps the core free of ambient storage: whatever medium the caller
/// persists templates in, the engines only ever see this read function.
pub trait TemplateProvider {
    /// The templates currently available.
    fn templates(&self) -> Vec<EventTemplate>;
}

/// The built-in presets, used when the caller supplies no provider of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl TemplateProvider for BuiltinTemplates {
    fn templates(&self) -> Vec<EventTemplate> {
        vec![
            template("template-meeting", "Team Meeting", 60, "#3b82f6", "Meeting", None),
            template(
                "template-standup",
                "Daily Standup",
                15,
                "#10b981",
                "Meeting",
                Some(RecurrenceRule::every(Frequency::Daily, 1)),
            ),
            template("template-1on1", "1:1 Meeting", 30, "#8b5cf6", "Meeting", None),
            template("template-focus", "Focus Time", 90, "#f59e0b", "Work", None),
            template("template-lunch", "Lunch Break", 30, "#ec4899", "Personal", None),
        ]
    }
}

fn template(
    id: &str,
    name: &str,
    duration_minutes: i64,
    color: &str,
    category: &str,
    recurrence: Option<RecurrenceRule>,
) -> EventTemplate {
    EventTemplate {
        id: id.to_string(),
        name: name.to_string(),
        title: name.to_string(),
        description: None,
        duration_minutes,
        color: Some(color.to_string()),
        category: Some(category.to_string()),
        recurrence,
    }
}

/// Stamps a draft event out of the template at the given start time.
pub fn apply_template(template: &EventTemplate, start: NaiveDateTime) -> EventDraft {
    EventDraft {
        title: template.title.clone(),
        description: template.description.clone(),
        start: Some(start),
        end: Some(start + TimeDelta::minutes(template.duration_minutes)),
        color: template.color.clone(),
        category: template.category.clone(),
        recurrence: template.recurrence.clone(),
        template_id: Some(template.id.clone()),
    }
}

/// Suggests a duration in minutes from keywords in the title, or `None` for
/// an empty title.
pub fn suggest_duration(title: &str) -> Option<i64> {
    if title.trim().is_empty() {
        return None;
    }

    let lower = title.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    let minutes = if has("meeting") || has("sync") {
        if has("standup") || has("daily") || has("quick") || has("brief") {
            15
        } else if has("1:1") || has("one-on-one") {
            30
        } else {
            60
        }
    } else if has("focus") || has("deep work") {
        90
    } else if has("work session") || has("coding") {
        120
    } else if has("break") || has("lunch") {
        30
    } else if has("coffee") {
        15
    } else if has("call") || has("phone") {
        30
    } else if has("review") || has("retro") {
        60
    } else if has("interview") {
        60
    } else {
        30
    };

    Some(minutes)
}
