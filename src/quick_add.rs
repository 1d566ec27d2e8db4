// SPDX-FileCopyrightText: 2026 Tempora contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Free-text event parsing for quick add.
//!
//! Pattern-priority design rather than a grammar: ordered pattern categories
//! are matched against a working copy of the input, and every matched
//! fragment is stripped before the next category runs. Whatever survives the
//! stripping becomes the title. Matching is case-insensitive and
//! English-only. Unparseable fragments are left in the title, never raised
//! as errors.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::event::EventDraft;

/// Default event length when only a start time was found, in minutes.
const DEFAULT_DURATION_MINUTES: i64 = 60;

/// The result of parsing one line of quick-add text.
///
/// `start`/`end` are absent when no clock time could be extracted; a date
/// keyword alone does not produce timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEvent {
    /// The residue of the input after stripping date/time fragments.
    pub title: String,

    /// Extracted start, if a clock time or hour offset was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,

    /// Extracted or defaulted end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,

    /// Explicit duration in minutes, when a "for N ..." suffix was present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
}

impl ParsedEvent {
    /// Converts the parse result into an event draft for the validation and
    /// conflict path shared with manually created events.
    pub fn into_draft(self) -> EventDraft {
        EventDraft {
            title: self.title,
            start: self.start,
            end: self.end,
            ..EventDraft::default()
        }
    }
}

/// Parses a single line of free text into a draft event, relative to the
/// caller-supplied reference time.
///
/// Returns `None` when no usable title remains after stripping, since an
/// event needs a title; date-only or duration-only input is rejected.
#[tracing::instrument(level = "debug")]
pub fn parse_quick_add(input: &str, reference: NaiveDateTime) -> Option<ParsedEvent> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut working = trimmed.to_string();
    let mut base_date = reference.date();
    let mut start: Option<NaiveDateTime> = None;
    let mut end: Option<NaiveDateTime> = None;

    // 1. Relative day keywords
    if strip_all(&mut working, tomorrow_re()) {
        base_date = reference.date() + TimeDelta::days(1);
    } else if strip_all(&mut working, today_re()) {
        base_date = reference.date();
    } else if strip_all(&mut working, yesterday_re()) {
        base_date = reference.date() - TimeDelta::days(1);
    } else if let Some(name) = first_capture(&working, next_weekday_re(), 1) {
        base_date = next_day_of_week(reference.date(), weekday_index(&name));
        strip_all(&mut working, next_weekday_re());
    } else if let Some(name) = first_capture(&working, weekday_re(), 1) {
        base_date = next_day_of_week(reference.date(), weekday_index(&name));
        strip_all(&mut working, weekday_re());
    }

    // 2. Relative offsets: hours carry a time of day, days and weeks only
    //    move the base date
    if let Some(caps) = offset_re().captures(&working) {
        let amount: i64 = caps[1].parse().unwrap_or(0);
        let unit = caps[2].to_ascii_lowercase();
        if unit.starts_with("hour") || unit.starts_with("hr") {
            let shifted = reference + TimeDelta::hours(amount);
            base_date = shifted.date();
            start = Some(shifted);
        } else if unit.starts_with("day") {
            base_date = reference.date() + TimeDelta::days(amount);
        } else {
            base_date = reference.date() + TimeDelta::weeks(amount);
        }
        strip_all(&mut working, offset_re());
    }

    // 3. Explicit duration, consumed before clock times so its number is
    //    never mistaken for an hour
    let mut duration_minutes: Option<i64> = None;
    if let Some(caps) = duration_re().captures(&working) {
        let amount: i64 = caps[1].parse().unwrap_or(0);
        let unit = caps[2].to_ascii_lowercase();
        duration_minutes = Some(if unit.starts_with("hour") || unit.starts_with("hr") {
            amount * 60
        } else {
            amount
        });
        strip_all(&mut working, duration_re());
    }

    // 4. Clock times: a range sets both ends, otherwise a single time, then
    //    the noon and midnight keywords
    if let Some(caps) = range_re().captures(&working) {
        let end_period = caps.get(6).map(|m| m.as_str().to_ascii_lowercase());
        // "3-4pm" means 15:00-16:00: a bare range start inherits the
        // meridiem of its end
        let start_period = caps
            .get(3)
            .map(|m| m.as_str().to_ascii_lowercase())
            .or_else(|| end_period.clone());

        let start_time = clock_time(&caps[1], caps.get(2).map(|m| m.as_str()), start_period.as_deref());
        let end_time = clock_time(&caps[4], caps.get(5).map(|m| m.as_str()), end_period.as_deref());

        if let (Some(st), Some(et)) = (start_time, end_time) {
            let start_dt = NaiveDateTime::new(base_date, st);
            let mut end_dt = NaiveDateTime::new(base_date, et);
            // An end clock before the start rolls to the next day
            if end_dt < start_dt {
                end_dt += TimeDelta::days(1);
            }
            start = Some(start_dt);
            end = Some(end_dt);
            strip_all(&mut working, range_re());
        }
    } else if let Some(caps) = time_re().captures(&working) {
        let period = caps.get(3).map(|m| m.as_str().to_ascii_lowercase());
        if let Some(t) = clock_time(&caps[1], caps.get(2).map(|m| m.as_str()), period.as_deref()) {
            start = Some(NaiveDateTime::new(base_date, t));
            strip_all(&mut working, time_re());
        }
    } else if strip_all(&mut working, noon_re()) {
        start = Some(NaiveDateTime::new(
            base_date,
            NaiveTime::from_hms_opt(12, 0, 0).expect("12:00:00 must exist in NaiveTime"),
        ));
    } else if strip_all(&mut working, midnight_re()) {
        start = Some(NaiveDateTime::new(
            base_date,
            NaiveTime::from_hms_opt(0, 0, 0).expect("00:00:00 must exist in NaiveTime"),
        ));
    }

    // A lone start defaults to the explicit duration, or one hour
    if let Some(s) = start
        && end.is_none()
    {
        end = Some(s + TimeDelta::minutes(duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES)));
    }

    let title = clean_title(&working);
    if title.is_empty() {
        return None;
    }

    Some(ParsedEvent {
        title,
        start,
        end,
        duration_minutes,
    })
}

/// Converts hour/minute/meridiem fragments into a clock time.
/// A bare hour without a meridiem is read as 24-hour, so "3" is 03:00.
fn clock_time(hour: &str, minute: Option<&str>, period: Option<&str>) -> Option<NaiveTime> {
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = match minute {
        Some(m) => m.parse().ok()?,
        None => 0,
    };
    NaiveTime::from_hms_opt(to_24_hour(hour, period), minute, 0)
}

fn to_24_hour(hour: u32, period: Option<&str>) -> u32 {
    match period {
        Some("pm") if hour != 12 => hour + 12,
        Some("am") if hour == 12 => 0,
        _ => hour,
    }
}

/// The next future occurrence of the given weekday, never today itself.
fn next_day_of_week(from: NaiveDate, target: u32) -> NaiveDate {
    let current = from.weekday().num_days_from_sunday();
    let mut days_ahead = i64::from(target) - i64::from(current);
    if days_ahead <= 0 {
        days_ahead += 7;
    }
    from + TimeDelta::days(days_ahead)
}

fn weekday_index(name: &str) -> u32 {
    match name.to_ascii_lowercase().as_str() {
        "sunday" => 0,
        "monday" => 1,
        "tuesday" => 2,
        "wednesday" => 3,
        "thursday" => 4,
        "friday" => 5,
        _ => 6,
    }
}

/// Removes every match of the pattern, leaving a space so neighboring words
/// never fuse. Returns whether anything was removed.
fn strip_all(working: &mut String, re: &Regex) -> bool {
    if !re.is_match(working) {
        return false;
    }
    *working = re.replace_all(working, " ").into_owned();
    true
}

fn first_capture(text: &str, re: &Regex, group: usize) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(group))
        .map(|m| m.as_str().to_string())
}

fn clean_title(working: &str) -> String {
    let collapsed = working.split_whitespace().collect::<Vec<_>>().join(" ");
    let without_lead = leading_filler_re().replace(&collapsed, "");
    trailing_filler_re().replace(&without_lead, "").to_string()
}

macro_rules! cached_regex {
    ($name:ident, $pattern:literal) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).unwrap())
        }
    };
}

cached_regex!(tomorrow_re, r"(?i)\btomorrow\b");
cached_regex!(today_re, r"(?i)\btoday\b");
cached_regex!(yesterday_re, r"(?i)\byesterday\b");
cached_regex!(
    next_weekday_re,
    r"(?i)\bnext\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b"
);
cached_regex!(
    weekday_re,
    r"(?i)\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b"
);
cached_regex!(offset_re, r"(?i)\bin\s+(\d+)\s+(hours?|hrs?|days?|weeks?)\b");
cached_regex!(
    duration_re,
    r"(?i)\bfor\s+(\d+)\s*(minutes?|mins?|hours?|hrs?)\b"
);
cached_regex!(
    range_re,
    r"(?i)(\d{1,2}):?(\d{2})?\s*(am|pm)?\s*[-–—]\s*(\d{1,2}):?(\d{2})?\s*(am|pm)?"
);
cached_regex!(time_re, r"(?i)(\d{1,2}):?(\d{2})?\s*(am|pm)?");
cached_regex!(noon_re, r"(?i)\b(noon|midday)\b");
cached_regex!(midnight_re, r"(?i)\bmidnight\b");
cached_regex!(leading_filler_re, r"(?i)^(at|on|for|in)\s+");
cached_regex!(trailing_filler_re, r"(?i)\s+(at|on|for|in)$");

#[cfg(test)]
mod tests {
    use super::*;

    fn datetime(y: i32, m: u32, d: u32, h: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mm, 0)
            .unwrap()
    }

    // Monday, mid-morning
    fn reference() -> NaiveDateTime {
        datetime(2024, 1, 15, 10, 30)
    }

    #[test]
    fn range_with_shared_meridiem() {
        let parsed = parse_quick_add("Meeting tomorrow 3-4pm", reference()).unwrap();
        assert_eq!(parsed.title, "Meeting");
        assert_eq!(parsed.start, Some(datetime(2024, 1, 16, 15, 0)));
        assert_eq!(parsed.end, Some(datetime(2024, 1, 16, 16, 0)));
    }

    #[test]
    fn range_with_minutes() {
        let parsed = parse_quick_add("Standup 9:15-9:30am today", reference()).unwrap();
        assert_eq!(parsed.title, "Standup");
        assert_eq!(parsed.start, Some(datetime(2024, 1, 15, 9, 15)));
        assert_eq!(parsed.end, Some(datetime(2024, 1, 15, 9, 30)));
    }

    #[test]
    fn range_crossing_midnight_rolls_to_next_day() {
        let parsed = parse_quick_add("Party 11pm-1am", reference()).unwrap();
        assert_eq!(parsed.start, Some(datetime(2024, 1, 15, 23, 0)));
        assert_eq!(parsed.end, Some(datetime(2024, 1, 16, 1, 0)));
    }

    #[test]
    fn single_time_defaults_to_one_hour() {
        let parsed = parse_quick_add("Standup today at 9am", reference()).unwrap();
        assert_eq!(parsed.title, "Standup");
        assert_eq!(parsed.start, Some(datetime(2024, 1, 15, 9, 0)));
        assert_eq!(parsed.end, Some(datetime(2024, 1, 15, 10, 0)));
        assert_eq!(parsed.duration_minutes, None);
    }

    #[test]
    fn explicit_duration_sets_the_end() {
        let parsed = parse_quick_add("Dinner tomorrow 7pm for 2 hours", reference()).unwrap();
        assert_eq!(parsed.title, "Dinner");
        assert_eq!(parsed.start, Some(datetime(2024, 1, 16, 19, 0)));
        assert_eq!(parsed.end, Some(datetime(2024, 1, 16, 21, 0)));
        assert_eq!(parsed.duration_minutes, Some(120));
    }

    #[test]
    fn duration_number_is_not_read_as_an_hour() {
        let parsed = parse_quick_add("Workout for 45 minutes at 6am", reference()).unwrap();
        assert_eq!(parsed.title, "Workout");
        assert_eq!(parsed.start, Some(datetime(2024, 1, 15, 6, 0)));
        assert_eq!(parsed.end, Some(datetime(2024, 1, 15, 6, 45)));
    }

    #[test]
    fn noon_keyword_with_next_weekday() {
        let parsed = parse_quick_add("Lunch next Monday at noon", reference()).unwrap();
        assert_eq!(parsed.title, "Lunch");
        assert_eq!(parsed.start, Some(datetime(2024, 1, 22, 12, 0)));
        assert_eq!(parsed.end, Some(datetime(2024, 1, 22, 13, 0)));
    }

    #[test]
    fn bare_weekday_means_next_future_occurrence() {
        let parsed = parse_quick_add("Review Friday 2pm", reference()).unwrap();
        assert_eq!(parsed.start, Some(datetime(2024, 1, 19, 14, 0)));
        // The reference day itself is never "next Monday"
        let parsed = parse_quick_add("Sync Monday 2pm", reference()).unwrap();
        assert_eq!(parsed.start, Some(datetime(2024, 1, 22, 14, 0)));
    }

    #[test]
    fn hour_offset_keeps_the_reference_minutes() {
        let parsed = parse_quick_add("Conference call in 2 hours", reference()).unwrap();
        assert_eq!(parsed.title, "Conference call");
        assert_eq!(parsed.start, Some(datetime(2024, 1, 15, 12, 30)));
        assert_eq!(parsed.end, Some(datetime(2024, 1, 15, 13, 30)));
    }

    #[test]
    fn day_offset_combines_with_a_clock_time() {
        let parsed = parse_quick_add("Checkup in 3 days 8:30am", reference()).unwrap();
        assert_eq!(parsed.start, Some(datetime(2024, 1, 18, 8, 30)));
    }

    #[test]
    fn week_offset_moves_the_date() {
        let parsed = parse_quick_add("Retro in 2 weeks 4pm", reference()).unwrap();
        assert_eq!(parsed.start, Some(datetime(2024, 1, 29, 16, 0)));
    }

    #[test]
    fn yesterday_moves_backwards() {
        let parsed = parse_quick_add("Log workout yesterday 7am", reference()).unwrap();
        assert_eq!(parsed.start, Some(datetime(2024, 1, 14, 7, 0)));
    }

    #[test]
    fn midnight_keyword() {
        let parsed = parse_quick_add("Deploy tomorrow at midnight", reference()).unwrap();
        assert_eq!(parsed.start, Some(datetime(2024, 1, 16, 0, 0)));
    }

    #[test]
    fn bare_hour_is_twenty_four_hour() {
        // Documented ambiguity: "3" with no meridiem is 03:00, not 15:00
        let parsed = parse_quick_add("Meeting 3", reference()).unwrap();
        assert_eq!(parsed.start, Some(datetime(2024, 1, 15, 3, 0)));
    }

    #[test]
    fn date_keyword_without_time_yields_no_timestamps() {
        let parsed = parse_quick_add("Dentist tomorrow", reference()).unwrap();
        assert_eq!(parsed.title, "Dentist");
        assert_eq!(parsed.start, None);
        assert_eq!(parsed.end, None);
    }

    #[test]
    fn titleless_input_is_rejected() {
        assert!(parse_quick_add("tomorrow 3pm", reference()).is_none());
        assert!(parse_quick_add("for 30 minutes", reference()).is_none());
        assert!(parse_quick_add("", reference()).is_none());
        assert!(parse_quick_add("   ", reference()).is_none());
    }

    #[test]
    fn unparseable_text_becomes_the_title() {
        let parsed = parse_quick_add("Ship the quarterly report", reference()).unwrap();
        assert_eq!(parsed.title, "Ship the quarterly report");
        assert_eq!(parsed.start, None);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let parsed = parse_quick_add("Meeting TOMORROW 3PM", reference()).unwrap();
        assert_eq!(parsed.start, Some(datetime(2024, 1, 16, 15, 0)));
    }

    #[test]
    fn invalid_clock_values_are_ignored() {
        // Hour 99 cannot become a time; the fragment stays in the title
        let parsed = parse_quick_add("Flight 99", reference()).unwrap();
        assert_eq!(parsed.title, "Flight 99");
        assert_eq!(parsed.start, None);
    }

    #[test]
    fn draft_conversion_carries_fields() {
        let draft = parse_quick_add("Meeting tomorrow 3-4pm", reference())
            .unwrap()
            .into_draft();
        assert_eq!(draft.title, "Meeting");
        assert_eq!(draft.start, Some(datetime(2024, 1, 16, 15, 0)));
        assert_eq!(draft.end, Some(datetime(2024, 1, 16, 16, 0)));
    }
}
