// SPDX-FileCopyrightText: 2026 Tempora contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDateTime;

use crate::event::CalendarEntry;

/// Finds every existing entry whose interval overlaps the candidate interval.
///
/// The overlap test is half-open, so back-to-back entries do not conflict.
/// `exclude_id` skips one entry, for validating an edit against the rest of
/// the store. Result order matches input order.
pub fn find_conflicts<'a, E: CalendarEntry>(
    start: NaiveDateTime,
    end: NaiveDateTime,
    existing: &'a [E],
    exclude_id: Option<&str>,
) -> Vec<&'a E> {
    existing
        .iter()
        .filter(|e| exclude_id != Some(e.id()) && start < e.end() && e.start() < end)
        .collect()
}
