// SPDX-FileCopyrightText: 2026 Tempora contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Overlap-aware layout positioning for a single day's events.
//!
//! The cluster is the target plus every event that directly overlaps it;
//! transitive overlap through a third event is deliberately not tracked.
//! This greedy layout can use more columns than a graph coloring would for
//! chains of partial overlaps, which is acceptable for a visual hint.

use serde::{Deserialize, Serialize};

use crate::event::CalendarEntry;

/// Horizontal placement of one event within its overlap cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPosition {
    /// Zero-based rank of the event within the cluster, by start time.
    pub column_index: usize,

    /// Number of events in the cluster.
    pub column_count: usize,

    /// Paint order; earlier-starting events paint on top.
    pub stack_order: usize,

    /// Left offset as a percentage of the day column.
    pub left_pct: f64,

    /// Width as a percentage of the day column.
    pub width_pct: f64,
}

/// Whether two intervals overlap. Half-open: touching endpoints do not.
pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: CalendarEntry + ?Sized,
    B: CalendarEntry + ?Sized,
{
    a.start() < b.end() && b.start() < a.end()
}

/// Computes the placement of `target` among the day's events.
///
/// `day_events` may or may not contain the target itself; it is matched by
/// id and never clustered with itself.
pub fn position<E: CalendarEntry>(target: &E, day_events: &[E]) -> EventPosition {
    let mut cluster: Vec<&E> = vec![target];
    for e in day_events {
        if e.id() != target.id() && overlaps(target, e) {
            cluster.push(e);
        }
    }

    // Stable sort keeps input order for identical start times
    cluster.sort_by_key(|e| e.start());

    let column_count = cluster.len();
    let column_index = cluster
        .iter()
        .position(|e| e.id() == target.id())
        .unwrap_or(0);
    let width_pct = 100.0 / column_count as f64;

    EventPosition {
        column_index,
        column_count,
        stack_order: column_count - column_index,
        left_pct: column_index as f64 * width_pct,
        width_pct,
    }
}
