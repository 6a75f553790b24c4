//! Recurrence window enumeration.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::schema::{advance_by, IntervalType};

use super::close_date::compute_close_date;

/// One submission cycle: `[start, close)` accepts regular submissions,
/// `[close, grace)` accepts late ones. `grace_date == close_date` when no
/// late term applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    pub start_date: DateTime<Utc>,
    pub close_date: DateTime<Utc>,
    pub grace_date: DateTime<Utc>,
}

impl AvailabilityWindow {
    /// Whether `now` falls in the primary submission range `[start, close)`.
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now < self.close_date
    }

    /// Whether `now` falls in the extended range `[start, grace)`.
    pub fn in_grace(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now < self.grace_date
    }
}

/// Enumerate the ordered submission windows for a (possibly repeating)
/// schedule starting at `start_date`.
///
/// The walk steps `every_term(every_interval)` at a time from `start_date`
/// up to the overall close bound from [`compute_close_date`], emitting a
/// window for each step that still begins before `repeat_until`. Without a
/// recurrence cadence, a single window covering the keep-open period is
/// produced. The sequence is finite and computed fresh per call.
///
/// `repeat_until` earlier than `start_date` yields no windows at all:
/// the schedule is expired with no late grace.
#[allow(clippy::too_many_arguments)]
pub fn enumerate_windows(
    keep_open_term: i64,
    keep_open_interval: Option<IntervalType>,
    start_date: DateTime<Utc>,
    every_term: i64,
    every_interval: Option<IntervalType>,
    late_term: i64,
    late_interval: Option<IntervalType>,
    repeat_until: Option<DateTime<Utc>>,
) -> Vec<AvailabilityWindow> {
    let mut windows = Vec::new();

    if every_term > 0 && every_interval.is_some() {
        let Some(until) = repeat_until else {
            return windows;
        };
        let bound = compute_close_date(
            start_date,
            keep_open_term,
            keep_open_interval,
            late_term,
            late_interval,
            every_term,
            every_interval,
            repeat_until,
        );

        let mut cursor = start_date;
        while cursor < bound {
            if cursor < until {
                let close_date = advance_by(cursor, keep_open_term, keep_open_interval);
                let grace_date = advance_by(close_date, late_term, late_interval);
                windows.push(AvailabilityWindow {
                    start_date: cursor,
                    close_date,
                    grace_date,
                });
            }
            cursor = advance_by(cursor, every_term, every_interval);
        }
        return windows;
    }

    if keep_open_term > 0 && keep_open_interval.is_some() {
        let close_date = advance_by(start_date, keep_open_term, keep_open_interval);
        let grace_date = advance_by(close_date, late_term, late_interval);
        windows.push(AvailabilityWindow {
            start_date,
            close_date,
            grace_date,
        });
    }

    windows
}
