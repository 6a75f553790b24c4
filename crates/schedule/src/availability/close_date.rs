//! Effective close-date computation.

use chrono::{DateTime, Utc};

use crate::schema::{advance_by, IntervalType};

/// Compute the effective close date for a cycle starting at `open_date`.
///
/// - Neither late submission nor repetition configured: `open + keepOpenFor`.
/// - Repetition configured: the recurrence bound `repeat_until` replaces the
///   per-cycle keep-open length.
/// - Late submission configured: the keep-open length plus the grace term are
///   appended on top of whichever base the repeat branch chose.
///
/// The stacking order is intentional: the grace window always extends the
/// close date already picked by the repeat-vs-period branch.
#[allow(clippy::too_many_arguments)]
pub fn compute_close_date(
    open_date: DateTime<Utc>,
    keep_open_term: i64,
    keep_open_interval: Option<IntervalType>,
    late_term: i64,
    late_interval: Option<IntervalType>,
    repeat_term: i64,
    repeat_interval: Option<IntervalType>,
    repeat_until: Option<DateTime<Utc>>,
) -> DateTime<Utc> {
    if late_term <= 0 && repeat_term <= 0 {
        return advance_by(open_date, keep_open_term, keep_open_interval);
    }

    let mut close_date = open_date;

    if repeat_term > 0 && repeat_interval.is_some() {
        if let Some(until) = repeat_until {
            close_date = until;
        }
    }

    if late_term > 0 && late_interval.is_some() {
        close_date = advance_by(close_date, keep_open_term, keep_open_interval);
        close_date = advance_by(close_date, late_term, late_interval);
    }

    close_date
}
