//! Late-submission eligibility.

use chrono::{DateTime, Utc};

use crate::schema::IntervalType;

/// Whether `now` lies strictly between `close_date` and
/// `close_date + term(interval)`.
///
/// The grace interval is open on both ends; a zero or absent term is never
/// eligible.
pub fn is_late_eligible(
    now: DateTime<Utc>,
    close_date: DateTime<Utc>,
    term: i64,
    interval: Option<IntervalType>,
) -> bool {
    if term <= 0 {
        return false;
    }
    let Some(unit) = interval else {
        return false;
    };
    let grace_date = unit.advance(close_date, term);
    close_date < now && now < grace_date
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn inside_grace_interval() {
        let close = date("2024-01-31T00:00:00Z");
        assert!(is_late_eligible(
            date("2024-02-02T12:00:00Z"),
            close,
            5,
            Some(IntervalType::Days)
        ));
    }

    #[test]
    fn boundaries_are_exclusive() {
        let close = date("2024-01-31T00:00:00Z");
        assert!(!is_late_eligible(close, close, 5, Some(IntervalType::Days)));
        assert!(!is_late_eligible(
            date("2024-02-05T00:00:00Z"),
            close,
            5,
            Some(IntervalType::Days)
        ));
        // Just inside either end.
        assert!(is_late_eligible(
            date("2024-01-31T00:00:01Z"),
            close,
            5,
            Some(IntervalType::Days)
        ));
        assert!(is_late_eligible(
            date("2024-02-04T23:59:59Z"),
            close,
            5,
            Some(IntervalType::Days)
        ));
    }

    #[test]
    fn zero_or_absent_term_never_eligible() {
        let close = date("2024-01-31T00:00:00Z");
        let now = date("2024-02-01T00:00:00Z");
        assert!(!is_late_eligible(now, close, 0, Some(IntervalType::Days)));
        assert!(!is_late_eligible(now, close, 5, None));
    }

    #[test]
    fn before_close_never_eligible() {
        let close = date("2024-01-31T00:00:00Z");
        assert!(!is_late_eligible(
            date("2024-01-15T00:00:00Z"),
            close,
            5,
            Some(IntervalType::Days)
        ));
    }
}
