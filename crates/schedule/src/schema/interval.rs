//! Calendar interval units and immutable date stepping.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Unit for a schedule term ("keep open for 3 weeks", "repeat every 1 months").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalType {
    Days,
    Weeks,
    Months,
    Years,
}

impl IntervalType {
    /// Step `from` forward by `term` units, returning a fresh value.
    ///
    /// Callers must have validated `term >= 0`; month and year steps use
    /// calendar arithmetic (Jan 31 + 1 month = Feb 28/29).
    pub fn advance(&self, from: DateTime<Utc>, term: i64) -> DateTime<Utc> {
        match self {
            IntervalType::Days => from + Duration::days(term),
            IntervalType::Weeks => from + Duration::weeks(term),
            IntervalType::Months => from + Months::new(term as u32),
            IntervalType::Years => from + Months::new(term as u32 * 12),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalType::Days => "days",
            IntervalType::Weeks => "weeks",
            IntervalType::Months => "months",
            IntervalType::Years => "years",
        }
    }
}

impl fmt::Display for IntervalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntervalType {
    type Err = ScheduleError;

    /// Strict parse: an unknown unit is an error, never a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "days" => Ok(IntervalType::Days),
            "weeks" => Ok(IntervalType::Weeks),
            "months" => Ok(IntervalType::Months),
            "years" => Ok(IntervalType::Years),
            other => Err(ScheduleError::validation(
                "interval",
                format!("unknown interval type '{other}', expected days|weeks|months|years"),
            )),
        }
    }
}

/// Step `from` by `term` units of `interval` when both are present and the
/// term is positive; otherwise the date is returned unchanged.
///
/// This is the totality plumbing for optional schedule parts (no late
/// window configured, no keep-open period) after validation has run.
pub(crate) fn advance_by(
    from: DateTime<Utc>,
    term: i64,
    interval: Option<IntervalType>,
) -> DateTime<Utc> {
    match interval {
        Some(unit) if term > 0 => unit.advance(from, term),
        _ => from,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn advance_days_weeks() {
        let start = date("2024-01-01T00:00:00Z");
        assert_eq!(
            IntervalType::Days.advance(start, 30),
            date("2024-01-31T00:00:00Z")
        );
        assert_eq!(
            IntervalType::Weeks.advance(start, 2),
            date("2024-01-15T00:00:00Z")
        );
    }

    #[test]
    fn advance_months_clamps_to_month_end() {
        let start = date("2024-01-31T00:00:00Z");
        assert_eq!(
            IntervalType::Months.advance(start, 1),
            date("2024-02-29T00:00:00Z")
        );
    }

    #[test]
    fn advance_years() {
        let start = date("2024-03-15T08:00:00Z");
        assert_eq!(
            IntervalType::Years.advance(start, 2),
            date("2026-03-15T08:00:00Z")
        );
    }

    #[test]
    fn advance_returns_fresh_value() {
        let start = date("2024-01-01T00:00:00Z");
        let _ = IntervalType::Days.advance(start, 5);
        assert_eq!(start, date("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn parse_known_units() {
        assert_eq!("days".parse::<IntervalType>().unwrap(), IntervalType::Days);
        assert_eq!(
            "years".parse::<IntervalType>().unwrap(),
            IntervalType::Years
        );
    }

    #[test]
    fn parse_unknown_unit_fails() {
        let err = "fortnights".parse::<IntervalType>().unwrap_err();
        assert!(err.to_string().contains("fortnights"));
    }

    #[test]
    fn advance_by_skips_absent_interval() {
        let start = date("2024-01-01T00:00:00Z");
        assert_eq!(advance_by(start, 5, None), start);
        assert_eq!(advance_by(start, 0, Some(IntervalType::Days)), start);
        assert_eq!(
            advance_by(start, 5, Some(IntervalType::Days)),
            date("2024-01-06T00:00:00Z")
        );
    }
}
