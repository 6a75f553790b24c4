//! The schedule configuration attached to a form.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

use super::IntervalType;

/// How a form's submission window is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleType {
    /// Open from the open date onward; closed by hand, never by the clock.
    Manual,
    /// Open until a fixed close date.
    ClosingDate,
    /// Open for a keep-open period, optionally repeating on a cadence.
    Period,
}

impl ScheduleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleType::Manual => "manual",
            ScheduleType::ClosingDate => "closingDate",
            ScheduleType::Period => "period",
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleType {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(ScheduleType::Manual),
            "closingDate" => Ok(ScheduleType::ClosingDate),
            "period" => Ok(ScheduleType::Period),
            other => Err(ScheduleError::validation(
                "scheduleType",
                format!("unknown schedule type '{other}', expected manual|closingDate|period"),
            )),
        }
    }
}

/// A form's complete schedule configuration, immutable per evaluation.
///
/// Owned by exactly one form record; created and updated alongside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSchedule {
    pub enabled: bool,
    pub schedule_type: Option<ScheduleType>,
    pub open_submission_date_time: Option<DateTime<Utc>>,
    /// Fixed close date; only meaningful for [`ScheduleType::ClosingDate`].
    pub close_submission_date_time: Option<DateTime<Utc>>,
    pub keep_open_for_term: Option<i64>,
    pub keep_open_for_interval: Option<IntervalType>,
    pub closing_message_enabled: bool,
    pub closing_message: Option<String>,
    pub repeat_submission: RepeatSubmission,
    pub allow_late_submissions: LateSubmissionConfig,
}

/// Recurrence cadence: re-open every `everyTerm` units until `repeatUntil`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepeatSubmission {
    pub enabled: bool,
    pub every_term: Option<i64>,
    pub every_interval_type: Option<IntervalType>,
    pub repeat_until: Option<DateTime<Utc>>,
}

/// Grace window during which late submissions are still accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LateSubmissionConfig {
    pub enabled: bool,
    pub for_next: LateSubmissionWindow,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LateSubmissionWindow {
    pub term: Option<i64>,
    pub interval_type: Option<IntervalType>,
}

impl FormSchedule {
    /// Keep-open length in term units, 0 when unset.
    pub fn keep_open_term(&self) -> i64 {
        self.keep_open_for_term.unwrap_or(0)
    }

    /// Late-grace length; 0 whenever late submissions are disabled, so the
    /// close-date math never sees a grace term that isn't in force.
    pub fn late_term(&self) -> i64 {
        if self.allow_late_submissions.enabled {
            self.allow_late_submissions.for_next.term.unwrap_or(0)
        } else {
            0
        }
    }

    pub fn late_interval(&self) -> Option<IntervalType> {
        self.allow_late_submissions.for_next.interval_type
    }

    /// Recurrence step length in term units, 0 when unset.
    pub fn repeat_term(&self) -> i64 {
        self.repeat_submission.every_term.unwrap_or(0)
    }

    pub fn repeat_interval(&self) -> Option<IntervalType> {
        self.repeat_submission.every_interval_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_camel_case_config() {
        let schedule: FormSchedule = serde_json::from_str(
            r#"{
                "enabled": true,
                "scheduleType": "period",
                "openSubmissionDateTime": "2024-01-01T00:00:00Z",
                "keepOpenForTerm": 30,
                "keepOpenForInterval": "days",
                "repeatSubmission": {
                    "enabled": true,
                    "everyTerm": 1,
                    "everyIntervalType": "months",
                    "repeatUntil": "2024-06-01T00:00:00Z"
                },
                "allowLateSubmissions": {
                    "enabled": true,
                    "forNext": { "term": 7, "intervalType": "days" }
                }
            }"#,
        )
        .unwrap();

        assert!(schedule.enabled);
        assert_eq!(schedule.schedule_type, Some(ScheduleType::Period));
        assert_eq!(schedule.keep_open_term(), 30);
        assert_eq!(schedule.repeat_term(), 1);
        assert_eq!(schedule.repeat_interval(), Some(IntervalType::Months));
        assert_eq!(schedule.late_term(), 7);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let schedule: FormSchedule = serde_json::from_str(r#"{ "enabled": false }"#).unwrap();
        assert!(!schedule.enabled);
        assert_eq!(schedule.schedule_type, None);
        assert_eq!(schedule.keep_open_term(), 0);
        assert!(!schedule.repeat_submission.enabled);
    }

    #[test]
    fn late_term_gated_by_enabled_flag() {
        let mut schedule = FormSchedule::default();
        schedule.allow_late_submissions.for_next.term = Some(7);
        schedule.allow_late_submissions.for_next.interval_type = Some(IntervalType::Days);

        assert_eq!(schedule.late_term(), 0);
        schedule.allow_late_submissions.enabled = true;
        assert_eq!(schedule.late_term(), 7);
    }

    #[test]
    fn schedule_type_round_trip() {
        for (s, t) in [
            ("manual", ScheduleType::Manual),
            ("closingDate", ScheduleType::ClosingDate),
            ("period", ScheduleType::Period),
        ] {
            assert_eq!(s.parse::<ScheduleType>().unwrap(), t);
            assert_eq!(t.as_str(), s);
        }
        assert!("weekly".parse::<ScheduleType>().is_err());
    }
}
