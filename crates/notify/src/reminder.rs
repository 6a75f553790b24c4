//! Reminder selection over a form's current availability window.
//!
//! Decides which reminder email (if any) applies right now: the window's
//! opening day, the final day before close, or a mid-period nudge. The
//! resulting report carries pre-formatted dates so the composer and
//! templates never touch date arithmetic.

use chrono::{DateTime, Duration, Utc};

use forms_schedule::availability::{enumerate_windows, AvailabilityWindow};
use forms_schedule::schema::NamedPeriod;
use forms_schedule::{evaluate, FormSchedule, ScheduleError, ScheduleType};

use crate::composer::EmailType;

/// What to remind about for the submission window containing "now".
#[derive(Debug, Clone)]
pub struct ReminderReport {
    pub email_type: EmailType,
    pub window: AvailabilityWindow,
    /// Close date pre-formatted for email templates.
    pub close_date_text: String,
    /// Named cadence when the repeat configuration matches one.
    pub cadence: Option<NamedPeriod>,
}

/// Pick the reminder email type for `schedule` at `now`, if any applies.
///
/// Returns `None` when no reminder is due: scheduling disabled, a
/// non-period schedule, or `now` outside every submission window. A
/// malformed enabled schedule is an error, mirroring the evaluator's
/// fail-fast contract.
pub fn select_reminder(
    schedule: &FormSchedule,
    now: DateTime<Utc>,
) -> Result<Option<ReminderReport>, ScheduleError> {
    if !schedule.enabled || schedule.schedule_type != Some(ScheduleType::Period) {
        return Ok(None);
    }

    // The verdict decides whether anything is worth reminding about; this
    // layer only picks which email fits the current window.
    let verdict = evaluate(schedule, now)?;
    if verdict.expired {
        return Ok(None);
    }

    let Some(open_date) = schedule.open_submission_date_time else {
        return Ok(None);
    };

    let windows = enumerate_windows(
        schedule.keep_open_term(),
        schedule.keep_open_for_interval,
        open_date,
        if schedule.repeat_submission.enabled {
            schedule.repeat_term()
        } else {
            0
        },
        schedule.repeat_interval(),
        schedule.late_term(),
        schedule.late_interval(),
        schedule.repeat_submission.repeat_until,
    );

    let Some(window) = windows.into_iter().find(|w| w.contains(now)) else {
        return Ok(None);
    };

    let email_type = if now.date_naive() == window.start_date.date_naive() {
        EmailType::ReminderFormOpen
    } else if now >= window.close_date - Duration::days(1) {
        EmailType::ReminderFormWillClose
    } else {
        EmailType::ReminderFormNotFill
    };

    let cadence = schedule
        .repeat_interval()
        .and_then(|interval| NamedPeriod::from_cadence(schedule.repeat_term(), interval));

    Ok(Some(ReminderReport {
        email_type,
        close_date_text: window.close_date.format("%Y-%m-%d").to_string(),
        window,
        cadence,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    /// Monthly repeating schedule: 5-day windows from 2024-01-01 to 2024-06-01.
    fn monthly_schedule() -> FormSchedule {
        serde_json::from_str(
            r#"{
                "enabled": true,
                "scheduleType": "period",
                "openSubmissionDateTime": "2024-01-01T00:00:00Z",
                "keepOpenForTerm": 5,
                "keepOpenForInterval": "days",
                "repeatSubmission": {
                    "enabled": true,
                    "everyTerm": 1,
                    "everyIntervalType": "months",
                    "repeatUntil": "2024-06-01T00:00:00Z"
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn opening_day_selects_form_open() {
        let report = select_reminder(&monthly_schedule(), date("2024-03-01T10:00:00Z"))
            .unwrap()
            .unwrap();
        assert_eq!(report.email_type, EmailType::ReminderFormOpen);
        assert_eq!(report.close_date_text, "2024-03-06");
        assert_eq!(report.cadence, Some(NamedPeriod::Monthly));
    }

    #[test]
    fn mid_window_selects_not_fill() {
        let report = select_reminder(&monthly_schedule(), date("2024-03-03T00:00:00Z"))
            .unwrap()
            .unwrap();
        assert_eq!(report.email_type, EmailType::ReminderFormNotFill);
    }

    #[test]
    fn final_day_selects_will_close() {
        let report = select_reminder(&monthly_schedule(), date("2024-03-05T12:00:00Z"))
            .unwrap()
            .unwrap();
        assert_eq!(report.email_type, EmailType::ReminderFormWillClose);
    }

    #[test]
    fn between_windows_selects_nothing() {
        assert!(select_reminder(&monthly_schedule(), date("2024-03-15T00:00:00Z"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn disabled_schedule_selects_nothing() {
        let mut schedule = monthly_schedule();
        schedule.enabled = false;
        assert!(select_reminder(&schedule, date("2024-03-03T00:00:00Z"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn manual_schedule_selects_nothing() {
        let mut schedule = monthly_schedule();
        schedule.schedule_type = Some(ScheduleType::Manual);
        assert!(select_reminder(&schedule, date("2024-03-03T00:00:00Z"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn single_window_period_gets_reminders_too() {
        let schedule: FormSchedule = serde_json::from_str(
            r#"{
                "enabled": true,
                "scheduleType": "period",
                "openSubmissionDateTime": "2024-01-01T00:00:00Z",
                "keepOpenForTerm": 30,
                "keepOpenForInterval": "days"
            }"#,
        )
        .unwrap();
        let report = select_reminder(&schedule, date("2024-01-15T00:00:00Z"))
            .unwrap()
            .unwrap();
        assert_eq!(report.email_type, EmailType::ReminderFormNotFill);
        assert_eq!(report.cadence, None);
    }

    #[test]
    fn malformed_schedule_is_an_error() {
        let mut schedule = monthly_schedule();
        schedule.repeat_submission.repeat_until = None;
        assert!(select_reminder(&schedule, date("2024-03-03T00:00:00Z")).is_err());
    }

    #[test]
    fn unknown_cadence_has_no_named_period() {
        let mut schedule = monthly_schedule();
        schedule.repeat_submission.every_term = Some(2);
        let report = select_reminder(&schedule, date("2024-01-03T00:00:00Z"))
            .unwrap()
            .unwrap();
        assert_eq!(report.cadence, None);
    }
}
