//! The availability state machine.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::ScheduleError;
use crate::schema::{
    advance_by, FormSchedule, ScheduleType, Verdict, MSG_CLOSING_FALLBACK, MSG_EXPIRED_FOR_PERIOD,
    MSG_NOT_YET_OPEN,
};
use crate::validation::validate_schedule;

use super::close_date::compute_close_date;
use super::late::is_late_eligible;
use super::recurrence::enumerate_windows;

/// Evaluate whether `schedule` accepts submissions at `now`.
///
/// Transition order per call:
/// 1. scheduling disabled: open, no message (nothing is enforced)
/// 2. before the open date: expired, "not yet available"
/// 3. manual type: perpetually open once past the open date
/// 4. within `[open, close)`: open. When repeating, the first recurrence
///    window matching `now` decides instead (primary range wins over grace
///    range, earlier windows win over later ones)
/// 5. past the close date: expired, with the grace window checked when
///    late submissions are enabled
///
/// Fails fast with [`ScheduleError::Validation`] on a malformed enabled
/// schedule rather than silently defaulting the date math.
pub fn evaluate(schedule: &FormSchedule, now: DateTime<Utc>) -> Result<Verdict, ScheduleError> {
    if !schedule.enabled {
        return Ok(Verdict::open());
    }

    check_contract(schedule)?;

    // Validated above: an enabled schedule carries open date and type.
    let Some(open_date) = schedule.open_submission_date_time else {
        return Err(ScheduleError::validation(
            "openSubmissionDateTime",
            "required when scheduling is enabled",
        ));
    };
    let Some(schedule_type) = schedule.schedule_type else {
        return Err(ScheduleError::validation(
            "scheduleType",
            "required when scheduling is enabled",
        ));
    };

    if now < open_date {
        return Ok(Verdict::expired(MSG_NOT_YET_OPEN));
    }

    if schedule_type == ScheduleType::Manual {
        return Ok(Verdict::open());
    }

    let message = closing_message(schedule);

    let close_date = effective_close_date(schedule, schedule_type, open_date)?;
    debug!(
        %open_date,
        %close_date,
        schedule_type = %schedule_type,
        "evaluating availability"
    );

    if now < close_date {
        if !schedule.repeat_submission.enabled {
            return Ok(Verdict::open());
        }

        let windows = enumerate_windows(
            schedule.keep_open_term(),
            schedule.keep_open_for_interval,
            open_date,
            schedule.repeat_term(),
            schedule.repeat_interval(),
            schedule.late_term(),
            schedule.late_interval(),
            schedule.repeat_submission.repeat_until,
        );

        // First match wins; an earlier window's grace range can shadow a
        // later window's primary range when the grace term exceeds the
        // cadence. Downstream behavior depends on this ordering.
        for window in &windows {
            if window.contains(now) {
                return Ok(Verdict::open());
            }
            if schedule.allow_late_submissions.enabled && window.in_grace(now) {
                return Ok(Verdict::expired_in_grace(message));
            }
        }
        return Ok(Verdict::expired(message));
    }

    if schedule.allow_late_submissions.enabled
        && is_late_eligible(now, close_date, schedule.late_term(), schedule.late_interval())
    {
        return Ok(Verdict::expired_in_grace(message));
    }

    Ok(Verdict::expired(message))
}

/// The close bound that splits "in range" from "past the period".
///
/// For a repeating period the stacked recurrence bound gates the window
/// scan, so windows whose grace runs past `repeatUntil` are still reachable.
/// Without repetition the period ends at `open + keepOpenFor` — the grace
/// interval beyond it belongs to the late-eligibility check alone, never to
/// the open range.
fn effective_close_date(
    schedule: &FormSchedule,
    schedule_type: ScheduleType,
    open_date: DateTime<Utc>,
) -> Result<DateTime<Utc>, ScheduleError> {
    match schedule_type {
        ScheduleType::ClosingDate => {
            schedule
                .close_submission_date_time
                .ok_or_else(|| {
                    ScheduleError::validation(
                        "closeSubmissionDateTime",
                        "required for the closingDate schedule type",
                    )
                })
        }
        ScheduleType::Period => {
            if schedule.repeat_submission.enabled {
                Ok(compute_close_date(
                    open_date,
                    schedule.keep_open_term(),
                    schedule.keep_open_for_interval,
                    schedule.late_term(),
                    schedule.late_interval(),
                    schedule.repeat_term(),
                    schedule.repeat_interval(),
                    schedule.repeat_submission.repeat_until,
                ))
            } else {
                Ok(advance_by(
                    open_date,
                    schedule.keep_open_term(),
                    schedule.keep_open_for_interval,
                ))
            }
        }
        ScheduleType::Manual => Ok(open_date),
    }
}

/// Message shown with closed verdicts.
fn closing_message(schedule: &FormSchedule) -> String {
    if schedule.closing_message_enabled {
        match schedule.closing_message.as_deref() {
            Some(msg) if !msg.is_empty() => msg.to_string(),
            _ => MSG_CLOSING_FALLBACK.to_string(),
        }
    } else {
        MSG_EXPIRED_FOR_PERIOD.to_string()
    }
}

/// Fail-fast gate: the first blocking validation error aborts evaluation.
fn check_contract(schedule: &FormSchedule) -> Result<(), ScheduleError> {
    let result = validate_schedule(schedule);
    if let Some(err) = result.errors.into_iter().next() {
        return Err(ScheduleError::Validation {
            path: err.path,
            message: err.message,
        });
    }
    Ok(())
}
