//! Structured schedule validation with path-tagged errors and warnings.
//!
//! Errors block evaluation (the evaluator fails fast on the first one);
//! warnings are advisory and cover configurations that are deterministic
//! but almost certainly not what the form designer meant.

use serde::{Deserialize, Serialize};

use crate::schema::{FormSchedule, ScheduleType};

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A blocking validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field location, e.g. `"repeatSubmission.repeatUntil"`.
    pub path: String,
    pub message: String,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationResult {
    fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate a schedule configuration.
///
/// A disabled schedule is always valid — nothing is enforced for it.
pub fn validate_schedule(schedule: &FormSchedule) -> ValidationResult {
    let mut result = ValidationResult::new();
    if !schedule.enabled {
        return result;
    }

    check_required_fields(schedule, &mut result);
    check_terms(schedule, &mut result);
    check_repeat(schedule, &mut result);

    result
}

fn check_required_fields(schedule: &FormSchedule, result: &mut ValidationResult) {
    if schedule.open_submission_date_time.is_none() {
        result.error(
            "openSubmissionDateTime",
            "required when scheduling is enabled",
        );
    }
    match schedule.schedule_type {
        None => result.error("scheduleType", "required when scheduling is enabled"),
        Some(ScheduleType::ClosingDate) if schedule.close_submission_date_time.is_none() => {
            result.error(
                "closeSubmissionDateTime",
                "required for the closingDate schedule type",
            );
        }
        Some(ScheduleType::Period) if schedule.keep_open_for_term.is_none() => {
            result.warn(
                "keepOpenForTerm",
                "period schedule without a keep-open length closes at its open date",
            );
        }
        _ => {}
    }
}

/// Terms must be non-negative, and a positive term needs its interval unit.
fn check_terms(schedule: &FormSchedule, result: &mut ValidationResult) {
    let pairs = [
        (
            "keepOpenForTerm",
            "keepOpenForInterval",
            schedule.keep_open_for_term,
            schedule.keep_open_for_interval,
        ),
        (
            "repeatSubmission.everyTerm",
            "repeatSubmission.everyIntervalType",
            schedule.repeat_submission.every_term,
            schedule.repeat_submission.every_interval_type,
        ),
        (
            "allowLateSubmissions.forNext.term",
            "allowLateSubmissions.forNext.intervalType",
            schedule.allow_late_submissions.for_next.term,
            schedule.allow_late_submissions.for_next.interval_type,
        ),
    ];

    for (term_path, interval_path, term, interval) in pairs {
        match term {
            Some(t) if t < 0 => result.error(term_path, format!("must be non-negative, got {t}")),
            Some(t) if t > 0 && interval.is_none() => {
                result.error(interval_path, format!("required when {term_path} is set"));
            }
            _ => {}
        }
    }
}

fn check_repeat(schedule: &FormSchedule, result: &mut ValidationResult) {
    let repeat = &schedule.repeat_submission;
    if !repeat.enabled {
        return;
    }

    match repeat.repeat_until {
        None => result.error(
            "repeatSubmission.repeatUntil",
            "required when repetition is enabled",
        ),
        Some(until) => {
            if let Some(open) = schedule.open_submission_date_time {
                if until < open {
                    // Deterministically empty recurrence, not a hard error.
                    result.warn(
                        "repeatSubmission.repeatUntil",
                        "before openSubmissionDateTime; no submission windows will be produced",
                    );
                }
            }
        }
    }

    if repeat.every_term.unwrap_or(0) == 0 {
        result.warn(
            "repeatSubmission.everyTerm",
            "repetition enabled without a cadence; no submission windows will be produced",
        );
    }
}
