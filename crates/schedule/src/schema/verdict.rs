//! Availability verdicts returned by the evaluator.

use serde::{Deserialize, Serialize};

/// Shown when the open date is still in the future.
pub const MSG_NOT_YET_OPEN: &str = "This form is not yet available for submission.";
/// Default closed message when no custom closing message is configured.
pub const MSG_EXPIRED_FOR_PERIOD: &str = "This form is expired for the period.";
/// Fallback when a custom closing message is enabled but empty.
pub const MSG_CLOSING_FALLBACK: &str = "Something went wrong.";

/// The outcome of one availability evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// True when the form does not accept a regular submission right now.
    pub expired: bool,
    /// True when `expired` but a late-submission grace window applies.
    pub allow_late_submissions: bool,
    /// User-facing message for closed states; empty while open.
    pub message: String,
}

impl Verdict {
    /// Form accepts submissions; no message applies.
    pub fn open() -> Self {
        Self {
            expired: false,
            allow_late_submissions: false,
            message: String::new(),
        }
    }

    /// Form is closed with no grace exception.
    pub fn expired(message: impl Into<String>) -> Self {
        Self {
            expired: true,
            allow_late_submissions: false,
            message: message.into(),
        }
    }

    /// Form is closed but within its late-submission grace window.
    pub fn expired_in_grace(message: impl Into<String>) -> Self {
        Self {
            expired: true,
            allow_late_submissions: true,
            message: message.into(),
        }
    }
}
