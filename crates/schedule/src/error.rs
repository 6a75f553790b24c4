use thiserror::Error;

/// Errors surfaced by the scheduling engine.
///
/// A malformed schedule is a caller contract violation: the evaluator fails
/// fast instead of silently defaulting, since defaulted interval math
/// produces ambiguous close dates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid schedule at {path}: {message}")]
    Validation { path: String, message: String },
}

impl ScheduleError {
    pub fn validation(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Message safe to show to a submitter. Internal field names stay in
    /// logs; callers surface this instead.
    pub fn user_message(&self) -> &'static str {
        match self {
            ScheduleError::Validation { .. } => {
                "This form's schedule is misconfigured. Please contact the form owner."
            }
        }
    }
}
