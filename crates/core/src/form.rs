use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type FormId = Uuid;
pub type SubmissionId = Uuid;

/// A hosted form. The schedule configuration lives in flat columns on the
/// same record and is assembled separately by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
    pub id: FormId,
    pub name: String,
    pub description: Option<String>,
    /// Soft-delete flag; inactive forms are excluded from queries by default.
    pub active: bool,
    /// Addresses notified when a new submission arrives.
    pub submission_received_emails: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single submission against a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSubmission {
    pub id: SubmissionId,
    pub form_id: FormId,
    /// Short human-facing reference quoted in confirmation emails.
    pub confirmation_id: String,
    pub draft: bool,
    pub created_at: DateTime<Utc>,
}

impl Form {
    /// Whether submission-received notifications have anywhere to go.
    pub fn has_received_recipients(&self) -> bool {
        !self.submission_received_emails.is_empty()
    }
}
