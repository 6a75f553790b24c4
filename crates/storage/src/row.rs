//! Flat form row and its assembly into typed entities.
//!
//! The schedule configuration is persisted as individual `sch*` columns on
//! the form table (term columns are strings, a legacy of the designer UI).
//! Assembly parses them strictly: a malformed term or interval surfaces as
//! [`StorageError::Column`] instead of silently defaulting.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use forms_core::Form;
use forms_schedule::schema::{
    FormSchedule, IntervalType, LateSubmissionConfig, LateSubmissionWindow, RepeatSubmission,
    ScheduleType,
};

use crate::error::StorageError;

/// One row of the `form` table, schedule columns included.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FormRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    #[sqlx(rename = "submissionReceivedEmails")]
    pub submission_received_emails: Vec<String>,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,

    #[sqlx(rename = "schEnabled")]
    pub sch_enabled: bool,
    #[sqlx(rename = "schType")]
    pub sch_type: Option<String>,
    #[sqlx(rename = "schOpenSubmissionDateTime")]
    pub sch_open_submission_date_time: Option<DateTime<Utc>>,
    #[sqlx(rename = "schKeepOpenForTerm")]
    pub sch_keep_open_for_term: Option<String>,
    #[sqlx(rename = "schKeepOpenForInterval")]
    pub sch_keep_open_for_interval: Option<String>,
    #[sqlx(rename = "schCloseSubmissionDateTime")]
    pub sch_close_submission_date_time: Option<DateTime<Utc>>,
    #[sqlx(rename = "schClosingMessageEnabled")]
    pub sch_closing_message_enabled: bool,
    #[sqlx(rename = "schClosingMessage")]
    pub sch_closing_message: Option<String>,
    #[sqlx(rename = "schRepeatEnabled")]
    pub sch_repeat_enabled: bool,
    #[sqlx(rename = "schRepeatEveryTerm")]
    pub sch_repeat_every_term: Option<String>,
    #[sqlx(rename = "schRepeatEveryIntervalType")]
    pub sch_repeat_every_interval_type: Option<String>,
    #[sqlx(rename = "schRepeatUntil")]
    pub sch_repeat_until: Option<DateTime<Utc>>,
    #[sqlx(rename = "schLateSubmissionsEnabled")]
    pub sch_late_submissions_enabled: bool,
    #[sqlx(rename = "schLateSubmissionsForNextTerm")]
    pub sch_late_submissions_for_next_term: Option<String>,
    #[sqlx(rename = "schLateSubmissionsForNextInterval")]
    pub sch_late_submissions_for_next_interval: Option<String>,
}

impl FormRow {
    /// The form entity without its schedule.
    pub fn form(&self) -> Form {
        Form {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            active: self.active,
            submission_received_emails: self.submission_received_emails.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Assemble the typed schedule from the flat columns.
    pub fn schedule(&self) -> Result<FormSchedule, StorageError> {
        Ok(FormSchedule {
            enabled: self.sch_enabled,
            schedule_type: parse_schedule_type("schType", self.sch_type.as_deref())?,
            open_submission_date_time: self.sch_open_submission_date_time,
            close_submission_date_time: self.sch_close_submission_date_time,
            keep_open_for_term: parse_term("schKeepOpenForTerm", self.sch_keep_open_for_term.as_deref())?,
            keep_open_for_interval: parse_interval(
                "schKeepOpenForInterval",
                self.sch_keep_open_for_interval.as_deref(),
            )?,
            closing_message_enabled: self.sch_closing_message_enabled,
            closing_message: self.sch_closing_message.clone(),
            repeat_submission: RepeatSubmission {
                enabled: self.sch_repeat_enabled,
                every_term: parse_term("schRepeatEveryTerm", self.sch_repeat_every_term.as_deref())?,
                every_interval_type: parse_interval(
                    "schRepeatEveryIntervalType",
                    self.sch_repeat_every_interval_type.as_deref(),
                )?,
                repeat_until: self.sch_repeat_until,
            },
            allow_late_submissions: LateSubmissionConfig {
                enabled: self.sch_late_submissions_enabled,
                for_next: LateSubmissionWindow {
                    term: parse_term(
                        "schLateSubmissionsForNextTerm",
                        self.sch_late_submissions_for_next_term.as_deref(),
                    )?,
                    interval_type: parse_interval(
                        "schLateSubmissionsForNextInterval",
                        self.sch_late_submissions_for_next_interval.as_deref(),
                    )?,
                },
            },
        })
    }

    /// Both halves of the record.
    pub fn into_parts(self) -> Result<(Form, FormSchedule), StorageError> {
        let schedule = self.schedule()?;
        Ok((self.form(), schedule))
    }
}

fn parse_term(column: &str, value: Option<&str>) -> Result<Option<i64>, StorageError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| StorageError::column(column, format!("'{raw}' is not an integer"))),
    }
}

fn parse_interval(column: &str, value: Option<&str>) -> Result<Option<IntervalType>, StorageError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<IntervalType>()
            .map(Some)
            .map_err(|e| StorageError::column(column, e.to_string())),
    }
}

fn parse_schedule_type(
    column: &str,
    value: Option<&str>,
) -> Result<Option<ScheduleType>, StorageError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<ScheduleType>()
            .map(Some)
            .map_err(|e| StorageError::column(column, e.to_string())),
    }
}
