//! Per-email-type template and recipient composition.
//!
//! For each submission-lifecycle event this module picks the body template,
//! subject, link target, and recipient list. It never reasons about time:
//! reminder emails receive their close dates pre-formatted in the
//! [`ReminderReport`](crate::reminder::ReminderReport).

use std::fmt;

use forms_core::{Form, FormSubmission};

use crate::reminder::ReminderReport;
use crate::templating::{FormContext, TemplateContext};
use crate::traits::{NotifyError, Priority};

/// Submission-lifecycle email kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmailType {
    SubmissionAssigned,
    SubmissionUnassigned,
    StatusAssigned,
    StatusCompleted,
    StatusRevising,
    SubmissionReceived,
    SubmissionConfirmation,
    ReminderFormOpen,
    ReminderFormWillClose,
    ReminderFormNotFill,
}

impl EmailType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailType::SubmissionAssigned => "submissionAssigned",
            EmailType::SubmissionUnassigned => "submissionUnassigned",
            EmailType::StatusAssigned => "statusAssigned",
            EmailType::StatusCompleted => "statusCompleted",
            EmailType::StatusRevising => "statusRevising",
            EmailType::SubmissionReceived => "submissionReceived",
            EmailType::SubmissionConfirmation => "submissionConfirmation",
            EmailType::ReminderFormOpen => "reminderFormOpen",
            EmailType::ReminderFormWillClose => "reminderFormWillClose",
            EmailType::ReminderFormNotFill => "reminderFormNotFill",
        }
    }

    pub fn is_reminder(&self) -> bool {
        matches!(
            self,
            EmailType::ReminderFormOpen
                | EmailType::ReminderFormWillClose
                | EmailType::ReminderFormNotFill
        )
    }
}

impl fmt::Display for EmailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Addressing and content supplied by the caller per email type.
#[derive(Debug, Clone, Default)]
pub struct EmailProperties {
    /// Assignee address for draft/status assignment emails.
    pub assignment_notification_email: Option<String>,
    /// Original submitter address for completion/revision emails.
    pub submission_user_email: Option<String>,
    /// Submitter-entered address for confirmation emails.
    pub confirmation_to: Option<String>,
    /// Free-form content forwarded into the body.
    pub email_content: Option<String>,
}

/// A composed email: template selection plus recipients, not yet rendered.
#[derive(Debug, Clone)]
pub struct EmailTemplate {
    pub email_type: EmailType,
    /// Body template file name, overridable per deployment.
    pub body_template: &'static str,
    pub title: String,
    pub subject: String,
    pub message_link_text: String,
    pub priority: Priority,
    pub to: Vec<String>,
    /// Frontend path segment the message link points at.
    pub user_type_path: &'static str,
}

/// Compose a submission-lifecycle email for `form`.
///
/// Fails with [`NotifyError::Config`] when the email type's required
/// recipient is missing. Reminder types are composed by
/// [`build_reminder_template`] instead.
pub fn build_email_template(
    form: &Form,
    email_type: EmailType,
    props: &EmailProperties,
) -> Result<EmailTemplate, NotifyError> {
    let template = match email_type {
        EmailType::SubmissionAssigned => EmailTemplate {
            email_type,
            body_template: "submission-assigned.html",
            title: format!("Invited to {} Draft", form.name),
            subject: "Invited to Submission Draft".to_string(),
            message_link_text: format!(
                "You have been invited to a {} submission draft. You can review your submission draft details by visiting the following links:",
                form.name
            ),
            priority: Priority::Normal,
            to: vec![require(props.assignment_notification_email.as_ref(), email_type)?],
            user_type_path: "user/view",
        },
        EmailType::SubmissionUnassigned => EmailTemplate {
            email_type,
            body_template: "submission-unassigned.html",
            title: format!("Uninvited From {} Draft", form.name),
            subject: "Uninvited From Submission Draft".to_string(),
            message_link_text: format!(
                "You have been uninvited from {} submission draft.",
                form.name
            ),
            priority: Priority::Normal,
            to: vec![require(props.assignment_notification_email.as_ref(), email_type)?],
            user_type_path: "user/view",
        },
        EmailType::StatusAssigned => EmailTemplate {
            email_type,
            body_template: "send-status-assigned-email-body.html",
            title: format!("{} Submission Assignment", form.name),
            subject: "Form Submission Assignment".to_string(),
            message_link_text: format!(
                "You have been assigned to a {} submission. Please login to review it.",
                form.name
            ),
            priority: Priority::Normal,
            to: vec![require(props.assignment_notification_email.as_ref(), email_type)?],
            user_type_path: "form/view",
        },
        EmailType::StatusCompleted => EmailTemplate {
            email_type,
            body_template: "submission-completed.html",
            title: format!("{} Has Been Completed", form.name),
            subject: "Form Has Been Completed".to_string(),
            message_link_text: format!("Your submission from {} has been Completed.", form.name),
            priority: Priority::Normal,
            to: vec![require(props.submission_user_email.as_ref(), email_type)?],
            user_type_path: "user/view",
        },
        EmailType::StatusRevising => EmailTemplate {
            email_type,
            body_template: "send-status-revising-email-body.html",
            title: format!("{} Submission Revision Requested", form.name),
            subject: "Form Submission Revision Request".to_string(),
            message_link_text: format!(
                "You have been asked to revise a {} submission. Please login to review it.",
                form.name
            ),
            priority: Priority::Normal,
            to: vec![require(props.submission_user_email.as_ref(), email_type)?],
            user_type_path: "user/view",
        },
        EmailType::SubmissionReceived => {
            if !form.has_received_recipients() {
                return Err(NotifyError::Config(format!(
                    "form '{}' has no submission-received recipients",
                    form.id
                )));
            }
            EmailTemplate {
                email_type,
                body_template: "submission-confirmation.html",
                title: format!("{} Submission", form.name),
                subject: format!("{} Submission", form.name),
                message_link_text: format!(
                    "There is a new {} submission. Please login to review it.",
                    form.name
                ),
                priority: Priority::Normal,
                to: form.submission_received_emails.clone(),
                user_type_path: "form/view",
            }
        }
        EmailType::SubmissionConfirmation => EmailTemplate {
            email_type,
            body_template: "submission-received-confirmation.html",
            title: format!("{} Accepted", form.name),
            subject: format!("{} Accepted", form.name),
            message_link_text: format!(
                "Thank you for your {} submission. You can view your submission details by visiting the following links:",
                form.name
            ),
            priority: Priority::Normal,
            to: vec![require(props.confirmation_to.as_ref(), email_type)?],
            user_type_path: "form/success",
        },
        reminder => {
            return Err(NotifyError::Config(format!(
                "{reminder} is composed from a reminder report, not email properties"
            )));
        }
    };

    Ok(template)
}

/// Compose a reminder email from the current-window report.
pub fn build_reminder_template(
    form: &Form,
    report: &ReminderReport,
    to: Vec<String>,
) -> Result<EmailTemplate, NotifyError> {
    if to.is_empty() {
        return Err(NotifyError::Config(format!(
            "no reminder recipients for form '{}'",
            form.id
        )));
    }

    let close_date = &report.close_date_text;
    let template = match report.email_type {
        EmailType::ReminderFormOpen => EmailTemplate {
            email_type: report.email_type,
            body_template: "reminder-form-open.html",
            title: format!("Submission Start for {}", form.name),
            subject: "Submission open".to_string(),
            message_link_text: format!(
                "A new submission period for {} is now open. You have until {close_date} to submit your information.",
                form.name
            ),
            priority: Priority::Normal,
            to,
            user_type_path: "form/view",
        },
        EmailType::ReminderFormNotFill => EmailTemplate {
            email_type: report.email_type,
            body_template: "reminder-form-not-fill.html",
            title: format!("Submission Reminder for {}", form.name),
            subject: "Submission Reminder".to_string(),
            message_link_text: format!(
                "This is a reminder to submit your {} data before the end of the submission period on {close_date}.",
                form.name
            ),
            priority: Priority::Normal,
            to,
            user_type_path: "form/view",
        },
        EmailType::ReminderFormWillClose => EmailTemplate {
            email_type: report.email_type,
            body_template: "reminder-form-will-close.html",
            title: format!("Submission Closing for {}", form.name),
            subject: "Submission closing soon".to_string(),
            message_link_text: format!(
                "The submission period for {} closes on {close_date}. Don't forget to submit your information before then.",
                form.name
            ),
            priority: Priority::High,
            to,
            user_type_path: "form/view",
        },
        other => {
            return Err(NotifyError::Config(format!(
                "{other} is not a reminder email type"
            )));
        }
    };

    Ok(template)
}

/// Build the render context for a composed email.
///
/// `base_url` is the public frontend origin the message links point back at.
pub fn template_context(
    form: &Form,
    template: &EmailTemplate,
    base_url: &str,
    submission: Option<&FormSubmission>,
    props: &EmailProperties,
    close_date: Option<String>,
) -> TemplateContext {
    let base = base_url.trim_end_matches('/');
    let message_link_url = match submission {
        Some(submission) => format!("{base}/{}?s={}", template.user_type_path, submission.id),
        None => format!("{base}/{}?f={}", template.user_type_path, form.id),
    };

    TemplateContext {
        form: FormContext::from(form),
        title: template.title.clone(),
        message_link_text: template.message_link_text.clone(),
        message_link_url,
        all_form_submission_url: format!("{base}/user/submissions?f={}", form.id),
        confirmation_number: submission.map(|s| s.confirmation_id.clone()),
        email_content: props.email_content.clone(),
        close_date,
    }
}

fn require(value: Option<&String>, email_type: EmailType) -> Result<String, NotifyError> {
    value.cloned().ok_or_else(|| {
        NotifyError::Config(format!("missing required recipient for {email_type}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use forms_schedule::availability::AvailabilityWindow;
    use uuid::Uuid;

    fn sample_form() -> Form {
        Form {
            id: Uuid::new_v4(),
            name: "Winter Survey".to_string(),
            description: None,
            active: true,
            submission_received_emails: vec!["reviewer@example.com".to_string()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_report(email_type: EmailType) -> ReminderReport {
        let start = "2024-03-01T00:00:00Z".parse().unwrap();
        let close = "2024-03-06T00:00:00Z".parse().unwrap();
        ReminderReport {
            email_type,
            window: AvailabilityWindow {
                start_date: start,
                close_date: close,
                grace_date: close,
            },
            close_date_text: "2024-03-06".to_string(),
            cadence: None,
        }
    }

    #[test]
    fn submission_received_uses_form_recipients() {
        let form = sample_form();
        let template =
            build_email_template(&form, EmailType::SubmissionReceived, &EmailProperties::default())
                .unwrap();
        assert_eq!(template.to, vec!["reviewer@example.com"]);
        assert_eq!(template.body_template, "submission-confirmation.html");
        assert!(template.subject.contains("Winter Survey"));
    }

    #[test]
    fn submission_received_without_recipients_fails() {
        let mut form = sample_form();
        form.submission_received_emails.clear();
        let result =
            build_email_template(&form, EmailType::SubmissionReceived, &EmailProperties::default());
        assert!(result.is_err());
    }

    #[test]
    fn status_assigned_requires_assignee_address() {
        let form = sample_form();
        let err = build_email_template(&form, EmailType::StatusAssigned, &EmailProperties::default())
            .unwrap_err();
        assert!(err.to_string().contains("statusAssigned"));

        let props = EmailProperties {
            assignment_notification_email: Some("assignee@example.com".to_string()),
            ..EmailProperties::default()
        };
        let template = build_email_template(&form, EmailType::StatusAssigned, &props).unwrap();
        assert_eq!(template.to, vec!["assignee@example.com"]);
        assert_eq!(template.user_type_path, "form/view");
    }

    #[test]
    fn confirmation_addresses_the_submitter() {
        let form = sample_form();
        let props = EmailProperties {
            confirmation_to: Some("citizen@example.com".to_string()),
            ..EmailProperties::default()
        };
        let template =
            build_email_template(&form, EmailType::SubmissionConfirmation, &props).unwrap();
        assert_eq!(template.to, vec!["citizen@example.com"]);
        assert_eq!(template.user_type_path, "form/success");
        assert_eq!(template.title, "Winter Survey Accepted");
    }

    #[test]
    fn reminder_types_rejected_by_lifecycle_builder() {
        let form = sample_form();
        let result =
            build_email_template(&form, EmailType::ReminderFormOpen, &EmailProperties::default());
        assert!(result.is_err());
    }

    #[test]
    fn reminder_template_interpolates_close_date() {
        let form = sample_form();
        let template = build_reminder_template(
            &form,
            &sample_report(EmailType::ReminderFormWillClose),
            vec!["submitter@example.com".to_string()],
        )
        .unwrap();
        assert!(template.message_link_text.contains("2024-03-06"));
        assert_eq!(template.priority, Priority::High);
        assert_eq!(template.body_template, "reminder-form-will-close.html");
    }

    #[test]
    fn reminder_without_recipients_fails() {
        let form = sample_form();
        let result =
            build_reminder_template(&form, &sample_report(EmailType::ReminderFormOpen), vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn context_links_point_at_the_frontend() {
        let form = sample_form();
        let props = EmailProperties {
            confirmation_to: Some("citizen@example.com".to_string()),
            ..EmailProperties::default()
        };
        let template =
            build_email_template(&form, EmailType::SubmissionConfirmation, &props).unwrap();
        let submission = FormSubmission {
            id: Uuid::new_v4(),
            form_id: form.id,
            confirmation_id: "3A9E517B".to_string(),
            draft: false,
            created_at: Utc::now(),
        };

        let ctx = template_context(
            &form,
            &template,
            "https://forms.example.com/app/",
            Some(&submission),
            &props,
            None,
        );
        assert_eq!(
            ctx.message_link_url,
            format!("https://forms.example.com/app/form/success?s={}", submission.id)
        );
        assert_eq!(
            ctx.all_form_submission_url,
            format!("https://forms.example.com/app/user/submissions?f={}", form.id)
        );
        assert_eq!(ctx.confirmation_number.as_deref(), Some("3A9E517B"));
    }

    #[test]
    fn email_type_labels() {
        assert_eq!(EmailType::SubmissionReceived.as_str(), "submissionReceived");
        assert!(EmailType::ReminderFormNotFill.is_reminder());
        assert!(!EmailType::StatusCompleted.is_reminder());
    }
}
