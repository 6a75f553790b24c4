//! Minijinja template rendering for email content.
//!
//! Renders email subject and body templates with access to the form,
//! submission links, and pre-formatted schedule dates.
//!
//! Templates are arbitrary strings (not pre-registered files), so a fresh
//! [`minijinja::Environment`] is created per render call.

use forms_core::Form;

use crate::traits::NotifyError;

/// Shared body layout used when an email type has no custom template.
pub const DEFAULT_BODY_TEMPLATE: &str = "\
<h1>{{ title }}</h1>\n\
<p>{{ message_link_text }}</p>\n\
{% if email_content %}<p>{{ email_content }}</p>{% endif %}\n\
{% if confirmation_number %}<p>Confirmation number: {{ confirmation_number }}</p>{% endif %}\n\
<p><a href=\"{{ message_link_url }}\">{{ form.name }}</a></p>\n\
<p><a href=\"{{ all_form_submission_url }}\">View all submissions</a></p>\n";

/// Context data available to email templates.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TemplateContext {
    pub form: FormContext,
    /// Email heading, e.g. `"Winter Survey Accepted"`.
    pub title: String,
    pub message_link_text: String,
    pub message_link_url: String,
    pub all_form_submission_url: String,
    /// Submission reference quoted in confirmation emails.
    pub confirmation_number: Option<String>,
    /// Free-form content supplied by the caller (received-submission mail).
    pub email_content: Option<String>,
    /// Pre-formatted close date for reminder emails. This layer never
    /// computes dates itself.
    pub close_date: Option<String>,
}

/// Form fields exposed to templates.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FormContext {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<&Form> for FormContext {
    fn from(form: &Form) -> Self {
        Self {
            id: form.id.to_string(),
            name: form.name.clone(),
            description: form.description.clone(),
        }
    }
}

/// Renders email templates using minijinja.
///
/// A fresh [`minijinja::Environment`] is created per render call since
/// templates are dynamic strings, not pre-registered files.
#[derive(Debug, Default)]
pub struct TemplateRenderer {
    _private: (),
}

impl TemplateRenderer {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Render a template string with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Template`] if the template is invalid or
    /// rendering fails.
    pub fn render(&self, template_str: &str, ctx: &TemplateContext) -> Result<String, NotifyError> {
        let env = minijinja::Environment::new();
        env.render_str(template_str, ctx)
            .map_err(|e| NotifyError::Template(e.to_string()))
    }

    /// Validate that a template string parses without errors.
    ///
    /// This does not evaluate the template, only checks syntax.
    pub fn validate(&self, template_str: &str) -> Result<(), NotifyError> {
        let env = minijinja::Environment::new();
        env.template_from_str(template_str)
            .map_err(|e| NotifyError::Template(e.to_string()))?;
        Ok(())
    }
}
