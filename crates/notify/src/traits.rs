//! Notifier trait definition and shared error types.

use std::collections::HashMap;
use std::fmt;

/// Errors that can occur during notification delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(String),

    #[error("Template rendering failed: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Delivery priority carried through to the transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => f.write_str("low"),
            Priority::Normal => f.write_str("normal"),
            Priority::High => f.write_str("high"),
        }
    }
}

/// A rendered email ready for delivery.
///
/// Recipients ride on the notification rather than the channel: each email
/// type addresses a different set (assignees, submitters, the form's
/// received-submission list).
#[derive(Debug, Clone, serde::Serialize)]
pub struct Notification {
    /// The rendered subject line.
    pub subject: String,
    /// The rendered HTML body.
    pub body: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    pub priority: Priority,
    /// Additional metadata (e.g., email type, form id).
    pub metadata: HashMap<String, String>,
}

/// Trait for delivery channel implementations.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notification through this channel.
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;

    /// Test connectivity with a sample notification.
    async fn test(&self, to: &str) -> Result<(), NotifyError> {
        let test_notification = Notification {
            subject: "[TEST] Hosted Forms Test".to_string(),
            body: "This is a test notification from the hosted-forms service.".to_string(),
            to: vec![to.to_string()],
            priority: Priority::Normal,
            metadata: HashMap::from([("emailType".to_string(), "test".to_string())]),
        };
        self.send(&test_notification).await
    }

    /// Human-readable name for this channel (e.g., "smtp", "ches").
    fn channel_name(&self) -> &str;
}

/// Result of dispatching a notification to a single channel.
#[derive(Debug)]
pub struct DispatchResult {
    pub channel: String,
    pub email_type: String,
    pub success: bool,
    pub error: Option<String>,
    pub duration_ms: u64,
}
