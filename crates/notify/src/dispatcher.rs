//! Routes rendered emails to configured channels.
//!
//! The dispatcher receives a rendered notification and delivers it to all
//! channels configured for that email type. Individual channel failures
//! don't block other channels.

use std::collections::HashMap;

use crate::composer::EmailType;
use crate::traits::{DispatchResult, Notification, Notifier, NotifyError};

/// Dispatches notifications to delivery channels, organized per email type.
pub struct Dispatcher {
    /// Email type → channels overriding the defaults for that type.
    type_channels: HashMap<EmailType, Vec<Box<dyn Notifier>>>,
    /// Fallback channels used when no type-specific channels exist.
    default_channels: Vec<Box<dyn Notifier>>,
}

impl Dispatcher {
    /// Create an empty dispatcher.
    pub fn empty() -> Self {
        Self {
            type_channels: HashMap::new(),
            default_channels: Vec::new(),
        }
    }

    /// Create a dispatcher with channels shared across all email types.
    pub fn with_defaults(channels: Vec<Box<dyn Notifier>>) -> Self {
        Self {
            type_channels: HashMap::new(),
            default_channels: channels,
        }
    }

    /// Replace the channels for a specific email type.
    pub fn set_type_channels(&mut self, email_type: EmailType, channels: Vec<Box<dyn Notifier>>) {
        self.type_channels.insert(email_type, channels);
    }

    /// Dispatch a notification to all channels for its email type.
    ///
    /// Returns results for each channel delivery. Individual failures don't
    /// block other channels.
    pub async fn dispatch(
        &self,
        email_type: EmailType,
        notification: &Notification,
    ) -> Vec<DispatchResult> {
        let channels = self
            .type_channels
            .get(&email_type)
            .unwrap_or(&self.default_channels);

        if channels.is_empty() {
            tracing::debug!(email_type = %email_type, "no delivery channels configured");
            return Vec::new();
        }

        let mut results = Vec::with_capacity(channels.len());

        for channel in channels {
            let start = std::time::Instant::now();
            let result = channel.send(notification).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            let (success, error) = match result {
                Ok(()) => {
                    tracing::info!(
                        email_type = %email_type,
                        channel = channel.channel_name(),
                        duration_ms,
                        "notification delivered"
                    );
                    (true, None)
                }
                Err(e) => {
                    tracing::warn!(
                        email_type = %email_type,
                        channel = channel.channel_name(),
                        error = %e,
                        duration_ms,
                        "notification delivery failed"
                    );
                    (false, Some(e.to_string()))
                }
            };

            results.push(DispatchResult {
                channel: channel.channel_name().to_string(),
                email_type: email_type.as_str().to_string(),
                success,
                error,
                duration_ms,
            });
        }

        results
    }

    /// Send a test notification through a channel by index.
    pub async fn test_channel(
        &self,
        email_type: EmailType,
        channel_index: usize,
        to: &str,
    ) -> Result<(), NotifyError> {
        let channels = self
            .type_channels
            .get(&email_type)
            .unwrap_or(&self.default_channels);

        let channel = channels.get(channel_index).ok_or_else(|| {
            NotifyError::Config(format!("channel index {channel_index} out of range"))
        })?;

        channel.test(to).await
    }
}
