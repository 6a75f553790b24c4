//! Hosted email relay notifier.
//!
//! Posts rendered messages as JSON to a CHES-style email API
//! (`POST {api_url}/email`) with an optional bearer token. This is the
//! delivery path used in managed environments where direct SMTP is not
//! available.

use forms_core::config::ChesConfig;

use crate::traits::{Notification, Notifier, NotifyError};

/// Delivers notifications through a hosted email relay over HTTP.
#[derive(Debug)]
pub struct ChesNotifier {
    api_url: String,
    auth_token: Option<String>,
    /// Sender address included in each relay payload.
    from: String,
    client: reqwest::Client,
}

impl ChesNotifier {
    /// Build a relay notifier from config. `api_url` is required.
    pub fn from_config(config: &ChesConfig, from: &str) -> Result<Self, NotifyError> {
        let api_url = config
            .api_url
            .clone()
            .ok_or_else(|| NotifyError::Config("CHES_API_URL is not set".to_string()))?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
            from: from.to_string(),
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait::async_trait]
impl Notifier for ChesNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        if notification.to.is_empty() {
            return Err(NotifyError::Config(
                "at least one recipient is required".to_string(),
            ));
        }

        let payload = serde_json::json!({
            "from": self.from,
            "to": notification.to,
            "subject": notification.subject,
            "body": notification.body,
            "bodyType": "html",
            "priority": notification.priority,
        });

        let mut request = self.client.post(format!("{}/email", self.api_url)).json(&payload);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(
                url = %self.api_url,
                %status,
                body = %body_text,
                "email relay returned non-2xx status"
            );
            return Err(NotifyError::Config(format!(
                "email relay returned {status}: {body_text}"
            )));
        }

        tracing::info!(
            channel = "ches",
            subject = %notification.subject,
            recipients = notification.to.len(),
            "notification accepted by relay"
        );

        Ok(())
    }

    /// Returns `"ches"`.
    fn channel_name(&self) -> &str {
        "ches"
    }
}
