//! SMTP email notifier via `lettre` with TLS support.
//!
//! Delivers notifications as emails through an SMTP server.
//! Supports STARTTLS and implicit TLS connections.

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::traits::{Notification, Notifier, NotifyError};

/// Sends notifications as emails via SMTP.
///
/// Recipients come from each [`Notification`]; only the sender mailbox is
/// fixed at construction.
#[derive(Debug)]
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailNotifier {
    /// Build an `EmailNotifier` from SMTP configuration.
    ///
    /// - `smtp_host`: SMTP server hostname.
    /// - `smtp_port`: Optional port (defaults to 587; port 465 always uses
    ///   implicit TLS).
    /// - `tls`: Whether to use STARTTLS. `None` enables it.
    /// - `from`: Sender address (e.g. `"Hosted Forms <no-reply@example.com>"`).
    ///
    /// SMTP credentials are resolved from the `SMTP_USERNAME` and
    /// `SMTP_PASSWORD` environment variables; if both are set they are passed
    /// to the transport, otherwise the connection is unauthenticated.
    pub fn from_config(
        smtp_host: &str,
        smtp_port: Option<u16>,
        tls: Option<bool>,
        from: &str,
    ) -> Result<Self, NotifyError> {
        let from_mailbox: Mailbox = from
            .parse()
            .map_err(|e: lettre::address::AddressError| NotifyError::Config(e.to_string()))?;

        let port = smtp_port.unwrap_or(587);
        let use_tls = tls.unwrap_or(true);

        let mut builder = if port == 465 || use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(smtp_host)
                .map_err(|e| NotifyError::Config(e.to_string()))?
                .port(port)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(smtp_host).port(port)
        };

        if let (Ok(username), Ok(password)) =
            (std::env::var("SMTP_USERNAME"), std::env::var("SMTP_PASSWORD"))
        {
            builder = builder.credentials(Credentials::new(username, password));
        }

        Ok(Self {
            transport: builder.build(),
            from: from_mailbox,
        })
    }
}

#[async_trait::async_trait]
impl Notifier for EmailNotifier {
    /// Send a notification email to all recipients on the notification.
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        if notification.to.is_empty() {
            return Err(NotifyError::Config(
                "at least one recipient is required".to_string(),
            ));
        }

        let mut message_builder = Message::builder().from(self.from.clone());

        for recipient in &notification.to {
            let mailbox: Mailbox = recipient
                .parse()
                .map_err(|e: lettre::address::AddressError| {
                    NotifyError::Config(format!("invalid recipient '{recipient}': {e}"))
                })?;
            message_builder = message_builder.to(mailbox);
        }

        let email = message_builder
            .subject(&notification.subject)
            .header(ContentType::TEXT_HTML)
            .body(notification.body.clone())
            .map_err(|e| NotifyError::Smtp(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| NotifyError::Smtp(e.to_string()))?;

        tracing::info!(
            channel = "smtp",
            subject = %notification.subject,
            recipients = notification.to.len(),
            "notification delivered"
        );

        Ok(())
    }

    /// Returns `"smtp"`.
    fn channel_name(&self) -> &str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Priority;
    use std::collections::HashMap;

    #[test]
    fn parse_valid_email_address() {
        let mailbox: Result<Mailbox, _> = "alice@example.com".parse();
        assert!(mailbox.is_ok());
    }

    #[test]
    fn parse_email_with_display_name() {
        let mailbox: Mailbox = "Alice <alice@example.com>".parse().unwrap();
        assert_eq!(mailbox.email.to_string(), "alice@example.com");
    }

    #[test]
    fn from_config_valid() {
        let notifier =
            EmailNotifier::from_config("smtp.example.com", Some(587), Some(true), "no-reply@example.com");
        assert!(notifier.is_ok());
    }

    #[test]
    fn from_config_invalid_from_address() {
        let result = EmailNotifier::from_config("smtp.example.com", None, None, "bad-address");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Configuration error"), "got: {err}");
    }

    #[test]
    fn from_config_implicit_tls_port() {
        let notifier =
            EmailNotifier::from_config("smtp.example.com", Some(465), None, "no-reply@example.com");
        assert!(notifier.is_ok());
    }

    #[test]
    fn from_config_no_tls() {
        let notifier = EmailNotifier::from_config(
            "smtp.example.com",
            Some(25),
            Some(false),
            "no-reply@example.com",
        );
        assert!(notifier.is_ok());
    }

    #[test]
    fn channel_name_is_smtp() {
        let notifier =
            EmailNotifier::from_config("smtp.example.com", Some(587), Some(true), "no-reply@example.com")
                .unwrap();
        assert_eq!(notifier.channel_name(), "smtp");
    }

    #[tokio::test]
    async fn send_with_no_recipients_is_config_error() {
        let notifier =
            EmailNotifier::from_config("smtp.example.com", Some(587), Some(true), "no-reply@example.com")
                .unwrap();
        let notification = Notification {
            subject: "s".to_string(),
            body: "b".to_string(),
            to: vec![],
            priority: Priority::Normal,
            metadata: HashMap::new(),
        };
        let err = notifier.send(&notification).await.unwrap_err();
        assert!(err.to_string().contains("at least one recipient"));
    }
}
