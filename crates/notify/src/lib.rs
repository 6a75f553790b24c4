//! Email notification service for submission-lifecycle events.
//!
//! This crate provides:
//! - `Notifier` trait for pluggable delivery channels
//! - SMTP (lettre) and hosted-relay (CHES-style HTTP) notifier implementations
//! - Minijinja template rendering for email subject/body content
//! - Per-email-type template/recipient composition
//! - Dispatcher that routes rendered emails to configured channels
//! - Reminder selection over a form's current availability window
//!
//! The composer picks templates and recipient lists; it never reasons about
//! time. Close dates arrive pre-formatted from the reminder report.

pub mod ches;
pub mod composer;
pub mod dispatcher;
pub mod email;
pub mod reminder;
pub mod templating;
pub mod traits;

pub use composer::EmailType;
pub use dispatcher::Dispatcher;
pub use traits::{Notification, Notifier, NotifyError};
