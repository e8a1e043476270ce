//! Outgoing email: message type, SMTP mailer and the contact notification templates.

pub mod composer;
pub mod mailer;
pub mod message;

pub use composer::{ComposedEmail, NotificationComposer};
pub use mailer::{Mailer, SmtpMailer};
pub use message::EmailMessage;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MailError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),

    #[error("timed out after {0}s")]
    Timeout(u64),

    #[error("failed to render template: {0}")]
    Template(String),
}

/// Result of a single send attempt. Delivery failures never escape the mailer
/// as errors; they are reported here and in the logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed(MailError),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }

    pub fn failure(&self) -> Option<&MailError> {
        match self {
            DeliveryOutcome::Delivered => None,
            DeliveryOutcome::Failed(reason) => Some(reason),
        }
    }
}
