//! Mailer trait and SMTP implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};

use super::{DeliveryOutcome, EmailMessage, MailError};
use crate::config::MailConfig;

const IMPLICIT_TLS_PORT: u16 = 465;

/// Async email sending.
///
/// Implementors provide [`Mailer::deliver`]; callers use [`Mailer::send_email`],
/// which turns every failure into a logged [`DeliveryOutcome::Failed`].
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    async fn deliver(&self, message: &EmailMessage) -> Result<(), MailError>;

    async fn send_email(&self, message: &EmailMessage) -> DeliveryOutcome {
        match self.deliver(message).await {
            Ok(()) => {
                info!(recipient = %message.to, "Email sent successfully to {}", message.to);
                DeliveryOutcome::Delivered
            }
            Err(reason) => {
                error!(
                    recipient = %message.to,
                    reason = %reason,
                    "Failed to send email to {}: {}",
                    message.to,
                    reason
                );
                DeliveryOutcome::Failed(reason)
            }
        }
    }
}

/// SMTP mailer backed by lettre's Tokio transport.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
    timeout: Duration,
}

impl SmtpMailer {
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let timeout = Duration::from_secs(config.timeout_seconds);

        let mut builder = if !config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        } else if config.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .map_err(|e| MailError::Smtp(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .map_err(|e| MailError::Smtp(e.to_string()))?
        };

        builder = builder.port(config.smtp_port).timeout(Some(timeout));

        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        Ok(Self {
            transport: Arc::new(builder.build()),
            from: config.from_email.clone(),
            timeout,
        })
    }

    /// Build the lettre message: multipart/alternative when a text body is
    /// present, a single HTML part otherwise.
    pub fn build_message(&self, email: &EmailMessage) -> Result<Message, MailError> {
        let from_addr = email.from.as_deref().unwrap_or(&self.from);
        let from: Mailbox = from_addr
            .parse()
            .map_err(|_| MailError::InvalidAddress(from_addr.to_string()))?;

        let to: Mailbox = email
            .to
            .parse()
            .map_err(|_| MailError::InvalidAddress(email.to.clone()))?;

        let builder = Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.as_str());

        let message = match &email.text {
            Some(text) => builder
                .multipart(MultiPart::alternative_plain_html(
                    text.clone(),
                    email.html.clone(),
                ))
                .map_err(|e| MailError::Build(e.to_string()))?,
            None => builder
                .singlepart(SinglePart::html(email.html.clone()))
                .map_err(|e| MailError::Build(e.to_string()))?,
        };

        Ok(message)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn deliver(&self, email: &EmailMessage) -> Result<(), MailError> {
        let message = self.build_message(email)?;

        match tokio::time::timeout(self.timeout, self.transport.send(message)).await {
            Ok(Ok(_response)) => Ok(()),
            Ok(Err(e)) => Err(MailError::Smtp(e.to_string())),
            Err(_) => Err(MailError::Timeout(self.timeout.as_secs())),
        }
    }
}
