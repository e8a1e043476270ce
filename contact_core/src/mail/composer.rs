//! Bodies for the two emails a contact submission produces.
//!
//! Both emails are askama templates under `templates/emails/`. The HTML
//! bodies are rendered with askama's HTML escaper unless
//! `mail.escape_user_input` is off, in which case the same template is
//! rendered without escaping. Plain-text bodies are never escaped.

use askama::Template;

use super::MailError;
use crate::config::MailConfig;

pub const CONFIRMATION_SUBJECT: &str = "Thank you for contacting us";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Template)]
#[template(path = "emails/owner_notification.html")]
struct OwnerNotificationHtml<'a> {
    app_name: &'a str,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "emails/owner_notification.html", escape = "none")]
struct OwnerNotificationRawHtml<'a> {
    app_name: &'a str,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "emails/owner_notification.txt")]
struct OwnerNotificationText<'a> {
    app_name: &'a str,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "emails/submitter_confirmation.html")]
struct SubmitterConfirmationHtml<'a> {
    app_name: &'a str,
    name: &'a str,
}

#[derive(Template)]
#[template(path = "emails/submitter_confirmation.html", escape = "none")]
struct SubmitterConfirmationRawHtml<'a> {
    app_name: &'a str,
    name: &'a str,
}

#[derive(Template)]
#[template(path = "emails/submitter_confirmation.txt")]
struct SubmitterConfirmationText<'a> {
    app_name: &'a str,
    name: &'a str,
}

fn render(template: &impl Template) -> Result<String, MailError> {
    template
        .render()
        .map_err(|e| MailError::Template(e.to_string()))
}

/// Formats owner notifications and submitter confirmations. Pure: no I/O.
#[derive(Debug, Clone)]
pub struct NotificationComposer {
    app_name: String,
    escape_user_input: bool,
}

impl NotificationComposer {
    pub fn new(app_name: impl Into<String>, escape_user_input: bool) -> Self {
        Self {
            app_name: app_name.into(),
            escape_user_input,
        }
    }

    pub fn from_config(app_name: &str, config: &MailConfig) -> Self {
        Self::new(app_name, config.escape_user_input)
    }

    pub fn compose_owner_notification(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        message: &str,
    ) -> Result<ComposedEmail, MailError> {
        let app_name = self.app_name.as_str();

        let html = if self.escape_user_input {
            render(&OwnerNotificationHtml { app_name, name, email, phone, message })?
        } else {
            render(&OwnerNotificationRawHtml { app_name, name, email, phone, message })?
        };
        let text = render(&OwnerNotificationText { app_name, name, email, phone, message })?;

        Ok(ComposedEmail {
            subject: format!("New Contact Form Submission from {}", name),
            html,
            text,
        })
    }

    /// The submitter's address is not part of the body; the caller addresses the message.
    pub fn compose_submitter_confirmation(
        &self,
        name: &str,
        _email: &str,
    ) -> Result<ComposedEmail, MailError> {
        let app_name = self.app_name.as_str();

        let html = if self.escape_user_input {
            render(&SubmitterConfirmationHtml { app_name, name })?
        } else {
            render(&SubmitterConfirmationRawHtml { app_name, name })?
        };
        let text = render(&SubmitterConfirmationText { app_name, name })?;

        Ok(ComposedEmail {
            subject: CONFIRMATION_SUBJECT.to_string(),
            html,
            text,
        })
    }
}
