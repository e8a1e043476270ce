use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::Result,
    jobs::{EmailDispatcher, EmailKind},
    mail::{DeliveryOutcome, EmailMessage, Mailer, NotificationComposer},
    models::ContactForm,
};

/// Delivery results of a synchronous submission. Only used for logging and
/// tests; the HTTP response never exposes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDelivery {
    pub notification: DeliveryOutcome,
    pub confirmation: DeliveryOutcome,
}

#[derive(Clone)]
pub struct ContactService {
    mailer: Arc<dyn Mailer>,
    composer: NotificationComposer,
    dispatcher: EmailDispatcher,
    contact_recipient: String,
}

impl ContactService {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        composer: NotificationComposer,
        dispatcher: EmailDispatcher,
        contact_recipient: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            composer,
            dispatcher,
            contact_recipient: contact_recipient.into(),
        }
    }

    pub fn owner_notification(&self, form: &ContactForm) -> Result<EmailMessage> {
        let composed = self.composer.compose_owner_notification(
            &form.name,
            &form.email,
            &form.phone,
            &form.message,
        )?;

        Ok(EmailMessage::new(&self.contact_recipient, composed.subject, composed.html)
            .with_text(composed.text))
    }

    pub fn submitter_confirmation(&self, form: &ContactForm) -> Result<EmailMessage> {
        let composed = self
            .composer
            .compose_submitter_confirmation(&form.name, &form.email)?;

        Ok(EmailMessage::new(&form.email, composed.subject, composed.html)
            .with_text(composed.text))
    }

    /// Queue both emails and return without waiting on either.
    pub fn dispatch_in_background(&self, form: &ContactForm) -> Result<()> {
        info!(
            "Contact form submission: {} ({}) - {}",
            form.name, form.email, form.phone
        );

        let notification = self.owner_notification(form)?;
        let confirmation = self.submitter_confirmation(form)?;

        self.dispatcher
            .submit(EmailKind::OwnerNotification, notification)?;
        self.dispatcher
            .submit(EmailKind::SubmitterConfirmation, confirmation)?;

        Ok(())
    }

    /// Send the owner notification, then the confirmation, awaiting each.
    /// Delivery failures are logged and reported in the returned outcomes;
    /// only a composition failure is an error.
    pub async fn send_now(&self, form: &ContactForm) -> Result<ContactDelivery> {
        info!(
            "Contact form submission (sync): {} ({}) - {}",
            form.name, form.email, form.phone
        );

        let notification_email = self.owner_notification(form)?;
        let confirmation_email = self.submitter_confirmation(form)?;

        let notification = self.mailer.send_email(&notification_email).await;
        if !notification.is_delivered() {
            warn!("Failed to send notification email");
        }

        let confirmation = self.mailer.send_email(&confirmation_email).await;
        if !confirmation.is_delivered() {
            warn!("Failed to send confirmation email");
        }

        Ok(ContactDelivery {
            notification,
            confirmation,
        })
    }
}
