//! Validates contact-form submissions and forwards them by mail.

use crate::contact::{
    domain::{ContactMessage, ContactSubmission, OutboundMail},
    ports::{Mailer, MailerError},
};
use crate::validation::FieldErrors;
use minijinja::Environment;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

const SUBJECT_TEMPLATE: &str = "Contact Form: {{ subject }}";
const BODY_TEMPLATE: &str = "From: {{ name }} <{{ email }}>\n\nMessage:\n{{ message }}";

/// Errors returned while relaying a contact message.
#[derive(Debug, Error)]
pub enum ContactError {
    /// One or more fields are invalid.
    #[error(transparent)]
    Validation(FieldErrors),
    /// The outbound mail could not be rendered.
    #[error("failed to render contact mail: {0}")]
    Render(String),
    /// The mail transport failed.
    #[error(transparent)]
    Transport(#[from] MailerError),
}

/// Stateless contact-form relay.
pub struct ContactRelay<M>
where
    M: Mailer + ?Sized,
{
    mailer: Arc<M>,
    mailbox: String,
}

impl<M> Clone for ContactRelay<M>
where
    M: Mailer + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            mailer: Arc::clone(&self.mailer),
            mailbox: self.mailbox.clone(),
        }
    }
}

impl<M> ContactRelay<M>
where
    M: Mailer + ?Sized,
{
    /// Creates a relay that sends from and to `mailbox`.
    #[must_use]
    pub fn new(mailer: Arc<M>, mailbox: impl Into<String>) -> Self {
        Self {
            mailer,
            mailbox: mailbox.into(),
        }
    }

    /// Validates a submission and sends it to the configured mailbox.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::Validation`] for invalid fields and
    /// [`ContactError::Transport`] when delivery fails.
    pub async fn submit(&self, submission: ContactSubmission) -> Result<(), ContactError> {
        let message = submission.validate().map_err(ContactError::Validation)?;
        let mail = self.render(&message)?;
        if let Err(err) = self.mailer.send(&mail).await {
            warn!(error = %err, "contact message delivery failed");
            return Err(err.into());
        }
        info!(sender = message.email(), "contact message relayed");
        Ok(())
    }

    fn render(&self, message: &ContactMessage) -> Result<OutboundMail, ContactError> {
        let environment = Environment::new();
        let render = |template: &str| {
            environment
                .render_str(template, message)
                .map_err(|error| ContactError::Render(error.to_string()))
        };
        Ok(OutboundMail {
            from: self.mailbox.clone(),
            to: vec![self.mailbox.clone()],
            subject: render(SUBJECT_TEMPLATE)?,
            body: render(BODY_TEMPLATE)?,
        })
    }
}
