//! Mail transport port.

use crate::contact::domain::OutboundMail;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Delivers rendered mail.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message. Failures are not retried.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError`] when the transport rejects the message.
    async fn send(&self, mail: &OutboundMail) -> Result<(), MailerError>;
}

/// Mail transport failure.
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    /// The message could not be assembled for the transport.
    #[error("invalid outbound message: {0}")]
    InvalidMessage(String),
    /// The transport failed to deliver the message.
    #[error("mail transport failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl MailerError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
