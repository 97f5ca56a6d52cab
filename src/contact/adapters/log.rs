//! Mail transport that writes messages to the log instead of sending them.

use crate::contact::{
    domain::OutboundMail,
    ports::{Mailer, MailerError},
};
use async_trait::async_trait;
use tracing::info;

/// Logs every message at `info` level. Used for local development.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: &OutboundMail) -> Result<(), MailerError> {
        info!(
            from = %mail.from,
            to = ?mail.to,
            subject = %mail.subject,
            body = %mail.body,
            "outbound mail"
        );
        Ok(())
    }
}
