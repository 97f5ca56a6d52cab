//! Amazon SES v2 mail transport.

use crate::contact::{
    domain::OutboundMail,
    ports::{Mailer, MailerError},
};
use async_trait::async_trait;
use aws_sdk_sesv2::Client;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use tracing::{error, info};

const CHARSET: &str = "UTF-8";

/// Sends plain-text mail through Amazon SES.
#[derive(Debug, Clone)]
pub struct SesMailer {
    client: Client,
}

impl SesMailer {
    /// Wraps an SES client.
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the ambient AWS configuration.
    pub async fn from_env() -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(Client::new(&config))
    }
}

fn text(data: &str) -> Result<Content, MailerError> {
    Content::builder()
        .data(data)
        .charset(CHARSET)
        .build()
        .map_err(|err| MailerError::InvalidMessage(err.to_string()))
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send(&self, mail: &OutboundMail) -> Result<(), MailerError> {
        let message = Message::builder()
            .subject(text(&mail.subject)?)
            .body(Body::builder().text(text(&mail.body)?).build())
            .build();
        let destination = Destination::builder()
            .set_to_addresses(Some(mail.to.clone()))
            .build();

        self.client
            .send_email()
            .from_email_address(&mail.from)
            .destination(destination)
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|err| {
                error!(error = %err, "SES rejected outbound mail");
                MailerError::transport(err)
            })?;

        info!(subject = %mail.subject, "outbound mail sent via SES");
        Ok(())
    }
}
