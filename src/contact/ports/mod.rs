//! Port contracts for outbound mail delivery.

pub mod mailer;

pub use mailer::{Mailer, MailerError};

#[cfg(test)]
pub use mailer::MockMailer;
