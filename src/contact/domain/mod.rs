//! Domain model for contact-form messages.
//!
//! Messages are validated, rendered into an outbound mail, and forwarded.
//! Nothing is stored.

mod message;

pub use message::{ContactMessage, ContactSubmission, NAME_CHARSET_MESSAGE, OutboundMail};
