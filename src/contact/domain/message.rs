//! Contact-form submission, its validated form, and the rendered mail.

use crate::validation::{
    BLANK_MESSAGE, FieldErrors, INVALID_EMAIL_MESSAGE, check_length, is_valid_email,
};
use serde::Serialize;

/// Message reported when a name contains anything but letters and spaces.
pub const NAME_CHARSET_MESSAGE: &str = "Name should contain only letters and spaces";

/// Raw contact-form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    /// Sender's full name.
    pub name: String,
    /// Sender's reply address.
    pub email: String,
    /// Message subject.
    pub subject: String,
    /// Message text.
    pub message: String,
}

/// A validated contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl ContactSubmission {
    /// Validates every field, trimming text and title-casing the name.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] holding every failing field.
    pub fn validate(self) -> Result<ContactMessage, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        let name_check = check_length(name, 2, 100).and_then(|()| {
            if name.chars().all(|character| character.is_alphabetic() || character == ' ') {
                Ok(())
            } else {
                Err(NAME_CHARSET_MESSAGE.to_owned())
            }
        });
        errors.collect("name", name_check);

        let email = self.email.trim();
        let email_check = if email.is_empty() {
            Err(BLANK_MESSAGE.to_owned())
        } else if is_valid_email(email) {
            Ok(())
        } else {
            Err(INVALID_EMAIL_MESSAGE.to_owned())
        };
        errors.collect("email", email_check);

        let subject = self.subject.trim();
        errors.collect("subject", check_length(subject, 5, 200));

        let message = self.message.trim();
        errors.collect("message", check_length(message, 10, 2000));

        errors.into_result()?;
        Ok(ContactMessage {
            name: title_case(name),
            email: email.to_owned(),
            subject: subject.to_owned(),
            message: message.to_owned(),
        })
    }
}

impl ContactMessage {
    /// Returns the title-cased sender name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sender's reply address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the trimmed subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the trimmed message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Upper-cases the first letter of each word and lower-cases the rest.
fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut after_letter = false;
    for character in value.chars() {
        if character.is_alphabetic() {
            if after_letter {
                result.extend(character.to_lowercase());
            } else {
                result.extend(character.to_uppercase());
            }
            after_letter = true;
        } else {
            result.push(character);
            after_letter = false;
        }
    }
    result
}

/// A fully rendered plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMail {
    /// Sender address.
    pub from: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}
