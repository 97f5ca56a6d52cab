//! Field-level validation errors shared by registration, identity
//! administration, and the contact relay.
//!
//! Errors are keyed by the request field name so the HTTP layer can return
//! them verbatim as a `{ "field": ["message", ...] }` body.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

const EMAIL_PATTERN: &str = concat!(
    r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
    r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+",
    r"[A-Za-z]{2,63}$",
);

static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

/// Message used when an email address fails syntax validation.
pub const INVALID_EMAIL_MESSAGE: &str = "Enter a valid email address.";

/// Returns `true` when `value` is a syntactically valid email address.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    value.len() <= 254
        && EMAIL_REGEX
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(value))
}

/// Aggregated validation failures keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize)]
#[serde(transparent)]
#[error("validation failed for: {}", field_list(.0))]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an error set holding a single message.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Records a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Records the error of a field check, if any.
    pub fn collect<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.add(field, message);
                None
            }
        }
    }

    /// Moves every message of `other` into this set.
    pub fn merge(&mut self, other: Self) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// Returns `true` when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the messages recorded for `field`.
    #[must_use]
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Returns `true` when `field` has at least one message.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Iterates over failing field names.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the collected errors when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn field_list(errors: &BTreeMap<String, Vec<String>>) -> String {
    errors.keys().cloned().collect::<Vec<_>>().join(", ")
}

/// Message used when a required field is blank.
pub const BLANK_MESSAGE: &str = "This field may not be blank.";

/// Checks the character count of an already-trimmed value.
///
/// # Errors
///
/// Returns a user-facing message when the value is blank or outside
/// `min..=max` characters.
pub fn check_length(value: &str, min: usize, max: usize) -> Result<(), String> {
    let length = value.chars().count();
    if length == 0 && min > 0 {
        return Err(BLANK_MESSAGE.to_owned());
    }
    if length < min {
        return Err(format!("Ensure this field has at least {min} characters."));
    }
    if length > max {
        return Err(format!("Ensure this field has no more than {max} characters."));
    }
    Ok(())
}
