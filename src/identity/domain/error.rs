//! Error types for identity attribute validation.

use thiserror::Error;

/// A single invalid identity attribute.
///
/// The display text is the user-facing message; [`Self::field`] names the
/// request field it belongs to.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The username is empty after trimming.
    #[error("This field may not be blank.")]
    BlankUsername,

    /// The username exceeds the maximum length.
    #[error("Ensure this field has no more than {max} characters.")]
    UsernameTooLong {
        /// Maximum allowed character count.
        max: usize,
    },

    /// The username contains characters outside the allowed set.
    #[error(
        "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
    )]
    InvalidUsername,

    /// A first or last name exceeds the maximum length.
    #[error("Ensure this field has no more than {max} characters.")]
    NameTooLong {
        /// Request field holding the name.
        field: &'static str,
        /// Maximum allowed character count.
        max: usize,
    },

    /// The email address is not syntactically valid.
    #[error("Enter a valid email address.")]
    InvalidEmail,

    /// The password is empty or whitespace only.
    #[error("This field may not be blank.")]
    BlankPassword,
}

impl IdentityDomainError {
    /// Returns the request field this error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::BlankUsername | Self::UsernameTooLong { .. } | Self::InvalidUsername => {
                "username"
            }
            Self::NameTooLong { field, .. } => field,
            Self::InvalidEmail => "email",
            Self::BlankPassword => "password",
        }
    }
}
