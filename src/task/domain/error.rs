//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing or mutating tasks.
///
/// The display text is the user-facing message for the `description` field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The description is empty after trimming.
    #[error("This field may not be blank.")]
    BlankDescription,

    /// The trimmed description is shorter than the minimum.
    #[error("Task must be at least {min} characters long")]
    DescriptionTooShort {
        /// Minimum allowed character count.
        min: usize,
        /// Observed character count.
        actual: usize,
    },

    /// The trimmed description is longer than the maximum.
    #[error("Task cannot exceed {max} characters")]
    DescriptionTooLong {
        /// Maximum allowed character count.
        max: usize,
        /// Observed character count.
        actual: usize,
    },

    /// A task cannot be done while its description is too short.
    #[error("Task must be at least {min} characters to mark as done")]
    IncompleteDescriptionForDone {
        /// Minimum character count required for a done task.
        min: usize,
    },
}

impl TaskDomainError {
    /// Returns the request field this error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        "description"
    }
}
