//! Validated task description text.

use super::TaskDomainError;
use serde::Serialize;
use std::fmt;

/// Trimmed task text of 3 to 200 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Minimum character count after trimming.
    pub const MIN_LENGTH: usize = 3;
    /// Maximum character count after trimming.
    pub const MAX_LENGTH: usize = 200;

    /// Trims and validates a description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the trimmed value is blank or its
    /// character count falls outside `MIN_LENGTH..=MAX_LENGTH`.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        let trimmed = value.as_ref().trim();
        let actual = trimmed.chars().count();
        if actual == 0 {
            return Err(TaskDomainError::BlankDescription);
        }
        if actual < Self::MIN_LENGTH {
            return Err(TaskDomainError::DescriptionTooShort {
                min: Self::MIN_LENGTH,
                actual,
            });
        }
        if actual > Self::MAX_LENGTH {
            return Err(TaskDomainError::DescriptionTooLong {
                max: Self::MAX_LENGTH,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the character count.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl AsRef<str> for TaskDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
