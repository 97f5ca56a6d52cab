//! Task aggregate root.

use super::{TaskDescription, TaskDomainError, TaskId};
use crate::identity::domain::IdentityId;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::Serialize;

/// Derived completion label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TaskStatus {
    /// The task is done.
    Completed,
    /// The task is not done yet.
    Pending,
}

impl TaskStatus {
    /// Returns the display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Pending => "Pending",
        }
    }
}

/// Partial update of a task's editable attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement description, untrimmed.
    pub description: Option<String>,
    /// Replacement completion flag.
    pub done: Option<bool>,
}

/// A task awaiting its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    owner_id: IdentityId,
    description: TaskDescription,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Validates the description and stamps the creation time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the description is invalid.
    pub fn new(
        owner_id: IdentityId,
        description: impl AsRef<str>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        Ok(Self {
            owner_id,
            description: TaskDescription::new(description)?,
            created_at: clock.utc(),
        })
    }

    /// Returns the owning identity.
    #[must_use]
    pub const fn owner_id(&self) -> IdentityId {
        self.owner_id
    }

    /// Returns the validated description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attaches the store-assigned identifier. New tasks start pending.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            owner_id: self.owner_id,
            description: self.description,
            done: false,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    owner_id: IdentityId,
    description: TaskDescription,
    done: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner.
    pub owner_id: IdentityId,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted completion flag.
    pub done: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            description: data.description,
            done: data.done,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning identity.
    #[must_use]
    pub const fn owner_id(&self) -> IdentityId {
        self.owner_id
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns whether the task is done.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the completion label.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        if self.done {
            TaskStatus::Completed
        } else {
            TaskStatus::Pending
        }
    }

    /// Returns `true` when the task was created less than a day before `now`.
    #[must_use]
    pub fn is_recent(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.created_at) < TimeDelta::days(1)
    }

    /// Applies a partial update atomically.
    ///
    /// A task marked done must keep a description of at least
    /// [`TaskDescription::MIN_LENGTH`] characters; that check runs against
    /// the resulting state before the description itself is parsed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the resulting state is invalid. The
    /// task is left untouched on error.
    pub fn apply(
        &mut self,
        changes: TaskChanges,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let done = changes.done.unwrap_or(self.done);
        if done {
            let trimmed_length = changes.description.as_deref().map_or_else(
                || self.description.char_count(),
                |text| text.trim().chars().count(),
            );
            if trimmed_length < TaskDescription::MIN_LENGTH {
                return Err(TaskDomainError::IncompleteDescriptionForDone {
                    min: TaskDescription::MIN_LENGTH,
                });
            }
        }

        let new_description = changes
            .description
            .map(TaskDescription::new)
            .transpose()?;

        if let Some(description) = new_description {
            self.description = description;
        }
        self.done = done;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Sets the completion flag. Repeating the current value is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::IncompleteDescriptionForDone`] when marking
    /// done a task whose description is too short.
    pub fn set_done(&mut self, done: bool, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.apply(
            TaskChanges {
                description: None,
                done: Some(done),
            },
            clock,
        )
    }
}
