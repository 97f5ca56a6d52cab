//! Repository port for task persistence and scoped lookup.

use crate::identity::domain::IdentityId;
use crate::task::domain::{NewTask, PageWindow, Task, TaskId, TaskScope};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every read takes a [`TaskScope`]; records outside the scope behave as if
/// they did not exist.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::UnknownOwner`] when the owner does not
    /// exist in the backing store.
    async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier within `scope`.
    ///
    /// Returns `None` when the task does not exist or lies outside the scope.
    async fn find_in_scope(
        &self,
        id: TaskId,
        scope: &TaskScope,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Returns tasks within `scope`, newest first (ties broken by descending
    /// identifier), optionally restricted to one page window.
    async fn list(
        &self,
        scope: &TaskScope,
        window: Option<PageWindow>,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Counts tasks within `scope`.
    async fn count(&self, scope: &TaskScope) -> TaskRepositoryResult<u64>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task.
    ///
    /// Returns `false` when no task had the identifier.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Removes every task owned by `owner`, returning how many were removed.
    async fn delete_owned_by(&self, owner: IdentityId) -> TaskRepositoryResult<u64>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The owning identity does not exist.
    #[error("unknown task owner: {0}")]
    UnknownOwner(IdentityId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
