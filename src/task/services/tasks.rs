//! Service layer for scoped task CRUD.
//!
//! Every operation computes the caller's [`TaskScope`] first and hands it to
//! the repository, so a task outside the scope reads as missing.

use crate::identity::domain::Caller;
use crate::task::{
    domain::{
        NewTask, PageRequest, Task, TaskChanges, TaskDomainError, TaskId, TaskPage, TaskScope,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The task does not exist or is outside the caller's scope.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The requested page lies beyond the last page.
    #[error("page {0} is out of range")]
    PageOutOfRange(u32),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task CRUD orchestration service.
pub struct TaskService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns every task visible to the caller, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list(&self, caller: &Caller) -> TaskServiceResult<Vec<Task>> {
        let scope = TaskScope::for_caller(caller);
        Ok(self.repository.list(&scope, None).await?)
    }

    /// Returns one page of the tasks visible to the caller.
    ///
    /// The first page is always available, even when empty.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::PageOutOfRange`] for a page past the end,
    /// or [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_page(
        &self,
        caller: &Caller,
        request: PageRequest,
    ) -> TaskServiceResult<TaskPage> {
        let scope = TaskScope::for_caller(caller);
        let total = self.repository.count(&scope).await?;
        let window = request.window();
        if request.number() > 1 && window.offset >= total {
            return Err(TaskServiceError::PageOutOfRange(request.number()));
        }
        let items = self.repository.list(&scope, Some(window)).await?;
        Ok(TaskPage::new(items, total, request))
    }

    /// Returns a single task visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is missing or
    /// outside the caller's scope.
    pub async fn get(&self, caller: &Caller, task_id: TaskId) -> TaskServiceResult<Task> {
        self.find(caller, task_id).await
    }

    /// Creates a pending task owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the description is invalid.
    pub async fn create(&self, caller: &Caller, description: &str) -> TaskServiceResult<Task> {
        let draft = NewTask::new(caller.id(), description, &*self.clock)?;
        let task = self.repository.create(&draft).await?;
        info!(task_id = %task.id(), owner_id = %task.owner_id(), "task created");
        Ok(task)
    }

    /// Applies a partial update to a task visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] outside the caller's scope and
    /// [`TaskServiceError::Domain`] when the resulting state is invalid.
    pub async fn update(
        &self,
        caller: &Caller,
        task_id: TaskId,
        changes: TaskChanges,
    ) -> TaskServiceResult<Task> {
        let mut task = self.find(caller, task_id).await?;
        task.apply(changes, &*self.clock)?;
        self.save(task).await
    }

    /// Replaces the description of a task visible to the caller.
    ///
    /// `done` keeps its stored value when omitted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] outside the caller's scope and
    /// [`TaskServiceError::Domain`] when the resulting state is invalid.
    pub async fn replace(
        &self,
        caller: &Caller,
        task_id: TaskId,
        description: String,
        done: Option<bool>,
    ) -> TaskServiceResult<Task> {
        let changes = TaskChanges {
            description: Some(description),
            done,
        };
        self.update(caller, task_id, changes).await
    }

    /// Marks a task visible to the caller as done.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] outside the caller's scope.
    pub async fn mark_done(&self, caller: &Caller, task_id: TaskId) -> TaskServiceResult<Task> {
        self.set_done(caller, task_id, true).await
    }

    /// Marks a task visible to the caller as pending.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] outside the caller's scope.
    pub async fn mark_pending(&self, caller: &Caller, task_id: TaskId) -> TaskServiceResult<Task> {
        self.set_done(caller, task_id, false).await
    }

    /// Deletes a task visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] outside the caller's scope.
    pub async fn delete(&self, caller: &Caller, task_id: TaskId) -> TaskServiceResult<()> {
        let task = self.find(caller, task_id).await?;
        if !self.repository.delete(task.id()).await? {
            return Err(TaskServiceError::NotFound(task_id));
        }
        info!(task_id = %task_id, caller = caller.username(), "task deleted");
        Ok(())
    }

    async fn set_done(
        &self,
        caller: &Caller,
        task_id: TaskId,
        done: bool,
    ) -> TaskServiceResult<Task> {
        let mut task = self.find(caller, task_id).await?;
        task.set_done(done, &*self.clock)?;
        self.save(task).await
    }

    async fn find(&self, caller: &Caller, task_id: TaskId) -> TaskServiceResult<Task> {
        let scope = TaskScope::for_caller(caller);
        self.repository
            .find_in_scope(task_id, &scope)
            .await?
            .ok_or_else(|| {
                debug!(task_id = %task_id, caller = caller.username(), "task outside scope");
                TaskServiceError::NotFound(task_id)
            })
    }

    async fn save(&self, task: Task) -> TaskServiceResult<Task> {
        match self.repository.update(&task).await {
            Ok(()) => Ok(task),
            Err(TaskRepositoryError::NotFound(id)) => Err(TaskServiceError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }
}
