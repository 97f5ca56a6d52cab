//! In-memory task repository for tests and local development.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::identity::domain::IdentityId;
use crate::task::{
    domain::{NewTask, PageWindow, Task, TaskId, TaskScope},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    last_id: i64,
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTaskState {
    fn scoped<'a>(&'a self, scope: &'a TaskScope) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.values().filter(move |task| scope.permits(task))
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        state.last_id += 1;
        let created = task.clone().into_task(TaskId::new(state.last_id));
        state.tasks.insert(created.id(), created.clone());
        Ok(created)
    }

    async fn find_in_scope(
        &self,
        id: TaskId,
        scope: &TaskScope,
    ) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .get(&id)
            .filter(|task| scope.permits(task))
            .cloned())
    }

    async fn list(
        &self,
        scope: &TaskScope,
        window: Option<PageWindow>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state.scoped(scope).cloned().collect();
        tasks.sort_by_key(|task| Reverse((task.created_at(), task.id())));

        let Some(PageWindow { offset, limit }) = window else {
            return Ok(tasks);
        };
        let skip = usize::try_from(offset).map_err(TaskRepositoryError::persistence)?;
        let take = usize::try_from(limit).map_err(TaskRepositoryError::persistence)?;
        Ok(tasks.into_iter().skip(skip).take(take).collect())
    }

    async fn count(&self, scope: &TaskScope) -> TaskRepositoryResult<u64> {
        let state = self.read()?;
        u64::try_from(state.scoped(scope).count()).map_err(TaskRepositoryError::persistence)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        Ok(self.write()?.tasks.remove(&id).is_some())
    }

    async fn delete_owned_by(&self, owner: IdentityId) -> TaskRepositoryResult<u64> {
        let mut state = self.write()?;
        let before = state.tasks.len();
        state.tasks.retain(|_, task| task.owner_id() != owner);
        u64::try_from(before - state.tasks.len()).map_err(TaskRepositoryError::persistence)
    }
}
