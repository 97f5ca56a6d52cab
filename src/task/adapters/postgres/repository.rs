//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::identity::domain::IdentityId;
use crate::task::{
    domain::{NewTask, PageWindow, PersistedTaskData, Task, TaskDescription, TaskId, TaskScope},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let owner_id = task.owner_id();
        let new_row = NewTaskRow {
            owner_id: owner_id.value(),
            description: task.description().as_str().to_owned(),
            done: false,
            created_at: task.created_at(),
            updated_at: task.created_at(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::UnknownOwner(owner_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            row_to_task(row)
        })
        .await
    }

    async fn find_in_scope(
        &self,
        id: TaskId,
        scope: &TaskScope,
    ) -> TaskRepositoryResult<Option<Task>> {
        let owner = owner_filter(scope);
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .filter(tasks::id.eq(id.value()))
                .select(TaskRow::as_select())
                .into_boxed();
            if let Some(owner_id) = owner {
                query = query.filter(tasks::owner_id.eq(owner_id));
            }
            let row = query
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(
        &self,
        scope: &TaskScope,
        window: Option<PageWindow>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let owner = owner_filter(scope);
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .select(TaskRow::as_select())
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .into_boxed();
            if let Some(owner_id) = owner {
                query = query.filter(tasks::owner_id.eq(owner_id));
            }
            if let Some(PageWindow { offset, limit }) = window {
                let skip = i64::try_from(offset).map_err(TaskRepositoryError::persistence)?;
                let take = i64::try_from(limit).map_err(TaskRepositoryError::persistence)?;
                query = query.offset(skip).limit(take);
            }
            query
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn count(&self, scope: &TaskScope) -> TaskRepositoryResult<u64> {
        let owner = owner_filter(scope);
        self.run_blocking(move |connection| {
            let total = match owner {
                None => tasks::table.count().get_result::<i64>(connection),
                Some(owner_id) => tasks::table
                    .filter(tasks::owner_id.eq(owner_id))
                    .count()
                    .get_result::<i64>(connection),
            }
            .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(total).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let description = task.description().as_str().to_owned();
        let done = task.is_done();
        let updated_at = task.updated_at();

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(task_id.value()))
                .set((
                    tasks::description.eq(description),
                    tasks::done.eq(done),
                    tasks::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }

    async fn delete_owned_by(&self, owner: IdentityId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.filter(tasks::owner_id.eq(owner.value())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(affected).map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

const fn owner_filter(scope: &TaskScope) -> Option<i64> {
    match scope {
        TaskScope::All => None,
        TaskScope::OwnedBy(owner) => Some(owner.value()),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        owner_id,
        description,
        done,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id),
        owner_id: IdentityId::new(owner_id),
        description: TaskDescription::new(description)
            .map_err(TaskRepositoryError::persistence)?,
        done,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
