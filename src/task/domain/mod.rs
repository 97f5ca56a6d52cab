//! Domain model for per-user task lists.
//!
//! Tasks are owned by exactly one identity. Visibility is decided by
//! [`TaskScope`], computed from the caller before any store access.

mod description;
mod error;
mod ids;
mod page;
mod scope;
mod task;

pub use description::TaskDescription;
pub use error::TaskDomainError;
pub use ids::TaskId;
pub use page::{Page, PageRequest, PageWindow};
pub use scope::TaskScope;
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges, TaskStatus};

/// A page of tasks.
pub type TaskPage = Page<Task>;
