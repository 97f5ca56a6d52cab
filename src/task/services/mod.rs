//! Application services for task CRUD.

mod tasks;

pub use tasks::{TaskService, TaskServiceError, TaskServiceResult};
