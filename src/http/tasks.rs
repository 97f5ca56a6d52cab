//! Task endpoints.

use super::{ApiError, AppState, error::invalid_page, extract::RecordId};
use crate::identity::{
    domain::{Caller, IdentityId},
    services::IdentityServiceError,
};
use crate::task::domain::{PageRequest, Task, TaskChanges, TaskId, TaskPage, TaskStatus};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const COLLECTION_PATH: &str = "/tasks";

/// Task representation returned by every task endpoint.
#[derive(Debug, Serialize)]
pub(super) struct TaskBody {
    id: i64,
    owner_id: i64,
    owner_username: Option<String>,
    description: String,
    done: bool,
    status: TaskStatus,
    is_recent: bool,
    description_length: usize,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskBody {
    fn new(task: &Task, owners: &OwnerNames, now: DateTime<Utc>) -> Self {
        Self {
            id: task.id().value(),
            owner_id: task.owner_id().value(),
            owner_username: owners.get(&task.owner_id()).cloned(),
            description: task.description().as_str().to_owned(),
            done: task.is_done(),
            status: task.status(),
            is_recent: task.is_recent(now),
            description_length: task.description().char_count(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Paginated listing envelope.
#[derive(Debug, Serialize)]
pub(super) struct TaskListBody {
    count: u64,
    next: Option<String>,
    previous: Option<String>,
    results: Vec<TaskBody>,
}

impl TaskListBody {
    fn new(page: &TaskPage, owners: &OwnerNames, now: DateTime<Utc>) -> Self {
        let number = page.request().number();
        Self {
            count: page.total(),
            next: page.has_next().then(|| page_link(number + 1)),
            previous: page.has_previous().then(|| page_link(number - 1)),
            results: page
                .items()
                .iter()
                .map(|task| TaskBody::new(task, owners, now))
                .collect(),
        }
    }
}

/// Usernames of the owners of the tasks in one response.
type OwnerNames = HashMap<IdentityId, String>;

/// Resolves owner usernames, answering the caller's own tasks without a
/// store lookup.
async fn owner_names(
    state: &AppState,
    caller: &Caller,
    tasks: &[Task],
) -> Result<OwnerNames, ApiError> {
    let mut names = OwnerNames::new();
    for owner in tasks.iter().map(Task::owner_id) {
        if names.contains_key(&owner) {
            continue;
        }
        if owner == caller.id() {
            names.insert(owner, caller.username().to_owned());
            continue;
        }
        let identity = state
            .owners
            .find_by_id(owner)
            .await
            .map_err(IdentityServiceError::from)?;
        if let Some(found) = identity {
            names.insert(owner, found.username().as_str().to_owned());
        }
    }
    Ok(names)
}

async fn render(state: &AppState, caller: &Caller, task: &Task) -> Result<TaskBody, ApiError> {
    let owners = owner_names(state, caller, std::slice::from_ref(task)).await?;
    Ok(TaskBody::new(task, &owners, state.clock.utc()))
}

fn page_link(number: u32) -> String {
    if number == 1 {
        COLLECTION_PATH.to_owned()
    } else {
        format!("{COLLECTION_PATH}?page={number}")
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PageQuery {
    page: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct CreateTaskRequest {
    description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ReplaceTaskRequest {
    description: String,
    done: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct PatchTaskRequest {
    description: Option<String>,
    done: Option<bool>,
}

pub(super) async fn list(
    State(state): State<AppState>,
    caller: Caller,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<TaskListBody>, ApiError> {
    let Query(params) = query.map_err(|_| invalid_page())?;
    let number = match params.page {
        Some(0) => return Err(invalid_page()),
        Some(number) => number,
        None => 1,
    };
    let page = state
        .tasks
        .list_page(&caller, PageRequest::new(number, state.page_size))
        .await?;
    let owners = owner_names(&state, &caller, page.items()).await?;
    Ok(Json(TaskListBody::new(&page, &owners, state.clock.utc())))
}

pub(super) async fn create(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskBody>), ApiError> {
    let Json(request) = payload?;
    let task = state.tasks.create(&caller, &request.description).await?;
    Ok((StatusCode::CREATED, Json(render(&state, &caller, &task).await?)))
}

pub(super) async fn retrieve(
    State(state): State<AppState>,
    caller: Caller,
    RecordId(task_id): RecordId,
) -> Result<Json<TaskBody>, ApiError> {
    let task = state.tasks.get(&caller, TaskId::new(task_id)).await?;
    Ok(Json(render(&state, &caller, &task).await?))
}

pub(super) async fn replace(
    State(state): State<AppState>,
    caller: Caller,
    RecordId(task_id): RecordId,
    payload: Result<Json<ReplaceTaskRequest>, JsonRejection>,
) -> Result<Json<TaskBody>, ApiError> {
    let Json(request) = payload?;
    let task = state
        .tasks
        .replace(&caller, TaskId::new(task_id), request.description, request.done)
        .await?;
    Ok(Json(render(&state, &caller, &task).await?))
}

pub(super) async fn patch(
    State(state): State<AppState>,
    caller: Caller,
    RecordId(task_id): RecordId,
    payload: Result<Json<PatchTaskRequest>, JsonRejection>,
) -> Result<Json<TaskBody>, ApiError> {
    let Json(request) = payload?;
    let changes = TaskChanges {
        description: request.description,
        done: request.done,
    };
    let task = state
        .tasks
        .update(&caller, TaskId::new(task_id), changes)
        .await?;
    Ok(Json(render(&state, &caller, &task).await?))
}

pub(super) async fn destroy(
    State(state): State<AppState>,
    caller: Caller,
    RecordId(task_id): RecordId,
) -> Result<StatusCode, ApiError> {
    state.tasks.delete(&caller, TaskId::new(task_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn mark_complete(
    State(state): State<AppState>,
    caller: Caller,
    RecordId(task_id): RecordId,
) -> Result<Json<TaskBody>, ApiError> {
    let task = state.tasks.mark_done(&caller, TaskId::new(task_id)).await?;
    Ok(Json(render(&state, &caller, &task).await?))
}

pub(super) async fn mark_pending(
    State(state): State<AppState>,
    caller: Caller,
    RecordId(task_id): RecordId,
) -> Result<Json<TaskBody>, ApiError> {
    let task = state
        .tasks
        .mark_pending(&caller, TaskId::new(task_id))
        .await?;
    Ok(Json(render(&state, &caller, &task).await?))
}
