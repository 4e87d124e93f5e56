//! Task routes nested under a board.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use tracing::warn;

use crate::routes::body;
use crate::routes::boards::{ensure_board, reject};
use crate::services::store::{BoardStore, StoreError};
use crate::services::task::TaskSort;
use crate::state::{AppState, Task};

#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub sort: Option<String>,
}

/// `GET /api/v1/boards/:board_id/tasks`: list tasks, optionally `?sort=`.
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<Task>>, StatusCode> {
    let sort = query.sort.as_deref().and_then(TaskSort::parse);
    let store = state.store.read().await;
    store
        .list_tasks_for_board(&board_id, sort)
        .map(Json)
        .map_err(|e| reject("list tasks", e))
}

/// `POST /api/v1/boards/:board_id/tasks`: create a task.
pub async fn create_task(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    payload: Bytes,
) -> Result<(StatusCode, Json<Task>), StatusCode> {
    let task_name = body::parse_object(&payload)
        .and_then(|fields| body::new_task_name(&fields))
        .map_err(|e| reject("create task", e))?;

    let mut store = state.store.write().await;
    ensure_board(&store, &board_id)?;
    let task = store
        .create_task(&board_id, &task_name)
        .map_err(|e| reject("create task", e))?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `GET /api/v1/boards/:board_id/tasks/:task_id`: fetch one task.
pub async fn get_task(
    State(state): State<AppState>,
    Path((board_id, task_id)): Path<(String, String)>,
) -> Result<Json<Task>, StatusCode> {
    let store = state.store.read().await;
    ensure_task(&store, &board_id, &task_id)?;
    store
        .get_task(&board_id, &task_id)
        .map(Json)
        .map_err(|e| reject("get task", e))
}

/// `PATCH /api/v1/boards/:board_id/tasks/:task_id`: partial update or move.
pub async fn update_task(
    State(state): State<AppState>,
    Path((board_id, task_id)): Path<(String, String)>,
    payload: Bytes,
) -> Result<Json<Task>, StatusCode> {
    let fields = body::parse_object(&payload).map_err(|e| reject("update task", e))?;
    if fields.is_empty() {
        return Err(reject("update task", StoreError::InvalidInput("empty body".into())));
    }

    let mut store = state.store.write().await;
    ensure_task(&store, &board_id, &task_id)?;
    let patch = body::task_patch(&fields).map_err(|e| reject("update task", e))?;
    store
        .update_task(&board_id, &task_id, patch)
        .map(Json)
        .map_err(|e| reject("update task", e))
}

/// `DELETE /api/v1/boards/:board_id/tasks/:task_id`: delete a task.
/// A non-empty body is refused.
pub async fn delete_task(
    State(state): State<AppState>,
    Path((board_id, task_id)): Path<(String, String)>,
    payload: Bytes,
) -> Result<Json<Task>, StatusCode> {
    let fields = body::parse_object(&payload).map_err(|e| reject("delete task", e))?;
    if !fields.is_empty() {
        return Err(reject("delete task", StoreError::InvalidInput("unexpected body".into())));
    }

    let mut store = state.store.write().await;
    ensure_task(&store, &board_id, &task_id)?;
    store
        .delete_task(&board_id, &task_id)
        .map(Json)
        .map_err(|e| reject("delete task", e))
}

/// 404 unless the task exists on the board.
fn ensure_task(store: &BoardStore, board_id: &str, task_id: &str) -> Result<(), StatusCode> {
    if store.task_exists(board_id, task_id) {
        return Ok(());
    }
    warn!(%board_id, %task_id, "task does not exist");
    Err(StatusCode::NOT_FOUND)
}

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tests;
