//! Board routes.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use tracing::{info, warn};

use crate::routes::body;
use crate::services::store::{BoardStore, StoreError};
use crate::state::{AppState, BoardDetail, BoardSummary};

#[derive(Debug, Default, Deserialize)]
pub struct ListBoardsQuery {
    #[serde(rename = "preSeed")]
    pub pre_seed: Option<String>,
}

/// `GET /api/v1/boards`: list boards; `?preSeed=true` re-seeds an empty store.
pub async fn list_boards(State(state): State<AppState>, Query(query): Query<ListBoardsQuery>) -> Json<Vec<BoardSummary>> {
    if query.pre_seed.as_deref() != Some("true") {
        return Json(state.store.read().await.list_boards());
    }
    let mut store = state.store.write().await;
    if store.seed_if_empty() {
        info!("re-seeded boards on request");
    }
    Json(store.list_boards())
}

/// `POST /api/v1/boards`: create a board.
pub async fn create_board(
    State(state): State<AppState>,
    payload: Bytes,
) -> Result<(StatusCode, Json<BoardDetail>), StatusCode> {
    let (name, description) = body::parse_object(&payload)
        .and_then(|fields| body::new_board_fields(&fields))
        .map_err(|e| reject("create board", e))?;

    let mut store = state.store.write().await;
    let board = store
        .create_board(&name, description.as_deref())
        .map_err(|e| reject("create board", e))?;
    Ok((StatusCode::CREATED, Json(board)))
}

/// `DELETE /api/v1/boards`: remove every board.
pub async fn delete_all_boards(State(state): State<AppState>) -> Json<Vec<BoardDetail>> {
    let mut store = state.store.write().await;
    Json(store.delete_all_boards())
}

/// `GET /api/v1/boards/:board_id`: fetch one board with its tasks.
pub async fn get_board(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> Result<Json<BoardDetail>, StatusCode> {
    let store = state.store.read().await;
    ensure_board(&store, &board_id)?;
    store
        .get_board(&board_id)
        .map(Json)
        .map_err(|e| reject("get board", e))
}

/// `PUT /api/v1/boards/:board_id`: replace name and description.
pub async fn update_board(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    payload: Bytes,
) -> Result<(StatusCode, Json<BoardDetail>), StatusCode> {
    let fields = body::parse_object(&payload).map_err(|e| reject("update board", e))?;
    if fields.is_empty() {
        return Err(reject("update board", StoreError::InvalidInput("empty body".into())));
    }

    let mut store = state.store.write().await;
    ensure_board(&store, &board_id)?;
    let update = body::board_update(&fields).map_err(|e| reject("update board", e))?;
    let board = store
        .update_board(&board_id, update)
        .map_err(|e| reject("update board", e))?;
    Ok((StatusCode::CREATED, Json(board)))
}

/// `DELETE /api/v1/boards/:board_id`: delete a board whose tasks are archived.
pub async fn delete_board(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> Result<Json<BoardDetail>, StatusCode> {
    let mut store = state.store.write().await;
    ensure_board(&store, &board_id)?;
    store
        .delete_board(&board_id)
        .map(Json)
        .map_err(|e| reject("delete board", e))
}

// =============================================================================
// HELPERS
// =============================================================================

/// 404 unless the board exists.
pub(crate) fn ensure_board(store: &BoardStore, board_id: &str) -> Result<(), StatusCode> {
    if store.board_exists(board_id) {
        return Ok(());
    }
    warn!(%board_id, "board does not exist");
    Err(StatusCode::NOT_FOUND)
}

/// Log a rejected request and translate the error to a status code.
pub(crate) fn reject(action: &str, err: StoreError) -> StatusCode {
    warn!(action, code = err.error_code(), error = %err, "request rejected");
    store_error_to_status(&err)
}

pub(crate) fn store_error_to_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::InvalidInput(_) | StoreError::UnarchivedTasks(_) => StatusCode::BAD_REQUEST,
        StoreError::BoardNotFound(_) | StoreError::TaskNotFound { .. } | StoreError::IdTooLong(_) => {
            StatusCode::NOT_FOUND
        }
    }
}

#[cfg(test)]
#[path = "boards_test.rs"]
mod tests;
