//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! All endpoints live under `/api/v1`. Unmatched methods on known paths are
//! answered with 405 by axum's method routers; unknown paths fall through to
//! the same 405 so clients see a single "not supported" status.

pub mod body;
pub mod boards;
pub mod tasks;

use axum::Router;
use axum::http::{Method, StatusCode, Uri};
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::state::AppState;

/// Board and task endpoints, relative to the API prefix.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/boards",
            get(boards::list_boards)
                .post(boards::create_board)
                .delete(boards::delete_all_boards),
        )
        .route(
            "/boards/{board_id}",
            get(boards::get_board)
                .put(boards::update_board)
                .delete(boards::delete_board),
        )
        .route(
            "/boards/{board_id}/tasks",
            get(tasks::list_tasks).post(tasks::create_task),
        )
        .route(
            "/boards/{board_id}/tasks/{task_id}",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", api_routes())
        .fallback(unsupported)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn unsupported(method: Method, uri: Uri) -> StatusCode {
    warn!(%method, %uri, "unsupported route");
    StatusCode::METHOD_NOT_ALLOWED
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
