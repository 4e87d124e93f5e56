//! Shared application state and the board/task data model.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the single `BoardStore` behind one `RwLock`, so every request sees
//! each store operation (including a two-board task move) as atomic.
//!
//! The entity types here are the in-memory records. Handlers never see
//! `Board` directly; they receive owned projections (`BoardSummary`,
//! `BoardDetail`, `Task`) so nothing outside the store can mutate its
//! sequences or indices.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::services::store::BoardStore;

// =============================================================================
// TASK
// =============================================================================

/// A unit of work. Serialized as-is in every task response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub board_id: String,
    pub task_name: String,
    pub archived: bool,
    /// Milliseconds since the Unix epoch. Never changes after creation.
    pub date_created: i64,
}

// =============================================================================
// BOARD
// =============================================================================

/// A named, ordered container of tasks plus its id → position index.
#[derive(Debug, Clone)]
pub struct Board {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tasks: Vec<Task>,
    pub task_index_by_id: HashMap<String, usize>,
}

impl Board {
    #[must_use]
    pub fn new(id: String, name: String, description: String) -> Self {
        Self { id, name, description, tasks: Vec::new(), task_index_by_id: HashMap::new() }
    }

    /// True when every task is archived (vacuously true for an empty board).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.tasks.iter().all(|task| task.archived)
    }

    #[must_use]
    pub fn summary(&self) -> BoardSummary {
        BoardSummary { id: self.id.clone(), name: self.name.clone(), description: self.description.clone() }
    }

    #[must_use]
    pub fn detail(&self) -> BoardDetail {
        BoardDetail {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            tasks: self.tasks.clone(),
            task_index_by_id: self.task_index_by_id.clone(),
        }
    }

    /// Consume the board into its detail projection without copying tasks.
    #[must_use]
    pub fn into_detail(self) -> BoardDetail {
        BoardDetail {
            id: self.id,
            name: self.name,
            description: self.description,
            tasks: self.tasks,
            task_index_by_id: self.task_index_by_id,
        }
    }
}

// =============================================================================
// PROJECTIONS
// =============================================================================

/// Board listing entry; tasks are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Full board projection returned by get/create/update/delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDetail {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tasks: Vec<Task>,
    pub task_index_by_id: HashMap<String, usize>,
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<BoardStore>>,
}

impl AppState {
    #[must_use]
    pub fn new(store: BoardStore) -> Self {
        Self { store: Arc::new(RwLock::new(store)) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
