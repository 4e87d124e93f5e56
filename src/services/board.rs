//! Board service: seeding, listing, create/update/delete of boards.
//!
//! DESIGN
//! ======
//! Update and delete are gated on board "completion": while any task on the
//! board is still open, its name/description cannot change and it cannot be
//! removed. The bulk `delete_all_boards` reset is not gated.

use time::OffsetDateTime;
use time::macros::datetime;
use tracing::{debug, info, warn};

use crate::services::store::{BoardStore, StoreError, require_text, truncate_text};
use crate::state::{Board, BoardDetail, BoardSummary, Task};

// =============================================================================
// TYPES
// =============================================================================

/// Whole-record board update. Both fields are required; they are optional
/// here so a missing field can be reported rather than rejected by parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Counter value after seeding; one past the highest seeded id.
const SEED_COUNTER: u64 = 4;

// =============================================================================
// SEEDING
// =============================================================================

impl BoardStore {
    /// Install the default boards when the store is empty. Returns whether
    /// anything was seeded.
    pub fn seed_if_empty(&mut self) -> bool {
        if !self.boards.is_empty() {
            return false;
        }
        info!("seeding default boards");

        let mut planned = Board::new("0".into(), "Planned".into(), "Everything that's on the todo list.".into());
        for (id, name, at) in [
            ("0", "Another task", datetime!(2021-01-21 15:48 UTC)),
            ("1", "Prepare exam draft", datetime!(2021-01-21 16:48 UTC)),
            ("2", "Discuss exam organisation", datetime!(2021-01-21 14:48 UTC)),
        ] {
            append_task(&mut planned, seed_task(id, "0", name, at, false));
        }

        let ongoing = Board::new("1".into(), "Ongoing".into(), "Currently in progress.".into());

        let mut done = Board::new("3".into(), "Done".into(), "Completed tasks.".into());
        append_task(
            &mut done,
            seed_task("3", "3", "Prepare assignment 2", datetime!(2021-01-10 16:00 UTC), true),
        );

        for board in [planned, ongoing, done] {
            self.push_board(board);
        }
        self.board_id_counter = self.board_id_counter.max(SEED_COUNTER);
        self.task_id_counter = self.task_id_counter.max(SEED_COUNTER);
        true
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// All boards in creation order, without tasks.
    #[must_use]
    pub fn list_boards(&self) -> Vec<BoardSummary> {
        self.boards.iter().map(Board::summary).collect()
    }

    /// Full projection of one board.
    ///
    /// # Errors
    ///
    /// Returns `BoardNotFound` or `IdTooLong` when the board does not exist.
    pub fn get_board(&self, board_id: &str) -> Result<BoardDetail, StoreError> {
        Ok(self.board_ref(board_id)?.detail())
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Create an empty board. A missing description is stored as "".
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `name` is empty.
    pub fn create_board(&mut self, name: &str, description: Option<&str>) -> Result<BoardDetail, StoreError> {
        let name = require_text("name", name)?;
        let description = truncate_text(description.unwrap_or_default());
        let id = self.next_board_id();
        let board = Board::new(id, name, description);
        let detail = board.detail();
        self.push_board(board);
        info!(board_id = %detail.id, "created board");
        Ok(detail)
    }

    /// Replace name and description of a board whose tasks are all archived.
    ///
    /// # Errors
    ///
    /// Returns `UnarchivedTasks` if any task is open, `InvalidInput` if a
    /// field is missing or empty, and `BoardNotFound` for an unknown board.
    pub fn update_board(&mut self, board_id: &str, update: BoardUpdate) -> Result<BoardDetail, StoreError> {
        let board = self.board_mut(board_id)?;
        if !board.is_complete() {
            warn!(%board_id, "board update rejected: non-archived tasks");
            return Err(StoreError::UnarchivedTasks(board_id.to_owned()));
        }

        let mut missing = Vec::new();
        if update.name.is_none() {
            missing.push("name");
        }
        if update.description.is_none() {
            missing.push("description");
        }
        let (Some(name), Some(description)) = (update.name, update.description) else {
            debug!(%board_id, ?missing, "board update rejected: missing fields");
            return Err(StoreError::InvalidInput(format!("missing fields: {}", missing.join(", "))));
        };
        let name = require_text("name", &name)?;
        let description = require_text("description", &description)?;

        board.name = name;
        board.description = description;
        info!(%board_id, "updated board");
        Ok(board.detail())
    }

    /// Remove a completed board and return it with its tasks.
    ///
    /// # Errors
    ///
    /// Returns `UnarchivedTasks` if any task is open; the store is unchanged.
    pub fn delete_board(&mut self, board_id: &str) -> Result<BoardDetail, StoreError> {
        let pos = self.board_position(board_id)?;
        if !self.boards[pos].is_complete() {
            warn!(%board_id, "board delete rejected: non-archived tasks");
            return Err(StoreError::UnarchivedTasks(board_id.to_owned()));
        }
        let board = self.remove_board_at(pos);
        info!(%board_id, tasks = board.tasks.len(), "deleted board");
        Ok(board.into_detail())
    }

    /// Remove every board regardless of task state. Counters keep their
    /// values, so ids handed out afterwards are still fresh.
    pub fn delete_all_boards(&mut self) -> Vec<BoardDetail> {
        self.board_index_by_id.clear();
        let removed: Vec<BoardDetail> = self.boards.drain(..).map(Board::into_detail).collect();
        info!(count = removed.len(), "deleted all boards");
        removed
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Append a task to a board's sequence and index.
pub(crate) fn append_task(board: &mut Board, task: Task) {
    board.task_index_by_id.insert(task.id.clone(), board.tasks.len());
    board.tasks.push(task);
}

fn seed_task(id: &str, board_id: &str, task_name: &str, at: OffsetDateTime, archived: bool) -> Task {
    Task {
        id: id.into(),
        board_id: board_id.into(),
        task_name: task_name.into(),
        archived,
        date_created: at.unix_timestamp() * 1000,
    }
}

#[cfg(test)]
#[path = "board_test.rs"]
mod tests;
