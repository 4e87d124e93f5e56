//! Task service: create, list, partial update (including moves), delete.
//!
//! DESIGN
//! ======
//! `update_task` validates the whole patch before touching anything, so a
//! rejected patch never leaves a task half-updated. A patch whose `board_id`
//! names a different board is a move: the task is removed from the source
//! sequence, the source index is repaired from the removal point, and the
//! task is appended to the destination. Id and creation time are preserved.

use std::cmp::Ordering;

use time::OffsetDateTime;
use tracing::{debug, info};

use crate::services::board::append_task;
use crate::services::store::{BoardStore, StoreError, reindex_from, require_text};
use crate::state::Task;

// =============================================================================
// TYPES
// =============================================================================

/// Sort orders accepted by `list_tasks_for_board`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSort {
    Id,
    DateCreated,
    TaskName,
}

impl TaskSort {
    /// Parse a sort key. Unknown keys yield `None`, meaning "unsorted".
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "id" => Some(Self::Id),
            "dateCreated" => Some(Self::DateCreated),
            "taskName" => Some(Self::TaskName),
            _ => None,
        }
    }

    /// Stable ascending sort. Names compare case-insensitively; each
    /// lowercased key is computed once.
    fn apply(self, tasks: &mut [Task]) {
        match self {
            Self::Id => tasks.sort_by(|a, b| compare_ids(&a.id, &b.id)),
            Self::DateCreated => tasks.sort_by_key(|t| t.date_created),
            Self::TaskName => tasks.sort_by_cached_key(|t| t.task_name.to_lowercase()),
        }
    }
}

/// Partial task update. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub board_id: Option<String>,
    pub task_name: Option<String>,
    pub archived: Option<bool>,
}

// =============================================================================
// QUERIES
// =============================================================================

impl BoardStore {
    /// Projection of one task.
    ///
    /// # Errors
    ///
    /// Returns `BoardNotFound`/`TaskNotFound` when either id is absent.
    pub fn get_task(&self, board_id: &str, task_id: &str) -> Result<Task, StoreError> {
        let (board_pos, task_pos) = self.task_position(board_id, task_id)?;
        Ok(self.boards[board_pos].tasks[task_pos].clone())
    }

    /// All tasks on a board, optionally sorted ascending.
    ///
    /// # Errors
    ///
    /// Returns `BoardNotFound` (or `IdTooLong`) if the board does not exist.
    pub fn list_tasks_for_board(&self, board_id: &str, sort: Option<TaskSort>) -> Result<Vec<Task>, StoreError> {
        let mut tasks = self.board_ref(board_id)?.tasks.clone();
        if let Some(sort) = sort {
            sort.apply(&mut tasks);
        }
        Ok(tasks)
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Append a new, unarchived task to a board.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name, `BoardNotFound` for an
    /// unknown board. No id is consumed on failure.
    pub fn create_task(&mut self, board_id: &str, task_name: &str) -> Result<Task, StoreError> {
        let task_name = require_text("taskName", task_name)?;
        self.board_position(board_id)?;
        let id = self.next_task_id();
        let task = Task { id, board_id: board_id.to_owned(), task_name, archived: false, date_created: now_millis() };
        append_task(self.board_mut(board_id)?, task.clone());
        info!(%board_id, task_id = %task.id, "created task");
        Ok(task)
    }

    /// Apply a partial update, moving the task when `board_id` changes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when no effective field is present, a text
    /// field is empty, or the move target does not exist. Nothing changes
    /// on error.
    pub fn update_task(&mut self, board_id: &str, task_id: &str, patch: TaskPatch) -> Result<Task, StoreError> {
        let (source_pos, task_pos) = self.task_position(board_id, task_id)?;

        let mut effective = false;
        let mut target_pos = None;
        if let Some(target) = patch.board_id.as_deref() {
            if target.is_empty() {
                return Err(StoreError::InvalidInput("boardId must not be empty".into()));
            }
            if target != board_id {
                if !self.board_exists(target) {
                    debug!(%board_id, %task_id, %target, "task move rejected: unknown target board");
                    return Err(StoreError::InvalidInput(format!("target board {target} does not exist")));
                }
                target_pos = Some(self.board_position(target)?);
                effective = true;
            }
        }
        let task_name = match patch.task_name.as_deref() {
            Some(name) => {
                effective = true;
                Some(require_text("taskName", name)?)
            }
            None => None,
        };
        effective |= patch.archived.is_some();
        if !effective {
            debug!(%board_id, %task_id, "task update rejected: no matching fields");
            return Err(StoreError::InvalidInput("no updatable fields supplied".into()));
        }

        let task = &mut self.boards[source_pos].tasks[task_pos];
        if let Some(name) = task_name {
            task.task_name = name;
        }
        if let Some(archived) = patch.archived {
            task.archived = archived;
        }

        let Some(target_pos) = target_pos else {
            info!(%board_id, %task_id, "updated task");
            return Ok(task.clone());
        };

        let source = &mut self.boards[source_pos];
        let mut task = source.tasks.remove(task_pos);
        source.task_index_by_id.remove(task_id);
        reindex_from(&source.tasks, &mut source.task_index_by_id, task_pos, |t| &t.id);

        let destination = &mut self.boards[target_pos];
        task.board_id.clone_from(&destination.id);
        let moved = task.clone();
        append_task(destination, task);
        info!(from = %board_id, to = %moved.board_id, %task_id, "moved task");
        Ok(moved)
    }

    /// Remove a task and return it.
    ///
    /// # Errors
    ///
    /// Returns `BoardNotFound`/`TaskNotFound` when either id is absent.
    pub fn delete_task(&mut self, board_id: &str, task_id: &str) -> Result<Task, StoreError> {
        let (board_pos, task_pos) = self.task_position(board_id, task_id)?;
        let board = &mut self.boards[board_pos];
        let task = board.tasks.remove(task_pos);
        board.task_index_by_id.remove(task_id);
        reindex_from(&board.tasks, &mut board.task_index_by_id, task_pos, |t| &t.id);
        info!(%board_id, %task_id, "deleted task");
        Ok(task)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Numeric order for numeric ids, lexical otherwise.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

fn now_millis() -> i64 {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    i64::try_from(millis).unwrap_or(i64::MAX)
}

#[cfg(test)]
#[path = "task_test.rs"]
mod tests;
