//! Board store: owned board/task collections with O(1) id indices.
//!
//! DESIGN
//! ======
//! Boards live in an insertion-ordered `Vec` with a `board_index_by_id` map
//! from id to position; each board carries the same pairing for its tasks.
//! Every removal from one of those sequences is followed by `reindex_from`,
//! which rewrites the positions of the elements that shifted left.
//!
//! Ids are decimal strings drawn from two counters that only ever grow. Task
//! ids are global across boards. Board ids additionally skip any value that
//! is already in use (the seed set leaves a gap at `2`).
//!
//! ERROR HANDLING
//! ==============
//! Operations return `StoreError` values and never panic. Ids longer than
//! `MAX_ID_CHARS` are treated as absent rather than looked up.

use std::collections::HashMap;

use tracing::debug;

use crate::state::Board;

/// Longest stored name/description/task name before truncation.
pub const MAX_TEXT_CHARS: usize = 120;
/// Ids longer than this can never exist.
pub const MAX_ID_CHARS: usize = 4;
const ELLIPSIS: &str = "...";

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("board not found: {0}")]
    BoardNotFound(String),
    #[error("task {task_id} not found on board {board_id}")]
    TaskNotFound { board_id: String, task_id: String },
    #[error("board {0} has tasks that are not archived")]
    UnarchivedTasks(String),
    #[error("identifier too long: {0}")]
    IdTooLong(String),
}

impl StoreError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "E_INVALID_INPUT",
            Self::BoardNotFound(_) => "E_BOARD_NOT_FOUND",
            Self::TaskNotFound { .. } => "E_TASK_NOT_FOUND",
            Self::UnarchivedTasks(_) => "E_UNARCHIVED_TASKS",
            Self::IdTooLong(_) => "E_ID_TOO_LONG",
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Debug, Default)]
pub struct BoardStore {
    pub(crate) boards: Vec<Board>,
    pub(crate) board_index_by_id: HashMap<String, usize>,
    pub(crate) board_id_counter: u64,
    pub(crate) task_id_counter: u64,
}

impl BoardStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a board with this id exists. Over-long ids are never present.
    #[must_use]
    pub fn board_exists(&self, board_id: &str) -> bool {
        if !id_within_bounds(board_id) {
            debug!(%board_id, "board id length error");
            return false;
        }
        self.board_index_by_id.contains_key(board_id)
    }

    /// Whether the task exists on the given board.
    #[must_use]
    pub fn task_exists(&self, board_id: &str, task_id: &str) -> bool {
        if !id_within_bounds(board_id) || !id_within_bounds(task_id) {
            debug!(%board_id, %task_id, "board or task id length error");
            return false;
        }
        self.board_index_by_id
            .get(board_id)
            .is_some_and(|&pos| self.boards[pos].task_index_by_id.contains_key(task_id))
    }

    pub(crate) fn board_position(&self, board_id: &str) -> Result<usize, StoreError> {
        if !id_within_bounds(board_id) {
            return Err(StoreError::IdTooLong(board_id.to_owned()));
        }
        self.board_index_by_id
            .get(board_id)
            .copied()
            .ok_or_else(|| StoreError::BoardNotFound(board_id.to_owned()))
    }

    pub(crate) fn board_ref(&self, board_id: &str) -> Result<&Board, StoreError> {
        let pos = self.board_position(board_id)?;
        Ok(&self.boards[pos])
    }

    pub(crate) fn board_mut(&mut self, board_id: &str) -> Result<&mut Board, StoreError> {
        let pos = self.board_position(board_id)?;
        Ok(&mut self.boards[pos])
    }

    /// Position of a task within its board's sequence.
    pub(crate) fn task_position(&self, board_id: &str, task_id: &str) -> Result<(usize, usize), StoreError> {
        let board_pos = self.board_position(board_id)?;
        if !id_within_bounds(task_id) {
            return Err(StoreError::IdTooLong(task_id.to_owned()));
        }
        let task_pos = self.boards[board_pos]
            .task_index_by_id
            .get(task_id)
            .copied()
            .ok_or_else(|| StoreError::TaskNotFound { board_id: board_id.to_owned(), task_id: task_id.to_owned() })?;
        Ok((board_pos, task_pos))
    }

    /// Allocate the next unused board id. Advances the counter past any
    /// value already taken.
    pub(crate) fn next_board_id(&mut self) -> String {
        let mut candidate = self.board_id_counter;
        self.board_id_counter += 1;
        while self.board_index_by_id.contains_key(&candidate.to_string()) {
            candidate += 1;
            self.board_id_counter += 1;
        }
        candidate.to_string()
    }

    /// Allocate the next task id. Task ids are never reused, so no scan.
    pub(crate) fn next_task_id(&mut self) -> String {
        let id = self.task_id_counter;
        self.task_id_counter += 1;
        id.to_string()
    }

    /// Append a board and index it.
    pub(crate) fn push_board(&mut self, board: Board) {
        self.board_index_by_id.insert(board.id.clone(), self.boards.len());
        self.boards.push(board);
    }

    /// Remove the board at `pos` and repair positions of the boards after it.
    pub(crate) fn remove_board_at(&mut self, pos: usize) -> Board {
        let board = self.boards.remove(pos);
        self.board_index_by_id.remove(&board.id);
        reindex_from(&self.boards, &mut self.board_index_by_id, pos, |b| &b.id);
        board
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Rewrite `index` entries for every item at or after `start`.
pub(crate) fn reindex_from<T>(
    items: &[T],
    index: &mut HashMap<String, usize>,
    start: usize,
    id_of: impl Fn(&T) -> &str,
) {
    for (pos, item) in items.iter().enumerate().skip(start) {
        index.insert(id_of(item).to_owned(), pos);
    }
}

pub(crate) fn id_within_bounds(id: &str) -> bool {
    id.chars().count() <= MAX_ID_CHARS
}

/// Cut text to `MAX_TEXT_CHARS` characters, marking the cut with "...".
#[must_use]
pub fn truncate_text(text: &str) -> String {
    if text.chars().count() <= MAX_TEXT_CHARS {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(MAX_TEXT_CHARS).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Validate a required text field and truncate it.
pub(crate) fn require_text(field: &str, value: &str) -> Result<String, StoreError> {
    if value.is_empty() {
        return Err(StoreError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(truncate_text(value))
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
