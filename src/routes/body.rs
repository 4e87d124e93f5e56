//! Request body parsing.
//!
//! Bodies arrive as raw bytes and are read into a JSON object here, so that
//! kind checks (strings vs. structured values) and unknown-key rejection
//! happen before anything reaches the store. Strings pass through; numbers
//! and booleans are rendered as text; `null`, arrays and objects are
//! invalid wherever text is expected.

use serde_json::{Map, Value};

use crate::services::board::BoardUpdate;
use crate::services::store::StoreError;
use crate::services::task::TaskPatch;

pub type JsonObject = Map<String, Value>;

/// Parse a request body into a JSON object. An empty body is an empty object.
///
/// # Errors
///
/// Returns `InvalidInput` for malformed JSON or a non-object top level.
pub fn parse_object(bytes: &[u8]) -> Result<JsonObject, StoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonObject::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(StoreError::InvalidInput("body must be a JSON object".into())),
        Err(e) => Err(StoreError::InvalidInput(format!("malformed JSON: {e}"))),
    }
}

/// Text form of a scalar JSON value.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// `name` and optional `description` for board creation. Extra keys are
/// ignored; a structured description falls back to empty.
///
/// # Errors
///
/// Returns `InvalidInput` if `name` is missing, empty or structured.
pub fn new_board_fields(body: &JsonObject) -> Result<(String, Option<String>), StoreError> {
    let name = body
        .get("name")
        .and_then(scalar_text)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| StoreError::InvalidInput("name is required".into()))?;
    let description = body.get("description").and_then(scalar_text);
    Ok((name, description))
}

/// `taskName` for task creation.
///
/// # Errors
///
/// Returns `InvalidInput` if `taskName` is missing, empty or structured.
pub fn new_task_name(body: &JsonObject) -> Result<String, StoreError> {
    body.get("taskName")
        .and_then(scalar_text)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| StoreError::InvalidInput("taskName is required".into()))
}

/// Whole-record board update. Only `name` and `description` are allowed.
///
/// # Errors
///
/// Returns `InvalidInput` naming every unknown key or non-text value.
pub fn board_update(body: &JsonObject) -> Result<BoardUpdate, StoreError> {
    let mut update = BoardUpdate::default();
    let mut rejected = Vec::new();
    for (key, value) in body {
        let slot = match key.as_str() {
            "name" => &mut update.name,
            "description" => &mut update.description,
            _ => {
                rejected.push(key.as_str());
                continue;
            }
        };
        match scalar_text(value) {
            Some(text) => *slot = Some(text),
            None => rejected.push(key.as_str()),
        }
    }
    reject_keys(&rejected)?;
    Ok(update)
}

/// Partial task update over `boardId`, `taskName` and `archived`.
///
/// # Errors
///
/// Returns `InvalidInput` naming every unknown key or ill-typed value.
pub fn task_patch(body: &JsonObject) -> Result<TaskPatch, StoreError> {
    let mut patch = TaskPatch::default();
    let mut rejected = Vec::new();
    for (key, value) in body {
        let accepted = match key.as_str() {
            "boardId" => scalar_text(value).map(|text| patch.board_id = Some(text)),
            "taskName" => scalar_text(value).map(|text| patch.task_name = Some(text)),
            "archived" => value.as_bool().map(|flag| patch.archived = Some(flag)),
            _ => None,
        };
        if accepted.is_none() {
            rejected.push(key.as_str());
        }
    }
    reject_keys(&rejected)?;
    Ok(patch)
}

fn reject_keys(rejected: &[&str]) -> Result<(), StoreError> {
    if rejected.is_empty() {
        return Ok(());
    }
    Err(StoreError::InvalidInput(format!("bad parameters: {}", rejected.join(", "))))
}

#[cfg(test)]
#[path = "body_test.rs"]
mod tests;
