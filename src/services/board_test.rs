use super::*;

fn seeded() -> BoardStore {
    let mut store = BoardStore::new();
    assert!(store.seed_if_empty());
    store
}

fn full_update(name: &str, description: &str) -> BoardUpdate {
    BoardUpdate { name: Some(name.into()), description: Some(description.into()) }
}

// =============================================================================
// SEEDING
// =============================================================================

#[test]
fn seed_installs_default_boards() {
    let store = seeded();
    let ids: Vec<_> = store.list_boards().into_iter().map(|b| b.id).collect();
    assert_eq!(ids, ["0", "1", "3"]);
    assert_eq!(store.board_id_counter, 4);
    assert_eq!(store.task_id_counter, 4);

    let planned = store.get_board("0").unwrap();
    assert_eq!(planned.name, "Planned");
    assert_eq!(planned.tasks.len(), 3);
    assert_eq!(planned.task_index_by_id.get("2"), Some(&2));
    assert_eq!(planned.tasks[0].date_created, 1_611_244_080_000);

    let done = store.get_board("3").unwrap();
    assert!(done.tasks[0].archived);
    assert_eq!(done.tasks[0].date_created, 1_610_294_400_000);
}

#[test]
fn seed_is_noop_when_boards_exist() {
    let mut store = BoardStore::new();
    store.create_board("Mine", None).unwrap();
    assert!(!store.seed_if_empty());
    assert_eq!(store.list_boards().len(), 1);
}

#[test]
fn seed_after_reset_does_not_lower_counters() {
    let mut store = seeded();
    for i in 0..6 {
        store.create_board(&format!("b{i}"), None).unwrap();
    }
    store.delete_all_boards();
    assert!(store.seed_if_empty());
    assert_eq!(store.board_id_counter, 10);
}

// =============================================================================
// CREATE / LIST / GET
// =============================================================================

#[test]
fn created_board_is_listed_once_with_empty_description() {
    let mut store = BoardStore::new();
    let created = store.create_board("X", None).unwrap();
    let listed: Vec<_> = store.list_boards().into_iter().filter(|b| b.name == "X").collect();
    assert_eq!(listed, [BoardSummary { id: created.id, name: "X".into(), description: String::new() }]);
}

#[test]
fn create_board_skips_seeded_ids() {
    let mut store = seeded();
    let board = store.create_board("Review", Some("things to review")).unwrap();
    assert_eq!(board.id, "4");
    assert!(board.tasks.is_empty());
    assert!(board.task_index_by_id.is_empty());
    assert_eq!(board.description, "things to review");
}

#[test]
fn create_board_fills_gaps_left_by_counter() {
    let mut store = seeded();
    store.board_id_counter = 2;
    let board = store.create_board("Gap", None).unwrap();
    assert_eq!(board.id, "2");
    let next = store.create_board("After", None).unwrap();
    assert_eq!(next.id, "4");
}

#[test]
fn create_board_truncates_long_fields() {
    let mut store = BoardStore::new();
    let board = store.create_board(&"n".repeat(130), Some(&"d".repeat(121))).unwrap();
    assert_eq!(board.name.chars().count(), 123);
    assert_eq!(board.description.chars().count(), 123);
    assert!(board.name.ends_with("..."));
}

#[test]
fn create_board_rejects_empty_name() {
    let mut store = BoardStore::new();
    assert!(matches!(store.create_board("", Some("d")), Err(StoreError::InvalidInput(_))));
    assert!(store.list_boards().is_empty());
    assert_eq!(store.board_id_counter, 0);
}

#[test]
fn get_board_unknown_id_is_not_found() {
    let store = seeded();
    assert!(matches!(store.get_board("2"), Err(StoreError::BoardNotFound(_))));
    assert!(matches!(store.get_board("00000"), Err(StoreError::IdTooLong(_))));
}

// =============================================================================
// UPDATE
// =============================================================================

#[test]
fn update_empty_board_succeeds() {
    let mut store = seeded();
    let updated = store.update_board("1", full_update("X", "Y")).unwrap();
    assert_eq!(updated.id, "1");
    assert_eq!(updated.name, "X");
    assert_eq!(updated.description, "Y");
    assert_eq!(store.list_boards()[1].name, "X");
}

#[test]
fn update_archived_board_returns_tasks() {
    let mut store = seeded();
    let updated = store.update_board("3", full_update("Finished", "All done")).unwrap();
    assert_eq!(updated.tasks.len(), 1);
    assert_eq!(updated.task_index_by_id.get("3"), Some(&0));
}

#[test]
fn update_board_with_open_tasks_is_rejected() {
    let mut store = seeded();
    let err = store.update_board("0", full_update("X", "Y")).unwrap_err();
    assert_eq!(err, StoreError::UnarchivedTasks("0".into()));
    assert_eq!(store.get_board("0").unwrap().name, "Planned");
}

#[test]
fn update_board_requires_both_fields() {
    let mut store = seeded();
    let only_name = BoardUpdate { name: Some("X".into()), description: None };
    assert!(matches!(store.update_board("1", only_name), Err(StoreError::InvalidInput(_))));
    let only_description = BoardUpdate { name: None, description: Some("Y".into()) };
    assert!(matches!(store.update_board("1", only_description), Err(StoreError::InvalidInput(_))));
    assert_eq!(store.get_board("1").unwrap().name, "Ongoing");
}

#[test]
fn update_board_rejects_empty_values() {
    let mut store = seeded();
    assert!(store.update_board("1", full_update("X", "")).is_err());
    assert!(store.update_board("1", full_update("", "Y")).is_err());
    assert_eq!(store.get_board("1").unwrap().description, "Currently in progress.");
}

#[test]
fn update_board_truncates() {
    let mut store = seeded();
    let updated = store.update_board("1", full_update(&"x".repeat(200), "short")).unwrap();
    assert_eq!(updated.name.chars().count(), 123);
}

// =============================================================================
// DELETE
// =============================================================================

#[test]
fn delete_board_with_open_task_changes_nothing() {
    let mut store = seeded();
    let before = store.get_board("0").unwrap();
    assert_eq!(store.delete_board("0"), Err(StoreError::UnarchivedTasks("0".into())));
    assert_eq!(store.get_board("0").unwrap(), before);
    assert_eq!(store.board_index_by_id.get("0"), Some(&0));
}

#[test]
fn delete_board_returns_tasks_and_repairs_index() {
    let mut store = seeded();
    store.create_board("Later", None).unwrap();

    let deleted = store.delete_board("1").unwrap();
    assert_eq!(deleted.id, "1");
    assert!(!store.board_exists("1"));
    assert_eq!(store.board_index_by_id.get("3"), Some(&1));
    assert_eq!(store.board_index_by_id.get("4"), Some(&2));

    let done = store.delete_board("3").unwrap();
    assert_eq!(done.tasks.len(), 1);
    assert_eq!(done.tasks[0].task_name, "Prepare assignment 2");
    assert_eq!(store.board_index_by_id.get("4"), Some(&1));
}

#[test]
fn deleted_board_id_is_not_reused() {
    let mut store = seeded();
    let board = store.create_board("Temp", None).unwrap();
    store.delete_board(&board.id).unwrap();
    let next = store.create_board("Next", None).unwrap();
    assert_ne!(next.id, board.id);
}

#[test]
fn delete_all_boards_ignores_archive_state() {
    let mut store = seeded();
    let removed = store.delete_all_boards();
    assert_eq!(removed.len(), 3);
    assert_eq!(removed[0].tasks.len(), 3);
    assert!(store.list_boards().is_empty());
    assert!(store.board_index_by_id.is_empty());
    assert_eq!(store.board_id_counter, 4);
    assert_eq!(store.task_id_counter, 4);
}
