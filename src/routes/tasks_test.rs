use super::*;
use crate::state::test_helpers;

fn bytes(json: &'static str) -> Bytes {
    Bytes::from_static(json.as_bytes())
}

fn ids(board: &str, task: &str) -> Path<(String, String)> {
    Path((board.into(), task.into()))
}

#[tokio::test]
async fn list_tasks_sorts_by_query() {
    let state = test_helpers::seeded_app_state();
    let query = ListTasksQuery { sort: Some("taskName".into()) };
    let Json(tasks) = list_tasks(State(state.clone()), Path("0".into()), Query(query)).await.unwrap();
    let names: Vec<_> = tasks.iter().map(|t| t.task_name.as_str()).collect();
    assert_eq!(names, ["Another task", "Discuss exam organisation", "Prepare exam draft"]);

    let unknown = ListTasksQuery { sort: Some("archived".into()) };
    let Json(unsorted) = list_tasks(State(state), Path("0".into()), Query(unknown)).await.unwrap();
    assert_eq!(unsorted[1].task_name, "Prepare exam draft");
}

#[tokio::test]
async fn list_tasks_missing_board_is_not_found() {
    let state = test_helpers::seeded_app_state();
    let result = list_tasks(State(state), Path("2".into()), Query(ListTasksQuery::default())).await;
    assert_eq!(result.unwrap_err(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_task_statuses() {
    let state = test_helpers::seeded_app_state();
    let (status, Json(task)) = create_task(State(state.clone()), Path("1".into()), bytes(r#"{"taskName":"T"}"#))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task.id, "4");
    assert_eq!(task.board_id, "1");

    let bad = create_task(State(state.clone()), Path("1".into()), bytes(r#"{"taskName":[]}"#)).await;
    assert_eq!(bad.unwrap_err(), StatusCode::BAD_REQUEST);

    let missing = create_task(State(state), Path("2".into()), bytes(r#"{"taskName":"T"}"#)).await;
    assert_eq!(missing.unwrap_err(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_task_statuses() {
    let state = test_helpers::seeded_app_state();
    let Json(task) = get_task(State(state.clone()), ids("3", "3")).await.unwrap();
    assert!(task.archived);
    assert_eq!(get_task(State(state.clone()), ids("0", "3")).await.unwrap_err(), StatusCode::NOT_FOUND);
    assert_eq!(get_task(State(state), ids("0", "00000")).await.unwrap_err(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_task_moves_between_boards() {
    let state = test_helpers::seeded_app_state();
    let Json(task) = update_task(State(state.clone()), ids("0", "1"), bytes(r#"{"boardId":"1","archived":true}"#))
        .await
        .unwrap();
    assert_eq!(task.board_id, "1");
    assert!(task.archived);

    let store = state.store.read().await;
    assert!(store.task_exists("1", "1"));
    assert!(!store.task_exists("0", "1"));
}

#[tokio::test]
async fn update_task_rejections() {
    let state = test_helpers::seeded_app_state();
    let cases = [
        ("{}", StatusCode::BAD_REQUEST),
        (r#"{"boardId":"2"}"#, StatusCode::BAD_REQUEST),
        (r#"{"archived":"yes"}"#, StatusCode::BAD_REQUEST),
        (r#"{"taskName":"T","id":"9"}"#, StatusCode::BAD_REQUEST),
        (r#"{"boardId":"0"}"#, StatusCode::BAD_REQUEST),
    ];
    for (payload, expected) in cases {
        let result = update_task(State(state.clone()), ids("0", "0"), bytes(payload)).await;
        assert_eq!(result.unwrap_err(), expected, "payload {payload}");
    }
    let missing = update_task(State(state.clone()), ids("1", "0"), bytes(r#"{"archived":true}"#)).await;
    assert_eq!(missing.unwrap_err(), StatusCode::NOT_FOUND);

    let task = state.store.read().await.get_task("0", "0").unwrap();
    assert_eq!(task.task_name, "Another task");
    assert!(!task.archived);
}

#[tokio::test]
async fn delete_task_statuses() {
    let state = test_helpers::seeded_app_state();
    let with_body = delete_task(State(state.clone()), ids("0", "0"), bytes(r#"{"force":true}"#)).await;
    assert_eq!(with_body.unwrap_err(), StatusCode::BAD_REQUEST);

    let Json(task) = delete_task(State(state.clone()), ids("0", "0"), Bytes::new()).await.unwrap();
    assert_eq!(task.task_name, "Another task");
    assert_eq!(delete_task(State(state), ids("0", "0"), Bytes::new()).await.unwrap_err(), StatusCode::NOT_FOUND);
}
