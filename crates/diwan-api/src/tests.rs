use std::sync::Arc;

use axum::{
  Router,
  body::{Body, to_bytes},
  http::{Request, StatusCode, header},
};
use diwan_core::{EntityStore, memory::MemoryBackend};
use serde_json::{Value, json};
use tower::ServiceExt as _;

use super::*;

fn app() -> Router<()> {
  let store = Arc::new(EntityStore::new(Arc::new(MemoryBackend::new())));
  api_router(store)
}

async fn send(
  app: &Router<()>,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(json) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(json.to_string())
    }
    None => Body::empty(),
  };
  let response = app
    .clone()
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap();
  let status = response.status();
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

#[tokio::test]
async fn create_then_list_tasks() {
  let app = app();

  let (status, created) = send(
    &app,
    "POST",
    "/tasks",
    Some(json!({ "title": "flush the canal gates", "points": 5 })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["title"], "flush the canal gates");
  assert_eq!(created["status"], "new");

  let (status, listed) = send(&app, "GET", "/tasks", None).await;
  assert_eq!(status, StatusCode::OK);
  let listed = listed.as_array().unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0]["id"], created["id"]);
}

#[tokio::test]
async fn get_missing_task_is_404() {
  let app = app();
  let (status, body) = send(&app, "GET", "/tasks/nope", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["error"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn patch_merges_and_returns_updated_task() {
  let app = app();
  let (_, created) = send(
    &app,
    "POST",
    "/tasks",
    Some(json!({ "title": "dredge branch 3", "points": 8 })),
  )
  .await;
  let id = created["id"].as_str().unwrap();

  let (status, updated) = send(
    &app,
    "PATCH",
    &format!("/tasks/{id}"),
    Some(json!({ "status": "completed", "completed_by": ["emp-7"] })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["status"], "completed");
  assert_eq!(updated["completed_by"], json!(["emp-7"]));
  // Untouched fields survive the merge.
  assert_eq!(updated["title"], "dredge branch 3");
  assert_eq!(updated["points"], 8);
}

#[tokio::test]
async fn delete_task_returns_204_and_removes_it() {
  let app = app();
  let (_, created) =
    send(&app, "POST", "/tasks", Some(json!({ "title": "t" }))).await;
  let id = created["id"].as_str().unwrap();

  let (status, _) = send(&app, "DELETE", &format!("/tasks/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (status, _) = send(&app, "GET", &format!("/tasks/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn correspondence_kind_filter() {
  let app = app();
  send(
    &app,
    "POST",
    "/correspondence",
    Some(json!({
      "number":  "IN-2024-001",
      "kind":    "incoming",
      "subject": "water quota inquiry",
    })),
  )
  .await;
  send(
    &app,
    "POST",
    "/correspondence",
    Some(json!({
      "number":  "OUT-2024-001",
      "kind":    "outgoing",
      "subject": "quota response",
    })),
  )
  .await;

  let (_, all) = send(&app, "GET", "/correspondence", None).await;
  assert_eq!(all.as_array().unwrap().len(), 2);

  let (_, incoming) =
    send(&app, "GET", "/correspondence?kind=incoming", None).await;
  let incoming = incoming.as_array().unwrap();
  assert_eq!(incoming.len(), 1);
  assert_eq!(incoming[0]["subject"], "water quota inquiry");
}

#[tokio::test]
async fn patch_unknown_correspondence_is_404() {
  let app = app();
  let (status, _) = send(
    &app,
    "PATCH",
    "/correspondence/ghost",
    Some(json!({ "subject": "x" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn settings_patch_merges_into_defaults() {
  let app = app();
  let (status, initial) = send(&app, "GET", "/settings", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(initial["currency"], "EGP");

  let (status, merged) = send(
    &app,
    "PATCH",
    "/settings",
    Some(json!({ "organization_name": "هيئة الري", "theme": "dark" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(merged["organization_name"], "هيئة الري");
  assert_eq!(merged["theme"], "dark");
  assert_eq!(merged["currency"], "EGP");
}

#[tokio::test]
async fn stats_reflect_collections() {
  let app = app();
  send(
    &app,
    "POST",
    "/tasks",
    Some(json!({ "title": "a", "status": "completed", "points": 3 })),
  )
  .await;
  send(&app, "POST", "/tasks", Some(json!({ "title": "b", "points": 2 })))
    .await;
  send(&app, "POST", "/employees", Some(json!({ "name": "Amal" }))).await;

  let (status, stats) = send(&app, "GET", "/stats", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(stats["tasks"]["total"], 2);
  assert_eq!(stats["tasks"]["completed"], 1);
  assert_eq!(stats["tasks"]["total_points"], 5);
  assert_eq!(stats["employees"]["total"], 1);
}

#[tokio::test]
async fn activity_log_records_mutations_newest_first() {
  let app = app();
  send(&app, "POST", "/tasks", Some(json!({ "title": "first" }))).await;
  send(&app, "POST", "/tasks", Some(json!({ "title": "second" }))).await;

  let (status, log) = send(&app, "GET", "/activity", None).await;
  assert_eq!(status, StatusCode::OK);
  let log = log.as_array().unwrap();
  assert_eq!(log.len(), 2);
  assert!(log[0]["details"].as_str().unwrap().contains("second"));
  assert!(log[1]["details"].as_str().unwrap().contains("first"));
}
