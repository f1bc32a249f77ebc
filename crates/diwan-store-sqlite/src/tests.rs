//! Integration tests for `SqliteBackend` against an in-memory database.

use std::sync::Arc;

use diwan_core::{
  EntityStore,
  backend::{Backend, Collection},
  task::{NewTask, Task},
};
use serde_json::json;

use crate::{Error, SqliteBackend};

async fn backend() -> SqliteBackend {
  SqliteBackend::open_in_memory()
    .await
    .expect("in-memory backend")
}

// ─── Backend contract ────────────────────────────────────────────────────────

#[tokio::test]
async fn open_leaves_backend_initialized() {
  let b = backend().await;
  assert!(b.is_initialized());
}

#[tokio::test]
async fn add_then_get_all_round_trips() {
  let b = backend().await;
  let record = json!({"id": "1-0", "title": "dredge the west canal"});
  let id = b.add(Collection::Tasks, record.clone()).await.unwrap();
  assert_eq!(id, "1-0");

  let all = b.get_all(Collection::Tasks).await.unwrap();
  assert_eq!(all, vec![record]);
}

#[tokio::test]
async fn get_by_id_finds_and_misses() {
  let b = backend().await;
  b.add(Collection::Employees, json!({"id": "e-1", "name": "Zain"}))
    .await
    .unwrap();

  let found = b.get_by_id(Collection::Employees, "e-1").await.unwrap();
  assert_eq!(found.unwrap()["name"], "Zain");

  let missing = b.get_by_id(Collection::Employees, "e-2").await.unwrap();
  assert!(missing.is_none());
}

#[tokio::test]
async fn add_existing_id_replaces_the_document() {
  let b = backend().await;
  b.add(Collection::Tasks, json!({"id": "t-1", "title": "old"}))
    .await
    .unwrap();
  b.add(Collection::Tasks, json!({"id": "t-1", "title": "new"}))
    .await
    .unwrap();

  let all = b.get_all(Collection::Tasks).await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0]["title"], "new");
}

#[tokio::test]
async fn add_without_id_errors() {
  let b = backend().await;
  let err = b
    .add(Collection::Tasks, json!({"title": "anonymous"}))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::MissingId));
}

#[tokio::test]
async fn update_shallow_merges_the_document() {
  let b = backend().await;
  b.add(
    Collection::Tasks,
    json!({"id": "t-2", "title": "keep", "status": "new", "points": 5}),
  )
  .await
  .unwrap();

  b.update(Collection::Tasks, "t-2", json!({"status": "completed"}))
    .await
    .unwrap();

  let doc = b.get_by_id(Collection::Tasks, "t-2").await.unwrap().unwrap();
  assert_eq!(doc["status"], "completed");
  assert_eq!(doc["title"], "keep");
  assert_eq!(doc["points"], 5);
}

#[tokio::test]
async fn update_missing_id_is_a_noop() {
  let b = backend().await;
  b.update(Collection::Tasks, "ghost", json!({"title": "x"}))
    .await
    .unwrap();
  assert!(b.get_all(Collection::Tasks).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_only_the_matching_row() {
  let b = backend().await;
  b.add(Collection::Departments, json!({"id": "d-1", "name": "pumps"}))
    .await
    .unwrap();
  b.add(Collection::Departments, json!({"id": "d-2", "name": "canals"}))
    .await
    .unwrap();

  b.delete(Collection::Departments, "d-1").await.unwrap();

  let all = b.get_all(Collection::Departments).await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0]["id"], "d-2");
}

#[tokio::test]
async fn delete_missing_id_is_a_noop() {
  let b = backend().await;
  b.delete(Collection::Departments, "ghost").await.unwrap();
}

#[tokio::test]
async fn collections_are_disjoint_partitions() {
  let b = backend().await;
  b.add(
    Collection::IncomingCorrespondence,
    json!({"id": "c-1", "number": "IN-1"}),
  )
  .await
  .unwrap();
  b.add(
    Collection::OutgoingCorrespondence,
    json!({"id": "c-2", "number": "OUT-1"}),
  )
  .await
  .unwrap();

  let incoming = b.get_all(Collection::IncomingCorrespondence).await.unwrap();
  let outgoing = b.get_all(Collection::OutgoingCorrespondence).await.unwrap();
  assert_eq!(incoming.len(), 1);
  assert_eq!(outgoing.len(), 1);
  assert_eq!(incoming[0]["number"], "IN-1");
  assert_eq!(outgoing[0]["number"], "OUT-1");
}

#[tokio::test]
async fn get_all_preserves_insertion_order() {
  let b = backend().await;
  for i in 0..5 {
    b.add(Collection::Tasks, json!({"id": format!("t-{i}"), "seq": i}))
      .await
      .unwrap();
  }

  let all = b.get_all(Collection::Tasks).await.unwrap();
  let seqs: Vec<i64> = all.iter().map(|v| v["seq"].as_i64().unwrap()).collect();
  assert_eq!(seqs, vec![0, 1, 2, 3, 4]);
}

// ─── Entity store over SQLite ────────────────────────────────────────────────

#[tokio::test]
async fn entity_store_survives_a_reload() {
  let b = Arc::new(backend().await);

  let store = EntityStore::new(Arc::clone(&b));
  let task = Task::from_new(NewTask {
    title: "inspect barrage gates".to_owned(),
    ..NewTask::default()
  });
  let id = task.id.clone();
  store.add_task(task).await.unwrap();

  // A second store over the same database sees the durable copy.
  let fresh = EntityStore::new(b);
  fresh.load_tasks().await;
  let reloaded = fresh.task(&id).await.unwrap();
  assert_eq!(reloaded.title, "inspect barrage gates");
}
