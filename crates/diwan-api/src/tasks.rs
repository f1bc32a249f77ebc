//! Handlers for `/tasks` endpoints. Same shape as `/employees`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use diwan_core::{
  EntityStore,
  backend::Backend,
  task::{NewTask, Task, TaskPatch},
};

use crate::error::ApiError;

/// `GET /tasks`
pub async fn list<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
) -> Json<Vec<Task>> {
  Json(store.tasks().await)
}

/// `POST /tasks`
pub async fn create<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Json(body): Json<NewTask>,
) -> Result<impl IntoResponse, ApiError> {
  let task = Task::from_new(body);
  store.add_task(task.clone()).await?;
  Ok((StatusCode::CREATED, Json(task)))
}

/// `GET /tasks/:id`
pub async fn get_one<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
  store
    .task(&id)
    .await
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("task {id} not found")))
}

/// `PATCH /tasks/:id`
pub async fn update_one<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Path(id): Path<String>,
  Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
  store.update_task(&id, patch).await?;
  store
    .task(&id)
    .await
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("task {id} not found")))
}

/// `DELETE /tasks/:id`
pub async fn delete_one<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  store.delete_task(&id).await?;
  Ok(StatusCode::NO_CONTENT)
}
