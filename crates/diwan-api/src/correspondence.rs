//! Handlers for `/correspondence` endpoints.
//!
//! Both partitions (incoming and outgoing) sit behind one resource; the
//! store routes writes to the right partition from the record's kind.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use diwan_core::{
  EntityStore,
  backend::Backend,
  correspondence::{
    Correspondence, CorrespondenceKind, CorrespondencePatch, NewCorrespondence,
  },
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub kind: Option<CorrespondenceKind>,
}

/// `GET /correspondence[?kind=incoming|outgoing]`
pub async fn list<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Query(params): Query<ListParams>,
) -> Json<Vec<Correspondence>> {
  let mut records = store.correspondence().await;
  if let Some(kind) = params.kind {
    records.retain(|c| c.kind == kind);
  }
  Json(records)
}

/// `POST /correspondence`
pub async fn create<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Json(body): Json<NewCorrespondence>,
) -> Result<impl IntoResponse, ApiError> {
  let record = Correspondence::from_new(body);
  store.add_correspondence(record.clone()).await?;
  Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /correspondence/:id`
pub async fn get_one<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Path(id): Path<String>,
) -> Result<Json<Correspondence>, ApiError> {
  store
    .correspondence_by_id(&id)
    .await
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("correspondence {id} not found")))
}

/// `PATCH /correspondence/:id` — 404 if the id is unknown to the store.
pub async fn update_one<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Path(id): Path<String>,
  Json(patch): Json<CorrespondencePatch>,
) -> Result<Json<Correspondence>, ApiError> {
  store.update_correspondence(&id, patch).await?;
  store
    .correspondence_by_id(&id)
    .await
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("correspondence {id} not found")))
}

/// `DELETE /correspondence/:id`
pub async fn delete_one<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  store.delete_correspondence(&id).await?;
  Ok(StatusCode::NO_CONTENT)
}
