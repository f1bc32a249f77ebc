//! Handlers for the `/settings` singleton.

use std::sync::Arc;

use axum::{Json, extract::State};
use diwan_core::{
  EntityStore,
  backend::Backend,
  settings::{SettingsPatch, SystemSettings},
};

use crate::error::ApiError;

pub async fn get_settings<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
) -> Json<SystemSettings> {
  Json(store.settings().await)
}

/// `PATCH /settings` — merges the patch and returns the full merged record.
pub async fn update_settings<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Json(patch): Json<SettingsPatch>,
) -> Result<Json<SystemSettings>, ApiError> {
  store.update_settings(patch).await?;
  Ok(Json(store.settings().await))
}
