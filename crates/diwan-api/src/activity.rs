//! Handler for `/activity`. Read-only: entries are produced by the store
//! itself as a side effect of mutations.

use std::sync::Arc;

use axum::{Json, extract::State};
use diwan_core::{EntityStore, activity::ActivityEntry, backend::Backend};

/// `GET /activity` — newest first, capped by the store.
pub async fn list<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
) -> Json<Vec<ActivityEntry>> {
  Json(store.activity_log().await)
}
