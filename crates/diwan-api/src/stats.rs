//! Handler for `/stats` — dashboard aggregates computed from the store's
//! in-memory snapshots, never from the backend directly.

use std::sync::Arc;

use axum::{Json, extract::State};
use diwan_core::{
  EntityStore,
  backend::Backend,
  stats::{CorrespondenceStats, EmployeeStats, TaskStats},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
  pub tasks:          TaskStats,
  pub correspondence: CorrespondenceStats,
  pub employees:      EmployeeStats,
}

pub async fn dashboard<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
) -> Json<DashboardStats> {
  let tasks = store.tasks().await;
  let correspondence = store.correspondence().await;
  let employees = store.employees().await;
  Json(DashboardStats {
    tasks:          TaskStats::compute(&tasks),
    correspondence: CorrespondenceStats::compute(&correspondence),
    employees:      EmployeeStats::compute(&employees),
  })
}
