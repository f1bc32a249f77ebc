//! Handlers for `/employees` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/employees` | Full collection snapshot |
//! | `POST`   | `/employees` | Body: `NewEmployee` |
//! | `GET`    | `/employees/:id` | 404 if not found |
//! | `PATCH`  | `/employees/:id` | Shallow-merge patch; returns the merged record |
//! | `DELETE` | `/employees/:id` | No-op if already gone |

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
  employee::{Employee, EmployeePatch, NewEmployee},
};

use crate::error::ApiError;

/// `GET /employees`
pub async fn list<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
) -> Json<Vec<Employee>> {
  Json(store.employees().await)
}

/// `POST /employees`
pub async fn create<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Json(body): Json<NewEmployee>,
) -> Result<impl IntoResponse, ApiError> {
  let employee = Employee::from_new(body);
  store.add_employee(employee.clone()).await?;
  Ok((StatusCode::CREATED, Json(employee)))
}

/// `GET /employees/:id`
pub async fn get_one<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError> {
  store
    .employee(&id)
    .await
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("employee {id} not found")))
}

/// `PATCH /employees/:id`
pub async fn update_one<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Path(id): Path<String>,
  Json(patch): Json<EmployeePatch>,
) -> Result<Json<Employee>, ApiError> {
  store.update_employee(&id, patch).await?;
  store
    .employee(&id)
    .await
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("employee {id} not found")))
}

/// `DELETE /employees/:id`
pub async fn delete_one<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  store.delete_employee(&id).await?;
  Ok(StatusCode::NO_CONTENT)
}
