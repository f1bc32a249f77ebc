//! Handlers for `/departments` and `/divisions`.

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
  org::{
    Department, DepartmentPatch, Division, DivisionPatch, NewDepartment,
    NewDivision,
  },
};

use crate::error::ApiError;

// ─── Departments ────────────────────────────────────────────────────────────

pub async fn list_departments<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
) -> Json<Vec<Department>> {
  Json(store.departments().await)
}

pub async fn create_department<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Json(body): Json<NewDepartment>,
) -> Result<impl IntoResponse, ApiError> {
  let department = Department::from_new(body);
  store.add_department(department.clone()).await?;
  Ok((StatusCode::CREATED, Json(department)))
}

pub async fn get_department<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Path(id): Path<String>,
) -> Result<Json<Department>, ApiError> {
  store
    .department(&id)
    .await
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("department {id} not found")))
}

pub async fn update_department<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Path(id): Path<String>,
  Json(patch): Json<DepartmentPatch>,
) -> Result<Json<Department>, ApiError> {
  store.update_department(&id, patch).await?;
  store
    .department(&id)
    .await
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("department {id} not found")))
}

pub async fn delete_department<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  store.delete_department(&id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Divisions ──────────────────────────────────────────────────────────────

pub async fn list_divisions<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
) -> Json<Vec<Division>> {
  Json(store.divisions().await)
}

pub async fn create_division<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Json(body): Json<NewDivision>,
) -> Result<impl IntoResponse, ApiError> {
  let division = Division::from_new(body);
  store.add_division(division.clone()).await?;
  Ok((StatusCode::CREATED, Json(division)))
}

pub async fn get_division<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Path(id): Path<String>,
) -> Result<Json<Division>, ApiError> {
  store
    .division(&id)
    .await
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("division {id} not found")))
}

pub async fn update_division<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Path(id): Path<String>,
  Json(patch): Json<DivisionPatch>,
) -> Result<Json<Division>, ApiError> {
  store.update_division(&id, patch).await?;
  store
    .division(&id)
    .await
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("division {id} not found")))
}

pub async fn delete_division<B: Backend + 'static>(
  State(store): State<Arc<EntityStore<B>>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  store.delete_division(&id).await?;
  Ok(StatusCode::NO_CONTENT)
}
