//! JSON REST API for the diwan entity store.
//!
//! Exposes an axum [`Router`] backed by any [`Backend`]-parameterised
//! [`EntityStore`]. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", diwan_api::api_router(store.clone()))
//! ```

pub mod activity;
pub mod config;
pub mod correspondence;
pub mod employees;
pub mod error;
pub mod org;
pub mod settings;
pub mod stats;
pub mod tasks;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{Router, routing::get};
use diwan_core::{EntityStore, backend::Backend};

pub use config::ServerConfig;
pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<B>(store: Arc<EntityStore<B>>) -> Router<()>
where
  B: Backend + 'static,
{
  Router::new()
    // Employees
    .route(
      "/employees",
      get(employees::list::<B>).post(employees::create::<B>),
    )
    .route(
      "/employees/{id}",
      get(employees::get_one::<B>)
        .patch(employees::update_one::<B>)
        .delete(employees::delete_one::<B>),
    )
    // Tasks
    .route("/tasks", get(tasks::list::<B>).post(tasks::create::<B>))
    .route(
      "/tasks/{id}",
      get(tasks::get_one::<B>)
        .patch(tasks::update_one::<B>)
        .delete(tasks::delete_one::<B>),
    )
    // Correspondence (both partitions behind one resource)
    .route(
      "/correspondence",
      get(correspondence::list::<B>).post(correspondence::create::<B>),
    )
    .route(
      "/correspondence/{id}",
      get(correspondence::get_one::<B>)
        .patch(correspondence::update_one::<B>)
        .delete(correspondence::delete_one::<B>),
    )
    // Org structure
    .route(
      "/departments",
      get(org::list_departments::<B>).post(org::create_department::<B>),
    )
    .route(
      "/departments/{id}",
      get(org::get_department::<B>)
        .patch(org::update_department::<B>)
        .delete(org::delete_department::<B>),
    )
    .route(
      "/divisions",
      get(org::list_divisions::<B>).post(org::create_division::<B>),
    )
    .route(
      "/divisions/{id}",
      get(org::get_division::<B>)
        .patch(org::update_division::<B>)
        .delete(org::delete_division::<B>),
    )
    // Activity log and settings
    .route("/activity", get(activity::list::<B>))
    .route(
      "/settings",
      get(settings::get_settings::<B>).patch(settings::update_settings::<B>),
    )
    // Derived statistics
    .route("/stats", get(stats::dashboard::<B>))
    .with_state(store)
}
