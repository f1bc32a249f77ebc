//! The [`Backend`] trait — the persistence collaborator.
//!
//! A backend is a generic key/collection document store. The entity store
//! writes through to it before mutating memory; it never reads a backend
//! record back after a write. Implemented by [`crate::memory::MemoryBackend`]
//! here and by `SqliteBackend` in `diwan-store-sqlite`.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use serde_json::Value;

// ─── Collections ─────────────────────────────────────────────────────────────

/// The storage partitions the entity store writes to. Correspondence is one
/// logical entity split across two partitions by its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
  Employees,
  Tasks,
  IncomingCorrespondence,
  OutgoingCorrespondence,
  Departments,
  Divisions,
  ActivityLog,
  Settings,
}

impl Collection {
  /// The collection's storage name.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Employees => "employees",
      Self::Tasks => "tasks",
      Self::IncomingCorrespondence => "incoming_correspondence",
      Self::OutgoingCorrespondence => "outgoing_correspondence",
      Self::Departments => "departments",
      Self::Divisions => "divisions",
      Self::ActivityLog => "activity_log",
      Self::Settings => "settings",
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a durable document store, one JSON document per record.
pub trait Backend: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Prepare the backend (schema, directories). Must complete before the
  /// store is used; the store checks [`Backend::is_initialized`] before
  /// persisting activity-log entries.
  fn initialize(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn is_initialized(&self) -> bool;

  /// All records in a collection, in insertion order.
  fn get_all(
    &self,
    collection: Collection,
  ) -> impl Future<Output = Result<Vec<Value>, Self::Error>> + Send + '_;

  /// A single record by id. Returns `None` if not found.
  fn get_by_id<'a>(
    &'a self,
    collection: Collection,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Value>, Self::Error>> + Send + 'a;

  /// Store a full record. The record carries its own string `"id"` field;
  /// the stored id is returned.
  fn add(
    &self,
    collection: Collection,
    record: Value,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;

  /// Shallow-merge `patch` into the record with `id`. A missing id is a
  /// no-op success.
  fn update<'a>(
    &'a self,
    collection: Collection,
    id: &'a str,
    patch: Value,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove the record with `id`. A missing id is a no-op success.
  fn delete<'a>(
    &'a self,
    collection: Collection,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
