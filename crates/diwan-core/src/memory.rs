//! In-memory [`Backend`] — the reference implementation.
//!
//! Collections are plain vecs: adds append without deduping by id, and
//! `get_by_id` returns the most recently added match. Read and write
//! failures can be injected so tests can exercise the store's failure
//! semantics.

use std::{
  collections::HashMap,
  sync::atomic::{AtomicBool, Ordering},
};

use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::{
  backend::{Backend, Collection},
  merge::shallow_merge,
};

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("record has no string \"id\" field")]
  MissingId,

  #[error("injected {0} failure")]
  Injected(&'static str),
}

#[derive(Default)]
pub struct MemoryBackend {
  collections: Mutex<HashMap<Collection, Vec<Value>>>,
  initialized: AtomicBool,
  fail_reads:  AtomicBool,
  fail_writes: AtomicBool,
}

impl MemoryBackend {
  /// A ready-to-use (already initialised) backend.
  pub fn new() -> Self {
    let backend = Self::default();
    backend.initialized.store(true, Ordering::Relaxed);
    backend
  }

  /// Make every read (`get_all`/`get_by_id`) fail until reset.
  pub fn fail_reads(&self, fail: bool) {
    self.fail_reads.store(fail, Ordering::Relaxed);
  }

  /// Make every write (`add`/`update`/`delete`) fail until reset.
  pub fn fail_writes(&self, fail: bool) {
    self.fail_writes.store(fail, Ordering::Relaxed);
  }

  fn check_read(&self) -> Result<(), MemoryError> {
    if self.fail_reads.load(Ordering::Relaxed) {
      return Err(MemoryError::Injected("read"));
    }
    Ok(())
  }

  fn check_write(&self) -> Result<(), MemoryError> {
    if self.fail_writes.load(Ordering::Relaxed) {
      return Err(MemoryError::Injected("write"));
    }
    Ok(())
  }
}

impl Backend for MemoryBackend {
  type Error = MemoryError;

  async fn initialize(&self) -> Result<(), MemoryError> {
    self.initialized.store(true, Ordering::Relaxed);
    Ok(())
  }

  fn is_initialized(&self) -> bool {
    self.initialized.load(Ordering::Relaxed)
  }

  async fn get_all(&self, collection: Collection) -> Result<Vec<Value>, MemoryError> {
    self.check_read()?;
    let collections = self.collections.lock().await;
    Ok(collections.get(&collection).cloned().unwrap_or_default())
  }

  async fn get_by_id(
    &self,
    collection: Collection,
    id: &str,
  ) -> Result<Option<Value>, MemoryError> {
    self.check_read()?;
    let collections = self.collections.lock().await;
    Ok(collections.get(&collection).and_then(|records| {
      records
        .iter()
        .rev()
        .find(|record| record_id(record) == Some(id))
        .cloned()
    }))
  }

  async fn add(&self, collection: Collection, record: Value) -> Result<String, MemoryError> {
    self.check_write()?;
    let id = record_id(&record).ok_or(MemoryError::MissingId)?.to_owned();
    let mut collections = self.collections.lock().await;
    collections.entry(collection).or_default().push(record);
    Ok(id)
  }

  async fn update(
    &self,
    collection: Collection,
    id: &str,
    patch: Value,
  ) -> Result<(), MemoryError> {
    self.check_write()?;
    let mut collections = self.collections.lock().await;
    if let Some(records) = collections.get_mut(&collection)
      && let Some(record) = records
        .iter_mut()
        .rev()
        .find(|record| record_id(record) == Some(id))
    {
      shallow_merge(record, &patch);
    }
    Ok(())
  }

  async fn delete(&self, collection: Collection, id: &str) -> Result<(), MemoryError> {
    self.check_write()?;
    let mut collections = self.collections.lock().await;
    if let Some(records) = collections.get_mut(&collection) {
      records.retain(|record| record_id(record) != Some(id));
    }
    Ok(())
  }
}

fn record_id(record: &Value) -> Option<&str> {
  record.get("id").and_then(Value::as_str)
}
