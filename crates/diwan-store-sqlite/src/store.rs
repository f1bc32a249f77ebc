//! [`SqliteBackend`] — the SQLite implementation of [`Backend`].

use std::{
  path::Path,
  sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
  },
};

use diwan_core::{
  backend::{Backend, Collection},
  merge::shallow_merge,
};
use rusqlite::OptionalExtension as _;
use serde_json::Value;

use crate::{Error, Result, schema::SCHEMA};

/// A document backend over a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteBackend {
  conn:        tokio_rusqlite::Connection,
  initialized: Arc<AtomicBool>,
}

impl SqliteBackend {
  /// Open (or create) a backend at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path.as_ref().to_path_buf()).await?;
    let backend = Self {
      conn,
      initialized: Arc::new(AtomicBool::new(false)),
    };
    backend.init_schema().await?;
    Ok(backend)
  }

  /// Open an in-memory backend — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let backend = Self {
      conn,
      initialized: Arc::new(AtomicBool::new(false)),
    };
    backend.init_schema().await?;
    Ok(backend)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    self.initialized.store(true, Ordering::Relaxed);
    Ok(())
  }

  async fn fetch_body(&self, collection: Collection, id: &str) -> Result<Option<String>> {
    let name = collection.as_str();
    let id = id.to_owned();
    let body = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT body FROM records WHERE collection = ?1 AND id = ?2",
              rusqlite::params![name, id],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(body)
  }
}

impl Backend for SqliteBackend {
  type Error = Error;

  async fn initialize(&self) -> Result<()> {
    self.init_schema().await
  }

  fn is_initialized(&self) -> bool {
    self.initialized.load(Ordering::Relaxed)
  }

  async fn get_all(&self, collection: Collection) -> Result<Vec<Value>> {
    let name = collection.as_str();
    let bodies: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn
          .prepare("SELECT body FROM records WHERE collection = ?1 ORDER BY rowid")?;
        let rows = stmt
          .query_map(rusqlite::params![name], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    bodies
      .iter()
      .map(|body| Ok(serde_json::from_str(body)?))
      .collect()
  }

  async fn get_by_id(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
    let body = self.fetch_body(collection, id).await?;
    body
      .as_deref()
      .map(serde_json::from_str)
      .transpose()
      .map_err(Error::from)
  }

  async fn add(&self, collection: Collection, record: Value) -> Result<String> {
    let id = record
      .get("id")
      .and_then(Value::as_str)
      .ok_or(Error::MissingId)?
      .to_owned();
    let name = collection.as_str();
    let body = record.to_string();
    let row_id = id.clone();

    self
      .conn
      .call(move |conn| {
        // Document-store put semantics: an existing id is replaced.
        conn.execute(
          "INSERT OR REPLACE INTO records (collection, id, body) VALUES (?1, ?2, ?3)",
          rusqlite::params![name, row_id, body],
        )?;
        Ok(())
      })
      .await?;

    Ok(id)
  }

  async fn update(&self, collection: Collection, id: &str, patch: Value) -> Result<()> {
    // Missing ids are a no-op success.
    let Some(body) = self.fetch_body(collection, id).await? else {
      return Ok(());
    };

    let mut document: Value = serde_json::from_str(&body)?;
    shallow_merge(&mut document, &patch);

    let name = collection.as_str();
    let id = id.to_owned();
    let updated = document.to_string();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE records SET body = ?3 WHERE collection = ?1 AND id = ?2",
          rusqlite::params![name, id, updated],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete(&self, collection: Collection, id: &str) -> Result<()> {
    let name = collection.as_str();
    let id = id.to_owned();
    // Deleting a missing id affects zero rows, which is fine.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM records WHERE collection = ?1 AND id = ?2",
          rusqlite::params![name, id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
