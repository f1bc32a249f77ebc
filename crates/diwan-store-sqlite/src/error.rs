//! Error type for `diwan-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// `add` was handed a record without a string `"id"` field.
  #[error("record has no string \"id\" field")]
  MissingId,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
