//! Error types for `diwan-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A persistence-collaborator write or read failed. Boxed so the store
  /// stays generic over backend error types.
  #[error("backend error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// Update/delete of a correspondence record whose partition could not be
  /// resolved from the in-memory collection.
  #[error("correspondence not found: {0}")]
  CorrespondenceNotFound(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub fn backend(source: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Backend(Box::new(source))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
