//! Error type for the file service and its HTTP mapping.

use axum::{
  Json,
  extract::multipart::MultipartError,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub type Result<T, E = FilesError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FilesError {
  #[error("missing `type` field in upload")]
  MissingType,

  #[error("missing `file` field in upload")]
  MissingFile,

  #[error("uploaded file has no filename")]
  MissingFilename,

  #[error("invalid path component: {0:?}")]
  InvalidPathComponent(String),

  #[error("file not found: {0}")]
  NotFound(String),

  #[error("malformed multipart payload: {0}")]
  Multipart(#[from] MultipartError),

  #[error(transparent)]
  Io(#[from] std::io::Error),
}

impl IntoResponse for FilesError {
  fn into_response(self) -> Response {
    let status = match &self {
      FilesError::MissingType
      | FilesError::MissingFile
      | FilesError::MissingFilename
      | FilesError::InvalidPathComponent(_)
      | FilesError::Multipart(_) => StatusCode::BAD_REQUEST,
      FilesError::NotFound(_) => StatusCode::NOT_FOUND,
      FilesError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
