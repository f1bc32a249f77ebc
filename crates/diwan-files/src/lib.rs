//! File upload service for the diwan dashboard.
//!
//! Stores attachments on local disk, bucketed by a caller-supplied type
//! (`correspondence`, `logos`, ...), with an optional mirror directory
//! for a second best-effort copy.

pub mod error;
pub mod store;

#[cfg(test)]
mod tests;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json,
  Router,
  body::Body,
  extract::{Multipart, Path, State},
  http::{StatusCode, header},
  response::{IntoResponse, Response},
  routing::{get, post},
};
use serde::{Deserialize, Serialize};

pub use error::FilesError;
pub use store::FileStore;

// ─── Configuration ──────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `config.toml` with
/// `DIWAN_FILES_*` environment overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct FilesConfig {
  #[serde(default = "default_host")]
  pub host:         String,
  #[serde(default = "default_port")]
  pub port:         u16,
  #[serde(default = "default_uploads_root")]
  pub uploads_root: PathBuf,
  /// Optional second copy of every upload. Mirror failures never fail
  /// the upload itself.
  #[serde(default)]
  pub mirror_root:  Option<PathBuf>,
}

impl Default for FilesConfig {
  fn default() -> Self {
    Self {
      host:         default_host(),
      port:         default_port(),
      uploads_root: default_uploads_root(),
      mirror_root:  None,
    }
  }
}

fn default_host() -> String {
  "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
  8078
}

fn default_uploads_root() -> PathBuf {
  PathBuf::from("uploads")
}

// ─── Router ─────────────────────────────────────────────────────────────────

pub fn files_router(store: Arc<FileStore>) -> Router<()> {
  Router::new()
    .route("/upload", post(upload))
    .route("/files/{file_type}", get(list_files))
    .route(
      "/files/{file_type}/{filename}",
      get(download_file).delete(delete_file),
    )
    .with_state(store)
}

// ─── Handlers ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct UploadResponse {
  file_type: String,
  filename:  String,
}

/// `POST /upload` — multipart form with a `type` text field and a `file`
/// field carrying the payload. Unknown fields are ignored.
async fn upload(
  State(store): State<Arc<FileStore>>,
  mut multipart: Multipart,
) -> Result<impl IntoResponse, FilesError> {
  let mut file_type: Option<String> = None;
  let mut file: Option<(String, Vec<u8>)> = None;

  while let Some(field) = multipart.next_field().await? {
    match field.name() {
      Some("type") => {
        file_type = Some(field.text().await?);
      }
      Some("file") => {
        let filename = field
          .file_name()
          .ok_or(FilesError::MissingFilename)?
          .to_owned();
        let data = field.bytes().await?;
        file = Some((filename, data.to_vec()));
      }
      _ => {}
    }
  }

  let file_type = file_type.ok_or(FilesError::MissingType)?;
  let (filename, data) = file.ok_or(FilesError::MissingFile)?;

  store.save(&file_type, &filename, &data).await?;
  tracing::info!(%file_type, %filename, size = data.len(), "stored upload");

  Ok((
    StatusCode::CREATED,
    Json(UploadResponse { file_type, filename }),
  ))
}

/// `GET /files/:type`
async fn list_files(
  State(store): State<Arc<FileStore>>,
  Path(file_type): Path<String>,
) -> Result<Json<Vec<String>>, FilesError> {
  Ok(Json(store.list(&file_type).await?))
}

/// `GET /files/:type/:filename`
async fn download_file(
  State(store): State<Arc<FileStore>>,
  Path((file_type, filename)): Path<(String, String)>,
) -> Result<Response, FilesError> {
  let data = store.read(&file_type, &filename).await?;
  let disposition = format!("attachment; filename=\"{filename}\"");
  Ok(
    (
      [
        (header::CONTENT_TYPE, "application/octet-stream".to_owned()),
        (header::CONTENT_DISPOSITION, disposition),
      ],
      Body::from(data),
    )
      .into_response(),
  )
}

/// `DELETE /files/:type/:filename`
async fn delete_file(
  State(store): State<Arc<FileStore>>,
  Path((file_type, filename)): Path<(String, String)>,
) -> Result<StatusCode, FilesError> {
  store.delete(&file_type, &filename).await?;
  Ok(StatusCode::NO_CONTENT)
}
