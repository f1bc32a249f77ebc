use std::sync::Arc;

use axum::{
  body::{Body, to_bytes},
  http::{Request, StatusCode},
};
use tempfile::TempDir;
use tower::ServiceExt as _;

use super::*;

fn store(dir: &TempDir) -> FileStore {
  FileStore::new(dir.path().join("uploads"), None)
}

// ── FileStore ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_list_read_roundtrip() {
  let dir = TempDir::new().unwrap();
  let store = store(&dir);

  store
    .save("correspondence", "scan.pdf", b"%PDF-1.4")
    .await
    .unwrap();

  assert_eq!(store.list("correspondence").await.unwrap(), vec!["scan.pdf"]);
  let data = store.read("correspondence", "scan.pdf").await.unwrap();
  assert_eq!(data, b"%PDF-1.4");
}

#[tokio::test]
async fn listing_unknown_type_is_empty() {
  let dir = TempDir::new().unwrap();
  let store = store(&dir);
  assert!(store.list("logos").await.unwrap().is_empty());
}

#[tokio::test]
async fn mirror_receives_a_copy() {
  let dir = TempDir::new().unwrap();
  let mirror = dir.path().join("mirror");
  let store =
    FileStore::new(dir.path().join("uploads"), Some(mirror.clone()));

  store.save("logos", "seal.png", b"png-bytes").await.unwrap();

  let mirrored = tokio::fs::read(mirror.join("logos/seal.png")).await.unwrap();
  assert_eq!(mirrored, b"png-bytes");
}

#[tokio::test]
async fn mirror_failure_does_not_fail_the_save() {
  let dir = TempDir::new().unwrap();
  // A mirror root that is a file, not a directory, makes every copy fail.
  let bogus = dir.path().join("mirror");
  std::fs::write(&bogus, b"occupied").unwrap();
  let store = FileStore::new(dir.path().join("uploads"), Some(bogus));

  store.save("logos", "seal.png", b"png-bytes").await.unwrap();
  assert_eq!(store.read("logos", "seal.png").await.unwrap(), b"png-bytes");
}

#[tokio::test]
async fn delete_missing_file_is_not_found() {
  let dir = TempDir::new().unwrap();
  let store = store(&dir);
  let err = store.delete("logos", "ghost.png").await.unwrap_err();
  assert!(matches!(err, FilesError::NotFound(_)));
}

#[tokio::test]
async fn traversal_components_are_rejected() {
  let dir = TempDir::new().unwrap();
  let store = store(&dir);

  for component in ["..", ".", "", "a/b", "a\\b"] {
    let err = store.read(component, "f.txt").await.unwrap_err();
    assert!(matches!(err, FilesError::InvalidPathComponent(_)));
    let err = store.read("logos", component).await.unwrap_err();
    assert!(matches!(err, FilesError::InvalidPathComponent(_)));
  }
}

// ── HTTP surface ────────────────────────────────────────────────────────────

fn multipart_body(boundary: &str, file_type: &str, filename: &str, data: &str) -> String {
  format!(
    "--{boundary}\r\n\
     Content-Disposition: form-data; name=\"type\"\r\n\r\n\
     {file_type}\r\n\
     --{boundary}\r\n\
     Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
     Content-Type: application/octet-stream\r\n\r\n\
     {data}\r\n\
     --{boundary}--\r\n"
  )
}

#[tokio::test]
async fn upload_then_download_over_http() {
  let dir = TempDir::new().unwrap();
  let app = files_router(Arc::new(store(&dir)));

  let boundary = "diwanboundary";
  let body = multipart_body(boundary, "correspondence", "memo.txt", "hello");
  let response = app
    .clone()
    .oneshot(
      Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
          "content-type",
          format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::CREATED);

  let response = app
    .clone()
    .oneshot(
      Request::builder()
        .uri("/files/correspondence/memo.txt")
        .body(Body::empty())
        .unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  let disposition = response
    .headers()
    .get("content-disposition")
    .unwrap()
    .to_str()
    .unwrap()
    .to_owned();
  assert!(disposition.contains("memo.txt"));
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  assert_eq!(&bytes[..], b"hello");
}

#[tokio::test]
async fn upload_without_file_field_is_400() {
  let dir = TempDir::new().unwrap();
  let app = files_router(Arc::new(store(&dir)));

  let boundary = "diwanboundary";
  let body = format!(
    "--{boundary}\r\n\
     Content-Disposition: form-data; name=\"type\"\r\n\r\n\
     logos\r\n\
     --{boundary}--\r\n"
  );
  let response = app
    .oneshot(
      Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
          "content-type",
          format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn download_missing_file_is_404() {
  let dir = TempDir::new().unwrap();
  let app = files_router(Arc::new(store(&dir)));

  let response = app
    .oneshot(
      Request::builder()
        .uri("/files/logos/ghost.png")
        .body(Body::empty())
        .unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
