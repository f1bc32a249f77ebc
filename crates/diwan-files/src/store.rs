//! On-disk file storage with optional best-effort mirroring.

use std::path::{Path, PathBuf};

use tokio::{fs, io::ErrorKind};

use crate::error::{FilesError, Result};

/// A directory of uploads, bucketed one level deep by file type.
///
/// Layout: `<uploads_root>/<type>/<filename>`. When a mirror root is
/// configured, every successful write is copied there as well; mirror
/// failures are logged and swallowed, the primary copy is authoritative.
pub struct FileStore {
  uploads_root: PathBuf,
  mirror_root:  Option<PathBuf>,
}

impl FileStore {
  pub fn new(uploads_root: PathBuf, mirror_root: Option<PathBuf>) -> Self {
    Self { uploads_root, mirror_root }
  }

  /// Write `data` under `<type>/<filename>` and mirror it if configured.
  pub async fn save(
    &self,
    file_type: &str,
    filename: &str,
    data: &[u8],
  ) -> Result<PathBuf> {
    let file_type = checked_component(file_type)?;
    let filename = checked_component(filename)?;

    let dir = self.uploads_root.join(file_type);
    fs::create_dir_all(&dir).await?;
    let path = dir.join(filename);
    fs::write(&path, data).await?;

    if let Some(mirror_root) = &self.mirror_root {
      let mirror_dir = mirror_root.join(file_type);
      if let Err(e) = mirror_copy(&path, &mirror_dir, filename).await {
        tracing::warn!(
          error = %e,
          file = %path.display(),
          "mirror copy failed; primary copy kept"
        );
      }
    }

    Ok(path)
  }

  /// List filenames under `<type>`. A directory that does not exist yet
  /// is an empty listing, not an error.
  pub async fn list(&self, file_type: &str) -> Result<Vec<String>> {
    let file_type = checked_component(file_type)?;
    let dir = self.uploads_root.join(file_type);

    let mut entries = match fs::read_dir(&dir).await {
      Ok(entries) => entries,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
      Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
      if entry.file_type().await?.is_file() {
        names.push(entry.file_name().to_string_lossy().into_owned());
      }
    }
    names.sort();
    Ok(names)
  }

  pub async fn read(&self, file_type: &str, filename: &str) -> Result<Vec<u8>> {
    let path = self.checked_path(file_type, filename)?;
    match fs::read(&path).await {
      Ok(data) => Ok(data),
      Err(e) if e.kind() == ErrorKind::NotFound => {
        Err(FilesError::NotFound(format!("{file_type}/{filename}")))
      }
      Err(e) => Err(e.into()),
    }
  }

  pub async fn delete(&self, file_type: &str, filename: &str) -> Result<()> {
    let path = self.checked_path(file_type, filename)?;
    match fs::remove_file(&path).await {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => {
        Err(FilesError::NotFound(format!("{file_type}/{filename}")))
      }
      Err(e) => Err(e.into()),
    }
  }

  fn checked_path(&self, file_type: &str, filename: &str) -> Result<PathBuf> {
    let file_type = checked_component(file_type)?;
    let filename = checked_component(filename)?;
    Ok(self.uploads_root.join(file_type).join(filename))
  }
}

async fn mirror_copy(source: &Path, mirror_dir: &Path, filename: &str) -> Result<()> {
  fs::create_dir_all(mirror_dir).await?;
  fs::copy(source, mirror_dir.join(filename)).await?;
  Ok(())
}

/// Reject components that could escape the uploads root.
fn checked_component(component: &str) -> Result<&str> {
  if component.is_empty()
    || component == "."
    || component == ".."
    || component.contains('/')
    || component.contains('\\')
  {
    return Err(FilesError::InvalidPathComponent(component.to_owned()));
  }
  Ok(component)
}
