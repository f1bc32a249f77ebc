//! diwan file server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) and serves
//! uploads from a local directory over HTTP.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use diwan_files::{FileStore, FilesConfig};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Diwan file upload server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("DIWAN_FILES"))
    .build()
    .context("failed to read config file")?;

  let files_cfg: FilesConfig = settings
    .try_deserialize()
    .context("failed to deserialise FilesConfig")?;

  let uploads_root = expand_tilde(&files_cfg.uploads_root);
  let mirror_root = files_cfg.mirror_root.as_deref().map(expand_tilde);

  tokio::fs::create_dir_all(&uploads_root)
    .await
    .with_context(|| format!("failed to create {uploads_root:?}"))?;

  let store = Arc::new(FileStore::new(uploads_root, mirror_root));
  let app = diwan_files::files_router(store).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", files_cfg.host, files_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
