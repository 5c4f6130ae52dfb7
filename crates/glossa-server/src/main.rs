//! glossa-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) overlaid by
//! `GLOSSA_*` environment variables, opens the SQLite store, loads the word
//! catalog, and serves the JSON API over HTTP.

mod settings;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use clap::Parser;
use glossa_core::{
  engine::Engine,
  words::{WordCanonicalizer, WordCatalog},
};
use glossa_node::NodeClient;
use glossa_store_sqlite::SqliteStore;
use settings::ServerConfig;
use tokio::net::TcpListener;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Glossa translation server")]
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
    .add_source(config::Environment::with_prefix("GLOSSA"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  server_cfg.validate().context("invalid configuration")?;

  // Word catalog.
  let catalog: Option<WordCatalog> = match &server_cfg.words_url {
    Some(source) => Some(
      glossa_node::fetch_catalog(source, server_cfg.node_timeout())
        .await
        .with_context(|| format!("failed to load word catalog from {source}"))?,
    ),
    None => None,
  };
  let words = match &catalog {
    Some(catalog) => {
      WordCanonicalizer::from_catalog(catalog).context("failed to index word catalog")?
    }
    None => WordCanonicalizer::identity(),
  };
  info!(
    words = catalog.as_ref().map_or(0, WordCatalog::len),
    duplicates = words.duplicate_count(),
    "word canonicalizer ready"
  );

  let store = open_store(&server_cfg.store_path, server_cfg.store_retry_delay()).await;

  let node = NodeClient::new(server_cfg.node_url.clone(), server_cfg.node_timeout())
    .context("failed to build node client")?;

  let engine = Engine::new(
    store,
    node,
    words,
    server_cfg.engine_config(catalog.as_ref().map(WordCatalog::len)),
  );
  let app = glossa_api::api_router(Arc::new(engine));
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Open the store, retrying with a fixed delay until it succeeds.
async fn open_store(path: &Path, delay: Duration) -> SqliteStore {
  loop {
    match SqliteStore::open(path).await {
      Ok(store) => return store,
      Err(e) => {
        warn!(error = %e, path = %path.display(), retry_in = ?delay, "failed to open store");
        tokio::time::sleep(delay).await;
      }
    }
  }
}
