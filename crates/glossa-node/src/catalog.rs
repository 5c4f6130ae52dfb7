//! Loading the word catalog from a URL or a local file.

use std::time::Duration;

use glossa_core::words::WordCatalog;
use tracing::info;

use crate::{Error, Result};

fn is_url(source: &str) -> bool {
  source.starts_with("http://") || source.starts_with("https://")
}

/// Load the catalog. `source` is fetched over HTTP when it looks like an
/// `http(s)` URL and read from disk otherwise.
pub async fn fetch_catalog(source: &str, timeout: Duration) -> Result<WordCatalog> {
  let bytes = if is_url(source) {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let resp = client.get(source).send().await?;
    if !resp.status().is_success() {
      return Err(Error::Status { url: source.to_owned(), status: resp.status() });
    }
    resp.bytes().await?.to_vec()
  } else {
    tokio::fs::read(source).await?
  };

  let catalog = WordCatalog::from_json(&bytes)?;
  info!(source, words = catalog.len(), "loaded word catalog");
  Ok(catalog)
}
