//! Runtime server configuration, deserialised from `config.toml` and
//! `GLOSSA_*` environment variables.

use std::{path::PathBuf, time::Duration};

use glossa_core::{
  engine::{DEFAULT_CONFIRMED_RATE, DEFAULT_ITEMS_LIMIT, EngineConfig},
  translation::WordId,
  validation::{DEFAULT_MAX_WORD_ID, Limits},
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
  #[error("`{0}` must be at least 1")]
  Zero(&'static str),

  #[error("`node_url` must not be empty")]
  MissingNodeUrl,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                   String,
  #[serde(default = "default_port")]
  pub port:                   u16,
  #[serde(default = "default_store_path")]
  pub store_path:             PathBuf,
  /// Base URL of the identity node.
  pub node_url:               String,
  #[serde(default = "default_node_timeout_secs")]
  pub node_timeout_secs:      u64,
  #[serde(default = "default_items_limit")]
  pub items_limit:            usize,
  #[serde(default = "default_confirmed_rate")]
  pub confirmed_rate:         u32,
  /// `http(s)` URL or file path of the word catalog.
  #[serde(default)]
  pub words_url:              Option<String>,
  /// Highest accepted word id when no catalog is configured.
  #[serde(default = "default_max_word_id")]
  pub max_word_id:            WordId,
  #[serde(default = "default_store_retry_delay_secs")]
  pub store_retry_delay_secs: u64,
}

fn default_host() -> String { "0.0.0.0".to_owned() }
fn default_port() -> u16 { 80 }
fn default_store_path() -> PathBuf { PathBuf::from("glossa.db") }
fn default_node_timeout_secs() -> u64 { 5 }
fn default_items_limit() -> usize { DEFAULT_ITEMS_LIMIT }
fn default_confirmed_rate() -> u32 { DEFAULT_CONFIRMED_RATE }
fn default_max_word_id() -> WordId { DEFAULT_MAX_WORD_ID }
fn default_store_retry_delay_secs() -> u64 { 10 }

impl ServerConfig {
  pub fn validate(&self) -> Result<(), SettingsError> {
    if self.node_url.trim().is_empty() {
      return Err(SettingsError::MissingNodeUrl);
    }
    if self.items_limit == 0 {
      return Err(SettingsError::Zero("items_limit"));
    }
    if self.confirmed_rate == 0 {
      return Err(SettingsError::Zero("confirmed_rate"));
    }
    Ok(())
  }

  pub fn node_timeout(&self) -> Duration { Duration::from_secs(self.node_timeout_secs) }

  pub fn store_retry_delay(&self) -> Duration { Duration::from_secs(self.store_retry_delay_secs) }

  /// Engine tunables. A loaded catalog bounds the word range by its size.
  pub fn engine_config(&self, catalog_len: Option<usize>) -> EngineConfig {
    let limits = match catalog_len {
      Some(len) => Limits::for_catalog_len(len),
      None => Limits { max_word_id: self.max_word_id, ..Limits::default() },
    };
    EngineConfig {
      items_limit: self.items_limit,
      confirmed_rate: self.confirmed_rate,
      limits,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn defaults_fill_everything_but_node_url() {
    let cfg = parse(r#"node_url = "http://localhost:9009""#);
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.port, 80);
    assert_eq!(cfg.store_path, PathBuf::from("glossa.db"));
    assert_eq!(cfg.node_timeout(), Duration::from_secs(5));
    assert_eq!(cfg.items_limit, 50);
    assert_eq!(cfg.confirmed_rate, 5);
    assert_eq!(cfg.words_url, None);
    assert_eq!(cfg.max_word_id, 3299);
    assert_eq!(cfg.store_retry_delay(), Duration::from_secs(10));
    assert_eq!(cfg.validate(), Ok(()));
  }

  #[test]
  fn zero_limits_are_rejected() {
    let cfg = parse("node_url = \"http://n\"\nitems_limit = 0");
    assert_eq!(cfg.validate(), Err(SettingsError::Zero("items_limit")));

    let cfg = parse("node_url = \"http://n\"\nconfirmed_rate = 0");
    assert_eq!(cfg.validate(), Err(SettingsError::Zero("confirmed_rate")));
  }

  #[test]
  fn empty_node_url_is_rejected() {
    let cfg = parse(r#"node_url = " ""#);
    assert_eq!(cfg.validate(), Err(SettingsError::MissingNodeUrl));
  }

  #[test]
  fn catalog_bounds_the_word_range() {
    let cfg = parse("node_url = \"http://n\"\nmax_word_id = 10");
    assert_eq!(cfg.engine_config(None).limits.max_word_id, 10);
    assert_eq!(cfg.engine_config(Some(100)).limits.max_word_id, 99);
  }
}
