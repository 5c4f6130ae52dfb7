//! HTTP client for the identity node.
//!
//! The node answers every call with an envelope carrying either `result` or
//! `error.message`. Calls are bounded by the client timeout and never retried.

use std::time::Duration;

use glossa_core::identity::{self, IdentityError, IdentityService};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::{Error, Result};

/// Error message the node uses for an address it has never seen.
const NO_DATA_FOUND: &str = "no data found";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
  result: Option<T>,
  error:  Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  message: String,
}

#[derive(Debug, Deserialize)]
struct IdentityBody {
  state: String,
}

/// Client for the node's signature recovery and identity lookup endpoints.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct NodeClient {
  client:   Client,
  base_url: String,
}

impl NodeClient {
  pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
  }

  /// Send a GET and unwrap the node's envelope.
  ///
  /// `Ok(Err(message))` is an error reported by the node itself.
  async fn get<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, &str)],
  ) -> Result<std::result::Result<T, String>> {
    let url = self.url(path);
    let resp = self.client.get(&url).query(query).send().await?;

    if !resp.status().is_success() {
      return Err(Error::Status { url, status: resp.status() });
    }

    let envelope: Envelope<T> = resp.json().await?;
    match (envelope.result, envelope.error) {
      (_, Some(error)) => Ok(Err(error.message)),
      (Some(result), None) => Ok(Ok(result)),
      (None, None) => Err(Error::EmptyResponse),
    }
  }

  /// `GET /api/SignatureAddress?value=<message>&signature=<signature>`
  pub async fn signature_address(&self, message: &str, signature: &str) -> Result<String> {
    self
      .get::<String>("/SignatureAddress", &[("value", message), ("signature", signature)])
      .await?
      .map_err(Error::Node)
  }

  /// `GET /api/identity/<address>`; `None` when the node has no record.
  pub async fn identity_state(&self, address: &str) -> Result<Option<String>> {
    match self.get::<IdentityBody>(&format!("/identity/{address}"), &[]).await? {
      Ok(body) => Ok(Some(body.state)),
      Err(message) if message == NO_DATA_FOUND => Ok(None),
      Err(message) => Err(Error::Node(message)),
    }
  }
}

impl IdentityService for NodeClient {
  async fn recover_signer(&self, message: &str, signature: &str) -> Result<String, IdentityError> {
    match self.signature_address(message, signature).await {
      Ok(address) => Ok(address),
      // Signature errors reported by the node are client errors.
      Err(Error::Node(reason)) => Err(IdentityError::Rejected(reason)),
      Err(e) => Err(e.into()),
    }
  }

  async fn is_identity(&self, address: &str) -> Result<bool, IdentityError> {
    let state = self.identity_state(address).await?;
    debug!(%address, state = state.as_deref().unwrap_or("none"), "identity state");
    Ok(state.is_some_and(|s| identity::is_valid_state(&s)))
  }
}
