//! Inbound request payloads, exactly as the client signed them.
//!
//! String fields are kept verbatim: the signed message must be rebuilt from
//! the received bytes, not from a re-rendered parse.

use serde::{Deserialize, Serialize};

use crate::translation::WordId;

/// Body of `POST /translation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTranslationRequest {
  pub word:        WordId,
  pub language:    String,
  pub name:        String,
  #[serde(default)]
  pub description: String,
  /// RFC 3339 instant with an explicit offset, e.g. `2020-01-01T00:00:00Z`.
  pub timestamp:   String,
  pub signature:   String,
}

/// Body of `POST /vote`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
  /// Decimal translation id, as a string.
  pub translation_id: String,
  pub up:             bool,
  pub timestamp:      String,
  pub signature:      String,
}
