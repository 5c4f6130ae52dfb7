//! Continuation tokens for rating-ordered listings.
//!
//! A token is the lowercase hex encoding of the UTF-8 string
//! `"<id>|<rating>"`. It names the first row of the next page.

use crate::{Error, Result, translation::TranslationId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuationToken {
  pub id:     TranslationId,
  pub rating: i64,
}

fn invalid() -> Error { Error::bad_request("invalid value 'continuation-token'") }

impl ContinuationToken {
  pub fn new(id: TranslationId, rating: i64) -> Self { Self { id, rating } }

  pub fn encode(&self) -> String {
    hex::encode(format!("{}|{}", self.id.0, self.rating))
  }

  /// Decode a token. An empty string means "start of the ordering".
  pub fn decode(token: &str) -> Result<Option<Self>> {
    if token.is_empty() {
      return Ok(None);
    }
    let bytes = hex::decode(token).map_err(|_| invalid())?;
    let text = String::from_utf8(bytes).map_err(|_| invalid())?;
    let (id, rating) = text.split_once('|').ok_or_else(invalid)?;
    if rating.contains('|') {
      return Err(invalid());
    }
    let id = id.parse::<i64>().map_err(|_| invalid())?;
    let rating = rating.parse::<i64>().map_err(|_| invalid())?;
    Ok(Some(Self::new(TranslationId(id), rating)))
  }
}
