//! Canonical messages that clients sign.
//!
//! Fields are concatenated with no separator, using the exact strings
//! received. Any change here invalidates every existing client.

use crate::request::{SubmitTranslationRequest, VoteRequest};

/// `word` (decimal) + `language` + `name` + `description` + `timestamp`.
pub fn submission_message(request: &SubmitTranslationRequest) -> String {
  format!(
    "{}{}{}{}{}",
    request.word, request.language, request.name, request.description, request.timestamp
  )
}

/// `translationId` + `true`/`false` + `timestamp`.
pub fn vote_message(request: &VoteRequest) -> String {
  format!("{}{}{}", request.translation_id, request.up, request.timestamp)
}
