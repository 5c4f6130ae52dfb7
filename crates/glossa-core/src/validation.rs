//! Structural checks on inbound requests.
//!
//! Pure functions: no I/O, no side effects. A failure is always
//! [`Error::BadRequest`] and nothing downstream (identity service, store) is
//! consulted.

use chrono::{DateTime, SubsecRound as _, Utc};
use unicode_segmentation::UnicodeSegmentation as _;

use crate::{
  Error, Result,
  request::{SubmitTranslationRequest, VoteRequest},
  translation::WordId,
};

/// Word id bound used when no catalog is configured.
pub const DEFAULT_MAX_WORD_ID: WordId = 3299;
pub const MAX_NAME_CHARS: usize = 30;
pub const MAX_DESCRIPTION_CHARS: usize = 150;
pub const MAX_LANGUAGE_CHARS: usize = 16;

/// Bounds applied to submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
  /// Inclusive upper bound of accepted word ids.
  pub max_word_id:           WordId,
  pub max_name_chars:        usize,
  pub max_description_chars: usize,
}

impl Default for Limits {
  fn default() -> Self {
    Self {
      max_word_id:           DEFAULT_MAX_WORD_ID,
      max_name_chars:        MAX_NAME_CHARS,
      max_description_chars: MAX_DESCRIPTION_CHARS,
    }
  }
}

impl Limits {
  /// Limits whose word range covers a catalog of `len` entries.
  pub fn for_catalog_len(len: usize) -> Self {
    let max_word_id = WordId::try_from(len.saturating_sub(1)).unwrap_or(WordId::MAX);
    Self { max_word_id, ..Self::default() }
  }
}

/// Parse a timezone-aware RFC 3339 instant, truncated to the microsecond
/// precision timestamps are stored and compared at.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(raw)
    .map(|dt| dt.with_timezone(&Utc).trunc_subsecs(6))
    .map_err(|_| Error::bad_request("Invalid value 'timestamp'"))
}

fn valid_language(language: &str) -> bool {
  let len = language.chars().count();
  (1..=MAX_LANGUAGE_CHARS).contains(&len)
    && language
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Length in user-perceived characters (extended grapheme clusters).
fn visible_len(text: &str) -> usize { text.graphemes(true).count() }

/// Validate a submission and return its parsed timestamp.
pub fn validate_submission(
  request: &SubmitTranslationRequest,
  limits: &Limits,
) -> Result<DateTime<Utc>> {
  if request.word > limits.max_word_id {
    return Err(Error::bad_request("Invalid value 'word'"));
  }
  if !valid_language(&request.language) {
    return Err(Error::bad_request("Invalid value 'language'"));
  }
  let name_len = visible_len(&request.name);
  if name_len == 0 || name_len > limits.max_name_chars {
    return Err(Error::bad_request("Translation exceeds the maximum length"));
  }
  if visible_len(&request.description) > limits.max_description_chars {
    return Err(Error::bad_request(
      "Translation description exceeds the maximum length",
    ));
  }
  parse_timestamp(&request.timestamp)
}

/// Validate a vote and return its parsed timestamp. The translation id is
/// checked separately by the engine.
pub fn validate_vote(request: &VoteRequest) -> Result<DateTime<Utc>> {
  parse_timestamp(&request.timestamp)
}

/// Validate the language path segment of the read endpoints.
pub fn validate_language(language: &str) -> Result<()> {
  if valid_language(language) {
    Ok(())
  } else {
    Err(Error::bad_request("Invalid value 'language'"))
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn submission() -> SubmitTranslationRequest {
    SubmitTranslationRequest {
      word:        1,
      language:    "id".into(),
      name:        "name".into(),
      description: "description".into(),
      timestamp:   "2020-01-01T10:00:00+01:00".into(),
      signature:   "sig".into(),
    }
  }

  fn message(err: Error) -> String { err.to_string() }

  #[test]
  fn accepts_well_formed_submission() {
    let ts = validate_submission(&submission(), &Limits::default()).unwrap();
    assert_eq!(ts, Utc.with_ymd_and_hms(2020, 1, 1, 9, 0, 0).unwrap());
  }

  #[test]
  fn word_range_is_inclusive() {
    let limits = Limits { max_word_id: 10, ..Limits::default() };
    let mut req = submission();
    req.word = 10;
    assert!(validate_submission(&req, &limits).is_ok());
    req.word = 11;
    assert_eq!(
      message(validate_submission(&req, &limits).unwrap_err()),
      "Invalid value 'word'"
    );
  }

  #[test]
  fn empty_name_rejected() {
    let mut req = submission();
    req.name = String::new();
    assert!(validate_submission(&req, &Limits::default()).is_err());
  }

  #[test]
  fn name_limit_counts_characters_not_bytes() {
    let mut req = submission();
    // 30 two-byte characters: 60 bytes, still within the limit.
    req.name = "é".repeat(30);
    assert!(validate_submission(&req, &Limits::default()).is_ok());
    req.name = "é".repeat(31);
    assert!(validate_submission(&req, &Limits::default()).is_err());
  }

  #[test]
  fn name_limit_counts_decomposed_characters_once() {
    let mut req = submission();
    // "e" + combining acute: two scalars, one visible character.
    req.name = "e\u{0301}".repeat(30);
    assert!(validate_submission(&req, &Limits::default()).is_ok());
    req.name = "e\u{0301}".repeat(31);
    assert_eq!(
      message(validate_submission(&req, &Limits::default()).unwrap_err()),
      "Translation exceeds the maximum length"
    );
  }

  #[test]
  fn description_limit_counts_decomposed_characters_once() {
    let mut req = submission();
    req.description = "a\u{0308}".repeat(150);
    assert!(validate_submission(&req, &Limits::default()).is_ok());
  }

  #[test]
  fn timestamps_are_truncated_to_microseconds() {
    let ts = parse_timestamp("2020-01-01T10:00:00.1234567Z").unwrap();
    assert_eq!(
      ts,
      Utc.with_ymd_and_hms(2020, 1, 1, 10, 0, 0).unwrap() + chrono::Duration::microseconds(123_456)
    );
    assert_eq!(
      parse_timestamp("2020-01-01T10:00:00.0000005Z").unwrap(),
      parse_timestamp("2020-01-01T10:00:00Z").unwrap()
    );
  }

  #[test]
  fn description_limit() {
    let mut req = submission();
    req.description = "s".repeat(150);
    assert!(validate_submission(&req, &Limits::default()).is_ok());
    req.description = "s".repeat(151);
    assert_eq!(
      message(validate_submission(&req, &Limits::default()).unwrap_err()),
      "Translation description exceeds the maximum length"
    );
  }

  #[test]
  fn empty_description_allowed() {
    let mut req = submission();
    req.description = String::new();
    assert!(validate_submission(&req, &Limits::default()).is_ok());
  }

  #[test]
  fn timestamp_requires_offset() {
    let mut req = submission();
    req.timestamp = "2020-01-01T10:00:00".into();
    assert_eq!(
      message(validate_submission(&req, &Limits::default()).unwrap_err()),
      "Invalid value 'timestamp'"
    );
    req.timestamp = "yesterday".into();
    assert!(validate_submission(&req, &Limits::default()).is_err());
  }

  #[test]
  fn language_charset() {
    assert!(validate_language("pt-BR").is_ok());
    assert!(validate_language("").is_err());
    assert!(validate_language("en us").is_err());
    assert!(validate_language(&"x".repeat(17)).is_err());
  }

  #[test]
  fn vote_timestamp_checked() {
    let vote = VoteRequest {
      translation_id: "1".into(),
      up:             true,
      timestamp:      "not a time".into(),
      signature:      "sig".into(),
    };
    assert!(validate_vote(&vote).unwrap_err().is_client_error());
  }

  #[test]
  fn catalog_limits_cover_every_index() {
    assert_eq!(Limits::for_catalog_len(3300).max_word_id, 3299);
    assert_eq!(Limits::for_catalog_len(1).max_word_id, 0);
  }
}
