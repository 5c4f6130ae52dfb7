//! Response bodies. All fields are camelCase on the wire.

use glossa_core::{
  outcome::{Rejection, SUCCESS_RES_CODE, SubmitOutcome},
  translation::{Tally, Translation},
};
use serde::Serialize;

/// Body of `POST /translation`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTranslationResponse {
  pub res_code:       u8,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub translation_id: Option<String>,
  #[serde(skip_serializing_if = "String::is_empty")]
  pub error:          String,
}

impl From<SubmitOutcome> for SubmitTranslationResponse {
  fn from(outcome: SubmitOutcome) -> Self {
    match outcome {
      SubmitOutcome::Accepted { id, .. } => Self {
        res_code:       SUCCESS_RES_CODE,
        translation_id: Some(id.to_string()),
        error:          String::new(),
      },
      SubmitOutcome::Rejected(rejection) => Self {
        res_code:       rejection.code(),
        translation_id: None,
        error:          rejection.message().to_owned(),
      },
    }
  }
}

/// Body of `POST /vote`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
  pub res_code:   u8,
  pub up_votes:   i64,
  pub down_votes: i64,
  #[serde(skip_serializing_if = "String::is_empty")]
  pub error:      String,
}

impl VoteResponse {
  pub fn accepted(tally: Tally) -> Self {
    Self {
      res_code:   SUCCESS_RES_CODE,
      up_votes:   tally.up_votes,
      down_votes: tally.down_votes,
      error:      String::new(),
    }
  }

  /// Rejected votes report zero tallies.
  pub fn rejected(rejection: Rejection) -> Self {
    Self {
      res_code:   rejection.code(),
      up_votes:   0,
      down_votes: 0,
      error:      rejection.message().to_owned(),
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationBody {
  pub id:          String,
  pub name:        String,
  pub description: String,
  pub up_votes:    i64,
  pub down_votes:  i64,
  pub confirmed:   bool,
}

impl From<Translation> for TranslationBody {
  fn from(t: Translation) -> Self {
    Self {
      id:          t.id.to_string(),
      name:        t.name,
      description: t.description,
      up_votes:    t.tally.up_votes,
      down_votes:  t.tally.down_votes,
      confirmed:   t.confirmed,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct GetTranslationsResponse {
  pub translations: Vec<TranslationBody>,
}

/// `translation` is `null` when the pair has no confirmed translation.
#[derive(Debug, Serialize)]
pub struct GetConfirmedTranslationResponse {
  pub translation: Option<TranslationBody>,
}

#[cfg(test)]
mod tests {
  use glossa_core::translation::TranslationId;
  use serde_json::json;

  use super::*;

  #[test]
  fn accepted_submission_omits_error() {
    let body = SubmitTranslationResponse::from(SubmitOutcome::Accepted {
      id:      TranslationId(12),
      created: true,
    });
    assert_eq!(
      serde_json::to_value(body).unwrap(),
      json!({ "resCode": 0, "translationId": "12" })
    );
  }

  #[test]
  fn rejected_submission_carries_code_and_message() {
    let body = SubmitTranslationResponse::from(SubmitOutcome::Rejected(
      Rejection::ConfirmedTranslationExists,
    ));
    assert_eq!(
      serde_json::to_value(body).unwrap(),
      json!({ "resCode": 2, "error": "Confirmed translation exists" })
    );
  }

  #[test]
  fn missing_confirmed_translation_is_null() {
    let body = GetConfirmedTranslationResponse { translation: None };
    assert_eq!(serde_json::to_value(body).unwrap(), json!({ "translation": null }));
  }
}
