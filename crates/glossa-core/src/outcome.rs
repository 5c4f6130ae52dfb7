//! Domain outcomes returned by the engine.
//!
//! A [`Rejection`] means "request processed, business rule declined". It is a
//! first-class result with a stable numeric code, not an error.

use serde::{Deserialize, Serialize};

use crate::translation::{Tally, TranslationId};

/// Result code of a successful operation.
pub const SUCCESS_RES_CODE: u8 = 0;

/// A business rule declined the request. Codes are part of the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
  /// The signer is not a currently valid identity.
  NotIdentity,
  /// A translation for this (word, language) pair is already confirmed.
  ConfirmedTranslationExists,
  /// The voter authored the translation.
  SelfVoting,
  /// The timestamp is not newer than the stored one.
  OutdatedSubmission,
  /// The vote repeats the stored direction.
  DuplicatedVote,
}

impl Rejection {
  pub fn code(self) -> u8 {
    match self {
      Self::NotIdentity => 1,
      Self::ConfirmedTranslationExists => 2,
      Self::SelfVoting => 3,
      Self::OutdatedSubmission => 4,
      Self::DuplicatedVote => 5,
    }
  }

  pub fn message(self) -> &'static str {
    match self {
      Self::NotIdentity => "Sender is not validated",
      Self::ConfirmedTranslationExists => "Confirmed translation exists",
      Self::SelfVoting => "Voting for own translation is not allowed",
      Self::OutdatedSubmission => "Outdated submission",
      Self::DuplicatedVote => "Duplicated vote",
    }
  }
}

impl std::fmt::Display for Rejection {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.message())
  }
}

/// Outcome of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
  Accepted {
    id:      TranslationId,
    /// `true` when a new lineage was created, `false` for an edit.
    created: bool,
  },
  Rejected(Rejection),
}

impl SubmitOutcome {
  pub fn res_code(&self) -> u8 {
    match self {
      Self::Accepted { .. } => SUCCESS_RES_CODE,
      Self::Rejected(r) => r.code(),
    }
  }
}

/// Outcome of a vote as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
  Accepted {
    tally:     Tally,
    /// Confirmation status after the vote.
    confirmed: bool,
  },
  Rejected(Rejection),
  /// No translation has the given id.
  UnknownTranslation,
}
