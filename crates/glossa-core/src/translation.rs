//! Translation and vote types.
//!
//! A translation is one author's submission lineage for a (word, language)
//! pair. Its tallies are derived from the vote set; its `confirmed` flag is
//! monotonic.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Numeric index of a word in the catalog.
pub type WordId = u32;

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// Store-assigned translation identifier. Rendered as a decimal string on
/// the wire.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TranslationId(pub i64);

impl fmt::Display for TranslationId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for TranslationId {
  type Err = Error;

  /// Accepts a strictly positive decimal integer.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.parse::<i64>() {
      Ok(id) if id > 0 => Ok(Self(id)),
      _ => Err(Error::bad_request("invalid value 'translationId'")),
    }
  }
}

// ─── Votes ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
  Up,
  Down,
}

impl VoteDirection {
  pub fn from_up(up: bool) -> Self { if up { Self::Up } else { Self::Down } }

  pub fn is_up(self) -> bool { matches!(self, Self::Up) }
}

/// Up/down counters of a translation. Both are non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
  pub up_votes:   i64,
  pub down_votes: i64,
}

impl Tally {
  pub fn new(up_votes: i64, down_votes: i64) -> Self {
    Self { up_votes, down_votes }
  }

  /// Net rating used for ordering and confirmation.
  pub fn rating(&self) -> i64 { self.up_votes - self.down_votes }

  /// The tally after a first vote in `direction`.
  pub fn with_vote(self, direction: VoteDirection) -> Self {
    match direction {
      VoteDirection::Up => Self { up_votes: self.up_votes + 1, ..self },
      VoteDirection::Down => Self { down_votes: self.down_votes + 1, ..self },
    }
  }

  /// The tally after an existing vote moves from `from` to the opposite
  /// direction. Moves exactly one unit; the total stays constant.
  pub fn with_flip(self, from: VoteDirection) -> Self {
    match from {
      VoteDirection::Up => {
        debug_assert!(self.up_votes > 0, "flipping an uncounted up vote");
        Self { up_votes: self.up_votes - 1, down_votes: self.down_votes + 1 }
      }
      VoteDirection::Down => {
        debug_assert!(self.down_votes > 0, "flipping an uncounted down vote");
        Self { up_votes: self.up_votes + 1, down_votes: self.down_votes - 1 }
      }
    }
  }
}

/// A recorded vote of `voter` on a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
  pub voter:          String,
  pub translation_id: TranslationId,
  pub direction:      VoteDirection,
  pub timestamp:      DateTime<Utc>,
}

// ─── Translation ─────────────────────────────────────────────────────────────

/// A stored translation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
  pub id:            TranslationId,
  /// Always the canonical word id.
  pub word_id:       WordId,
  pub language:      String,
  pub name:          String,
  pub description:   String,
  pub author:        String,
  pub last_modified: DateTime<Utc>,
  pub tally:         Tally,
  pub confirmed:     bool,
}

impl Translation {
  pub fn rating(&self) -> i64 { self.tally.rating() }
}

// ─── Store inputs ────────────────────────────────────────────────────────────

/// A validated, authenticated, canonicalized submission ready for the store.
#[derive(Debug, Clone)]
pub struct Submission {
  pub word_id:     WordId,
  pub language:    String,
  pub name:        String,
  pub description: String,
  pub author:      String,
  pub timestamp:   DateTime<Utc>,
}

/// A validated, authenticated vote ready for the store.
#[derive(Debug, Clone)]
pub struct Ballot {
  pub translation_id: TranslationId,
  pub voter:          String,
  pub direction:      VoteDirection,
  pub timestamp:      DateTime<Utc>,
}
