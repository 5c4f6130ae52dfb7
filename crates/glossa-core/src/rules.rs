//! Transition rules for submissions, votes, and confirmation.
//!
//! These functions decide; they do not persist. A store loads the engaged
//! rows inside its transaction, asks these rules what to do, and applies the
//! answer before committing.

use chrono::{DateTime, Utc};

use crate::{
  outcome::Rejection,
  translation::{Ballot, Tally, TranslationId, VoteDirection},
};

// ─── Submissions ─────────────────────────────────────────────────────────────

/// The stored state of an author's lineage relevant to a resubmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineageHead {
  pub id:            TranslationId,
  pub last_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionDecision {
  /// Create a new lineage with an empty tally.
  Insert,
  /// Overwrite name, description, and timestamp of this lineage.
  Update(TranslationId),
  Reject(Rejection),
}

/// Decide a submission.
///
/// `pair_confirmed` is whether any translation of the (word, language) pair
/// is confirmed; `existing` is the submitting author's lineage, if any.
pub fn decide_submission(
  pair_confirmed: bool,
  existing: Option<&LineageHead>,
  timestamp: DateTime<Utc>,
) -> SubmissionDecision {
  if pair_confirmed {
    return SubmissionDecision::Reject(Rejection::ConfirmedTranslationExists);
  }
  match existing {
    None => SubmissionDecision::Insert,
    Some(head) if timestamp <= head.last_modified => {
      SubmissionDecision::Reject(Rejection::OutdatedSubmission)
    }
    Some(head) => SubmissionDecision::Update(head.id),
  }
}

// ─── Votes ───────────────────────────────────────────────────────────────────

/// The voted-on translation as loaded by the store.
#[derive(Debug, Clone, Copy)]
pub struct VoteTarget<'a> {
  pub author: &'a str,
  pub tally:  Tally,
}

/// The voter's stored vote on the target, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviousVote {
  pub direction: VoteDirection,
  pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDecision {
  /// Record a first vote; `tally` is the post-vote tally.
  Insert { tally: Tally },
  /// Replace the stored vote's direction and timestamp.
  Flip { tally: Tally },
  Reject(Rejection),
}

impl VoteDecision {
  pub fn tally(&self) -> Option<Tally> {
    match self {
      Self::Insert { tally } | Self::Flip { tally } => Some(*tally),
      Self::Reject(_) => None,
    }
  }
}

/// Decide a vote. Self-voting is checked before anything else.
pub fn decide_vote(
  target: &VoteTarget<'_>,
  previous: Option<&PreviousVote>,
  ballot: &Ballot,
) -> VoteDecision {
  if target.author == ballot.voter {
    return VoteDecision::Reject(Rejection::SelfVoting);
  }
  match previous {
    None => VoteDecision::Insert { tally: target.tally.with_vote(ballot.direction) },
    Some(prev) if ballot.timestamp <= prev.timestamp => {
      VoteDecision::Reject(Rejection::OutdatedSubmission)
    }
    Some(prev) if prev.direction == ballot.direction => {
      VoteDecision::Reject(Rejection::DuplicatedVote)
    }
    Some(prev) => VoteDecision::Flip { tally: target.tally.with_flip(prev.direction) },
  }
}

// ─── Confirmation ────────────────────────────────────────────────────────────

/// Whether a translation becomes confirmed after a tally change.
///
/// The predicate is the net rating reaching `confirmed_rate`. A pair holds
/// at most one confirmed translation, so a sibling's confirmation blocks it.
pub fn should_confirm(
  already_confirmed: bool,
  sibling_confirmed: bool,
  tally: Tally,
  confirmed_rate: u32,
) -> bool {
  !already_confirmed && !sibling_confirmed && tally.rating() >= i64::from(confirmed_rate)
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};

  use super::*;

  fn t0() -> DateTime<Utc> { Utc.with_ymd_and_hms(2020, 1, 1, 10, 0, 0).unwrap() }

  fn ballot(voter: &str, direction: VoteDirection, timestamp: DateTime<Utc>) -> Ballot {
    Ballot {
      translation_id: TranslationId(1),
      voter: voter.into(),
      direction,
      timestamp,
    }
  }

  // ── Submissions ────────────────────────────────────────────────────────

  #[test]
  fn first_submission_inserts() {
    assert_eq!(decide_submission(false, None, t0()), SubmissionDecision::Insert);
  }

  #[test]
  fn confirmed_pair_rejects_even_new_authors() {
    assert_eq!(
      decide_submission(true, None, t0()),
      SubmissionDecision::Reject(Rejection::ConfirmedTranslationExists)
    );
  }

  #[test]
  fn equal_or_older_timestamp_is_outdated() {
    let head = LineageHead { id: TranslationId(3), last_modified: t0() };
    for ts in [t0(), t0() - Duration::seconds(1)] {
      assert_eq!(
        decide_submission(false, Some(&head), ts),
        SubmissionDecision::Reject(Rejection::OutdatedSubmission)
      );
    }
  }

  #[test]
  fn newer_timestamp_edits_same_id() {
    let head = LineageHead { id: TranslationId(3), last_modified: t0() };
    assert_eq!(
      decide_submission(false, Some(&head), t0() + Duration::microseconds(1)),
      SubmissionDecision::Update(TranslationId(3))
    );
  }

  // ── Votes ──────────────────────────────────────────────────────────────

  #[test]
  fn self_vote_rejected_even_as_first_vote() {
    let target = VoteTarget { author: "alice", tally: Tally::default() };
    for direction in [VoteDirection::Up, VoteDirection::Down] {
      assert_eq!(
        decide_vote(&target, None, &ballot("alice", direction, t0())),
        VoteDecision::Reject(Rejection::SelfVoting)
      );
    }
  }

  #[test]
  fn first_vote_increments() {
    let target = VoteTarget { author: "alice", tally: Tally::new(2, 1) };
    assert_eq!(
      decide_vote(&target, None, &ballot("bob", VoteDirection::Up, t0())),
      VoteDecision::Insert { tally: Tally::new(3, 1) }
    );
  }

  #[test]
  fn same_direction_newer_is_duplicate() {
    let target = VoteTarget { author: "alice", tally: Tally::new(1, 0) };
    let prev = PreviousVote { direction: VoteDirection::Up, timestamp: t0() };
    assert_eq!(
      decide_vote(
        &target,
        Some(&prev),
        &ballot("bob", VoteDirection::Up, t0() + Duration::hours(1))
      ),
      VoteDecision::Reject(Rejection::DuplicatedVote)
    );
  }

  #[test]
  fn not_newer_is_outdated_regardless_of_direction() {
    let target = VoteTarget { author: "alice", tally: Tally::new(1, 0) };
    let prev = PreviousVote { direction: VoteDirection::Up, timestamp: t0() };
    for direction in [VoteDirection::Up, VoteDirection::Down] {
      assert_eq!(
        decide_vote(&target, Some(&prev), &ballot("bob", direction, t0())),
        VoteDecision::Reject(Rejection::OutdatedSubmission)
      );
    }
  }

  #[test]
  fn opposite_direction_newer_flips() {
    let target = VoteTarget { author: "alice", tally: Tally::new(1, 0) };
    let prev = PreviousVote { direction: VoteDirection::Up, timestamp: t0() };
    let decision = decide_vote(
      &target,
      Some(&prev),
      &ballot("bob", VoteDirection::Down, t0() + Duration::hours(1)),
    );
    assert_eq!(decision, VoteDecision::Flip { tally: Tally::new(0, 1) });
  }

  // ── Confirmation ───────────────────────────────────────────────────────

  #[test]
  fn confirms_at_threshold() {
    assert!(!should_confirm(false, false, Tally::new(2, 0), 3));
    assert!(should_confirm(false, false, Tally::new(3, 0), 3));
    assert!(!should_confirm(false, false, Tally::new(4, 2), 3));
  }

  #[test]
  fn never_reconfirms_or_confirms_a_second_sibling() {
    assert!(!should_confirm(true, false, Tally::new(9, 0), 3));
    assert!(!should_confirm(false, true, Tally::new(9, 0), 3));
  }
}
