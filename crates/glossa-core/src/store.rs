//! The `TranslationStore` trait.
//!
//! Implemented by storage backends (e.g. `glossa-store-sqlite`). The engine
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  cursor::ContinuationToken,
  outcome::{SubmitOutcome, VoteOutcome},
  translation::{Ballot, Submission, Translation, WordId},
};

/// Abstraction over a transactional translation store.
///
/// Each mutating method is one atomic transaction: it loads the engaged rows,
/// applies [`crate::rules`], and either commits the whole decision or leaves
/// every row unchanged. Concurrent calls on the same lineage or the same
/// (voter, translation) key must serialize so that neither sees a stale read.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait TranslationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create or edit the author's lineage for the submission's pair.
  fn submit(
    &self,
    submission: Submission,
  ) -> impl Future<Output = Result<SubmitOutcome, Self::Error>> + Send + '_;

  /// Record a vote, update the tally, and evaluate confirmation against
  /// `confirmed_rate`.
  fn vote(
    &self,
    ballot: Ballot,
    confirmed_rate: u32,
  ) -> impl Future<Output = Result<VoteOutcome, Self::Error>> + Send + '_;

  /// Up to `count` translations of the pair ordered by rating descending,
  /// then id ascending, starting at the row named by `from` (inclusive) or at
  /// the beginning when `from` is `None`.
  fn ranked(
    &self,
    word_id: WordId,
    language: String,
    from: Option<ContinuationToken>,
    count: usize,
  ) -> impl Future<Output = Result<Vec<Translation>, Self::Error>> + Send + '_;

  /// The confirmed translation of the pair, if any.
  fn confirmed(
    &self,
    word_id: WordId,
    language: String,
  ) -> impl Future<Output = Result<Option<Translation>, Self::Error>> + Send + '_;
}
