//! The translation/vote engine.
//!
//! Every public operation runs validation, then authentication, then
//! canonicalization, and only then opens a store transaction. A caller that is
//! not a valid identity never reaches the store.

use tracing::debug;

use crate::{
  Error, Result,
  cursor::ContinuationToken,
  identity::IdentityService,
  outcome::{Rejection, SubmitOutcome, VoteOutcome},
  request::{SubmitTranslationRequest, VoteRequest},
  signing,
  store::TranslationStore,
  translation::{Ballot, Submission, Translation, TranslationId, VoteDirection, WordId},
  validation::{self, Limits},
  words::WordCanonicalizer,
};

pub const DEFAULT_ITEMS_LIMIT: usize = 50;
pub const DEFAULT_CONFIRMED_RATE: u32 = 5;

/// Tunables of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
  /// Page size of [`Engine::list`].
  pub items_limit:    usize,
  /// Net rating at which a translation becomes confirmed.
  pub confirmed_rate: u32,
  pub limits:         Limits,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      items_limit:    DEFAULT_ITEMS_LIMIT,
      confirmed_rate: DEFAULT_CONFIRMED_RATE,
      limits:         Limits::default(),
    }
  }
}

// ─── Page ────────────────────────────────────────────────────────────────────

/// One page of a rating-ordered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
  pub translations: Vec<Translation>,
  /// Present when more rows remain.
  pub next:         Option<ContinuationToken>,
}

impl Page {
  /// Build a page from up to `limit + 1` fetched rows. The extra row, if
  /// present, is dropped and becomes the continuation token.
  pub fn from_rows(mut rows: Vec<Translation>, limit: usize) -> Self {
    let next = if rows.len() > limit {
      rows.truncate(limit + 1);
      rows
        .pop()
        .map(|extra| ContinuationToken::new(extra.id, extra.rating()))
    } else {
      None
    };
    Self { translations: rows, next }
  }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

pub struct Engine<S, I> {
  store:    S,
  identity: I,
  words:    WordCanonicalizer,
  config:   EngineConfig,
}

impl<S, I> Engine<S, I>
where
  S: TranslationStore,
  I: IdentityService,
{
  pub fn new(store: S, identity: I, words: WordCanonicalizer, config: EngineConfig) -> Self {
    Self { store, identity, words, config }
  }

  pub fn config(&self) -> &EngineConfig { &self.config }

  pub fn store(&self) -> &S { &self.store }

  /// Recover the signer and return it if it is a valid identity.
  async fn authenticate(&self, message: &str, signature: &str) -> Result<Option<String>> {
    let address = self.identity.recover_signer(message, signature).await?;
    if self.identity.is_identity(&address).await? {
      Ok(Some(address))
    } else {
      debug!(%address, "signer is not a valid identity");
      Ok(None)
    }
  }

  /// Create or edit the signer's translation of a word.
  pub async fn submit(&self, request: SubmitTranslationRequest) -> Result<SubmitOutcome> {
    let timestamp = validation::validate_submission(&request, &self.config.limits)?;

    let message = signing::submission_message(&request);
    let Some(author) = self.authenticate(&message, &request.signature).await? else {
      return Ok(SubmitOutcome::Rejected(Rejection::NotIdentity));
    };

    let submission = Submission {
      word_id: self.words.canonicalize(request.word),
      language: request.language,
      name: request.name,
      description: request.description,
      author,
      timestamp,
    };

    let outcome = self
      .store
      .submit(submission)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    if let SubmitOutcome::Rejected(rejection) = outcome {
      debug!(word = request.word, %rejection, "submission rejected");
    }
    Ok(outcome)
  }

  /// Vote a translation up or down.
  pub async fn vote(&self, request: VoteRequest) -> Result<VoteOutcome> {
    let timestamp = validation::validate_vote(&request)?;
    let translation_id: TranslationId = request.translation_id.parse()?;

    let message = signing::vote_message(&request);
    let Some(voter) = self.authenticate(&message, &request.signature).await? else {
      return Ok(VoteOutcome::Rejected(Rejection::NotIdentity));
    };

    let ballot = Ballot {
      translation_id,
      voter,
      direction: VoteDirection::from_up(request.up),
      timestamp,
    };

    let outcome = self
      .store
      .vote(ballot, self.config.confirmed_rate)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    match outcome {
      VoteOutcome::UnknownTranslation => {
        Err(Error::bad_request("invalid value 'translationId'"))
      }
      VoteOutcome::Rejected(rejection) => {
        debug!(%translation_id, %rejection, "vote rejected");
        Ok(outcome)
      }
      VoteOutcome::Accepted { .. } => Ok(outcome),
    }
  }

  /// One page of the pair's translations, best rated first.
  pub async fn list(&self, word_id: WordId, language: &str, token: &str) -> Result<Page> {
    validation::validate_language(language)?;
    let from = ContinuationToken::decode(token)?;
    let limit = self.config.items_limit;

    let rows = self
      .store
      .ranked(self.words.canonicalize(word_id), language.to_owned(), from, limit + 1)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    Ok(Page::from_rows(rows, limit))
  }

  /// The confirmed translation of the pair, or `None`.
  pub async fn confirmed(&self, word_id: WordId, language: &str) -> Result<Option<Translation>> {
    validation::validate_language(language)?;
    self
      .store
      .confirmed(self.words.canonicalize(word_id), language.to_owned())
      .await
      .map_err(|e| Error::Store(Box::new(e)))
  }
}
