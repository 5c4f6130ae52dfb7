//! [`SqliteStore`], the SQLite implementation of [`TranslationStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, TransactionBehavior};
use tracing::debug;

use glossa_core::{
  cursor::ContinuationToken,
  outcome::{SubmitOutcome, VoteOutcome},
  rules::{self, LineageHead, PreviousVote, SubmissionDecision, VoteDecision, VoteTarget},
  store::TranslationStore,
  translation::{Ballot, Submission, Tally, Translation, TranslationId, WordId},
};

use crate::{
  Result,
  encode::{
    RawTranslation, TRANSLATION_COLUMNS, decode_direction, decode_micros, encode_direction,
    encode_micros, in_call,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Glossa translation store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted and every call
/// is serialized on its worker thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Look a translation up by id.
  pub async fn get(&self, id: TranslationId) -> Result<Option<Translation>> {
    let raw: Option<RawTranslation> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {TRANSLATION_COLUMNS} FROM translations WHERE translation_id = ?1"),
            rusqlite::params![id.0],
            RawTranslation::from_row,
          )
          .optional()?)
      })
      .await?;
    raw.map(RawTranslation::decode).transpose()
  }
}

fn pair_has_confirmed(
  tx: &rusqlite::Transaction<'_>,
  word_id: WordId,
  language: &str,
  except: Option<i64>,
) -> rusqlite::Result<bool> {
  tx.query_row(
    "SELECT EXISTS(
       SELECT 1 FROM translations
       WHERE word_id = ?1 AND language = ?2 AND confirmed = 1
         AND (?3 IS NULL OR translation_id != ?3)
     )",
    rusqlite::params![word_id, language, except],
    |r| r.get(0),
  )
}

// ─── TranslationStore impl ───────────────────────────────────────────────────

impl TranslationStore for SqliteStore {
  type Error = crate::Error;

  async fn submit(&self, submission: Submission) -> Result<SubmitOutcome> {
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let pair_confirmed =
          pair_has_confirmed(&tx, submission.word_id, &submission.language, None)?;

        let head: Option<(i64, i64)> = tx
          .query_row(
            "SELECT translation_id, last_modified FROM translations
             WHERE word_id = ?1 AND language = ?2 AND author = ?3",
            rusqlite::params![submission.word_id, submission.language, submission.author],
            |r| Ok((r.get(0)?, r.get(1)?)),
          )
          .optional()?;
        let head = head
          .map(|(id, micros)| {
            in_call(decode_micros(micros)).map(|last_modified| LineageHead {
              id: TranslationId(id),
              last_modified,
            })
          })
          .transpose()?;

        let modified_at = encode_micros(submission.timestamp);
        let decision =
          rules::decide_submission(pair_confirmed, head.as_ref(), submission.timestamp);
        let outcome = match decision {
          SubmissionDecision::Reject(rejection) => return Ok(SubmitOutcome::Rejected(rejection)),
          SubmissionDecision::Insert => {
            tx.execute(
              "INSERT INTO translations
                 (word_id, language, name, description, author, last_modified)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
              rusqlite::params![
                submission.word_id,
                submission.language,
                submission.name,
                submission.description,
                submission.author,
                modified_at,
              ],
            )?;
            SubmitOutcome::Accepted { id: TranslationId(tx.last_insert_rowid()), created: true }
          }
          SubmissionDecision::Update(id) => {
            tx.execute(
              "UPDATE translations SET name = ?1, description = ?2, last_modified = ?3
               WHERE translation_id = ?4",
              rusqlite::params![submission.name, submission.description, modified_at, id.0],
            )?;
            SubmitOutcome::Accepted { id, created: false }
          }
        };

        tx.commit()?;
        Ok(outcome)
      })
      .await?;
    Ok(outcome)
  }

  async fn vote(&self, ballot: Ballot, confirmed_rate: u32) -> Result<VoteOutcome> {
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id = ballot.translation_id.0;

        let target: Option<(String, i64, i64, bool, WordId, String)> = tx
          .query_row(
            "SELECT author, up_votes, down_votes, confirmed, word_id, language
             FROM translations WHERE translation_id = ?1",
            rusqlite::params![id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?, r.get(5)?)),
          )
          .optional()?;
        let Some((author, up_votes, down_votes, was_confirmed, word_id, language)) = target else {
          return Ok(VoteOutcome::UnknownTranslation);
        };

        let previous: Option<(bool, i64)> = tx
          .query_row(
            "SELECT up, cast_at FROM votes WHERE voter = ?1 AND translation_id = ?2",
            rusqlite::params![ballot.voter, id],
            |r| Ok((r.get(0)?, r.get(1)?)),
          )
          .optional()?;
        let previous = previous
          .map(|(up, micros)| {
            in_call(decode_micros(micros)).map(|timestamp| PreviousVote {
              direction: decode_direction(up),
              timestamp,
            })
          })
          .transpose()?;

        let target = VoteTarget { author: &author, tally: Tally::new(up_votes, down_votes) };
        let up = encode_direction(ballot.direction);
        let cast_at = encode_micros(ballot.timestamp);
        let tally = match rules::decide_vote(&target, previous.as_ref(), &ballot) {
          VoteDecision::Reject(rejection) => return Ok(VoteOutcome::Rejected(rejection)),
          VoteDecision::Insert { tally } => {
            tx.execute(
              "INSERT INTO votes (voter, translation_id, up, cast_at) VALUES (?1, ?2, ?3, ?4)",
              rusqlite::params![ballot.voter, id, up, cast_at],
            )?;
            tally
          }
          VoteDecision::Flip { tally } => {
            tx.execute(
              "UPDATE votes SET up = ?1, cast_at = ?2 WHERE voter = ?3 AND translation_id = ?4",
              rusqlite::params![up, cast_at, ballot.voter, id],
            )?;
            tally
          }
        };

        tx.execute(
          "UPDATE translations SET up_votes = ?1, down_votes = ?2 WHERE translation_id = ?3",
          rusqlite::params![tally.up_votes, tally.down_votes, id],
        )?;

        let sibling_confirmed = pair_has_confirmed(&tx, word_id, &language, Some(id))?;
        let confirm =
          rules::should_confirm(was_confirmed, sibling_confirmed, tally, confirmed_rate);
        if confirm {
          tx.execute(
            "UPDATE translations SET confirmed = 1 WHERE translation_id = ?1",
            rusqlite::params![id],
          )?;
        }

        tx.commit()?;
        if confirm {
          debug!(translation_id = id, word_id, %language, "translation confirmed");
        }
        Ok(VoteOutcome::Accepted { tally, confirmed: was_confirmed || confirm })
      })
      .await?;
    Ok(outcome)
  }

  async fn ranked(
    &self,
    word_id: WordId,
    language: String,
    from: Option<ContinuationToken>,
    count: usize,
  ) -> Result<Vec<Translation>> {
    let from_id = from.map(|t| t.id.0);
    let from_rating = from.map(|t| t.rating);
    let limit = i64::try_from(count).unwrap_or(i64::MAX);

    let raws: Vec<RawTranslation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TRANSLATION_COLUMNS} FROM translations
           WHERE word_id = ?1 AND language = ?2
             AND (?3 IS NULL
                  OR (up_votes - down_votes) < ?4
                  OR ((up_votes - down_votes) = ?4 AND translation_id >= ?3))
           ORDER BY (up_votes - down_votes) DESC, translation_id ASC
           LIMIT ?5"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![word_id, language, from_id, from_rating, limit],
            RawTranslation::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTranslation::decode).collect()
  }

  async fn confirmed(&self, word_id: WordId, language: String) -> Result<Option<Translation>> {
    let raw: Option<RawTranslation> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {TRANSLATION_COLUMNS} FROM translations
               WHERE word_id = ?1 AND language = ?2 AND confirmed = 1"
            ),
            rusqlite::params![word_id, language],
            RawTranslation::from_row,
          )
          .optional()?)
      })
      .await?;
    raw.map(RawTranslation::decode).transpose()
  }
}
