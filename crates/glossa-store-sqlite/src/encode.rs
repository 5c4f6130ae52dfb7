//! Conversions between domain types and SQLite column values.
//!
//! Timestamps are stored as integer microseconds since the Unix epoch.
//! Vote directions are stored as a 0/1 `up` flag.

use chrono::{DateTime, Utc};
use glossa_core::translation::{Tally, Translation, TranslationId, VoteDirection, WordId};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_micros(dt: DateTime<Utc>) -> i64 { dt.timestamp_micros() }

pub fn decode_micros(micros: i64) -> Result<DateTime<Utc>> {
  DateTime::from_timestamp_micros(micros).ok_or(Error::Timestamp(micros))
}

/// Lift a decode failure into the error type `Connection::call` closures
/// return.
pub fn in_call<T>(result: Result<T>) -> tokio_rusqlite::Result<T> {
  result.map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))
}

// ─── VoteDirection ───────────────────────────────────────────────────────────

pub fn encode_direction(direction: VoteDirection) -> bool { direction.is_up() }

pub fn decode_direction(up: bool) -> VoteDirection { VoteDirection::from_up(up) }

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// Column list matching [`RawTranslation::from_row`].
pub const TRANSLATION_COLUMNS: &str = "translation_id, word_id, language, name, description, \
                                       author, last_modified, up_votes, down_votes, confirmed";

/// Undecoded row from the `translations` table.
pub struct RawTranslation {
  pub translation_id: i64,
  pub word_id:        WordId,
  pub language:       String,
  pub name:           String,
  pub description:    String,
  pub author:         String,
  pub last_modified:  i64,
  pub up_votes:       i64,
  pub down_votes:     i64,
  pub confirmed:      bool,
}

impl RawTranslation {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      translation_id: row.get(0)?,
      word_id:        row.get(1)?,
      language:       row.get(2)?,
      name:           row.get(3)?,
      description:    row.get(4)?,
      author:         row.get(5)?,
      last_modified:  row.get(6)?,
      up_votes:       row.get(7)?,
      down_votes:     row.get(8)?,
      confirmed:      row.get(9)?,
    })
  }

  pub fn decode(self) -> Result<Translation> {
    Ok(Translation {
      id:            TranslationId(self.translation_id),
      word_id:       self.word_id,
      language:      self.language,
      name:          self.name,
      description:   self.description,
      author:        self.author,
      last_modified: decode_micros(self.last_modified)?,
      tally:         Tally::new(self.up_votes, self.down_votes),
      confirmed:     self.confirmed,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn micros_keep_sub_second_precision() {
    let dt = Utc.with_ymd_and_hms(2020, 1, 1, 9, 0, 0).unwrap()
      + chrono::Duration::microseconds(123_456);
    assert_eq!(decode_micros(encode_micros(dt)).unwrap(), dt);
  }

  #[test]
  fn out_of_range_micros_is_an_error() {
    assert!(matches!(decode_micros(i64::MAX), Err(Error::Timestamp(_))));
  }
}
