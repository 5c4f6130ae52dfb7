//! Word catalog and canonical word ids.
//!
//! The catalog may list the same word (same name and description) at several
//! indices. Translations and votes for any of those indices accumulate against
//! the first occurrence.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Result, translation::WordId};

/// One catalog entry. Field order matters: the serialised form is the
/// duplicate-detection key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
  pub name: String,
  pub desc: String,
}

/// The catalog document: `{"words":[{"name":…,"desc":…},…]}`; index = word id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordCatalog {
  pub words: Vec<WordEntry>,
}

impl WordCatalog {
  pub fn from_json(bytes: &[u8]) -> Result<Self> { Ok(serde_json::from_slice(bytes)?) }

  pub fn len(&self) -> usize { self.words.len() }

  pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

/// Maps a word id to its canonical id. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct WordCanonicalizer {
  /// Only duplicate ids are present; absent ids map to themselves.
  canonical_by_id: HashMap<WordId, WordId>,
}

impl WordCanonicalizer {
  /// The identity mapping, used when no catalog is configured.
  pub fn identity() -> Self { Self::default() }

  pub fn from_catalog(catalog: &WordCatalog) -> Result<Self> {
    let mut first_by_key: HashMap<String, WordId> = HashMap::new();
    let mut canonical_by_id = HashMap::new();

    for (index, entry) in catalog.words.iter().enumerate() {
      let Ok(id) = WordId::try_from(index) else { break };
      let key = serde_json::to_string(entry)?;
      match first_by_key.get(&key) {
        Some(&first) => {
          canonical_by_id.insert(id, first);
        }
        None => {
          first_by_key.insert(key, id);
        }
      }
    }

    Ok(Self { canonical_by_id })
  }

  pub fn canonicalize(&self, id: WordId) -> WordId {
    self.canonical_by_id.get(&id).copied().unwrap_or(id)
  }

  /// Number of ids that map somewhere other than themselves.
  pub fn duplicate_count(&self) -> usize { self.canonical_by_id.len() }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(name: &str, desc: &str) -> WordEntry {
    WordEntry { name: name.into(), desc: desc.into() }
  }

  #[test]
  fn identity_maps_everything_to_itself() {
    let c = WordCanonicalizer::identity();
    assert_eq!(c.canonicalize(0), 0);
    assert_eq!(c.canonicalize(3299), 3299);
  }

  #[test]
  fn duplicates_map_to_first_occurrence() {
    let catalog = WordCatalog {
      words: vec![
        entry("apple", "a fruit"),
        entry("river", "flowing water"),
        entry("apple", "a fruit"),
        entry("apple", "a company"),
        entry("apple", "a fruit"),
        entry("river", "flowing water"),
      ],
    };
    let c = WordCanonicalizer::from_catalog(&catalog).unwrap();
    assert_eq!(c.canonicalize(0), 0);
    assert_eq!(c.canonicalize(1), 1);
    assert_eq!(c.canonicalize(2), 0);
    assert_eq!(c.canonicalize(3), 3);
    assert_eq!(c.canonicalize(4), 0);
    assert_eq!(c.canonicalize(5), 1);
    assert_eq!(c.duplicate_count(), 3);
  }

  #[test]
  fn ids_beyond_catalog_are_unchanged() {
    let catalog = WordCatalog { words: vec![entry("a", "b"), entry("a", "b")] };
    let c = WordCanonicalizer::from_catalog(&catalog).unwrap();
    assert_eq!(c.canonicalize(1), 0);
    assert_eq!(c.canonicalize(99), 99);
  }

  #[test]
  fn parses_catalog_document() {
    let json = br#"{"words":[{"name":"sun","desc":"star"},{"name":"moon","desc":""}]}"#;
    let catalog = WordCatalog::from_json(json).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.words[1], entry("moon", ""));
  }
}
