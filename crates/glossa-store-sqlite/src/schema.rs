//! SQL schema for the Glossa SQLite store.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per (word, language, author) lineage. Edits overwrite in place.
CREATE TABLE IF NOT EXISTS translations (
    translation_id INTEGER PRIMARY KEY AUTOINCREMENT,
    word_id        INTEGER NOT NULL,   -- canonical word id
    language       TEXT    NOT NULL,
    name           TEXT    NOT NULL,
    description    TEXT    NOT NULL DEFAULT '',
    author         TEXT    NOT NULL,
    last_modified  INTEGER NOT NULL,   -- microseconds since the Unix epoch
    up_votes       INTEGER NOT NULL DEFAULT 0 CHECK (up_votes >= 0),
    down_votes     INTEGER NOT NULL DEFAULT 0 CHECK (down_votes >= 0),
    confirmed      INTEGER NOT NULL DEFAULT 0 CHECK (confirmed IN (0, 1)),
    UNIQUE (word_id, language, author)
);

-- At most one confirmed translation per pair.
CREATE UNIQUE INDEX IF NOT EXISTS translations_confirmed_idx
    ON translations(word_id, language) WHERE confirmed = 1;

CREATE INDEX IF NOT EXISTS translations_rank_idx
    ON translations(word_id, language, (up_votes - down_votes) DESC, translation_id);

CREATE TRIGGER IF NOT EXISTS translations_confirmed_sticky
BEFORE UPDATE OF confirmed ON translations
WHEN OLD.confirmed = 1 AND NEW.confirmed = 0
BEGIN
    SELECT RAISE(ABORT, 'confirmed translation cannot be unconfirmed');
END;

-- One vote per (voter, translation); a flip updates the row.
CREATE TABLE IF NOT EXISTS votes (
    voter          TEXT    NOT NULL,
    translation_id INTEGER NOT NULL REFERENCES translations(translation_id),
    up             INTEGER NOT NULL CHECK (up IN (0, 1)),
    cast_at        INTEGER NOT NULL,   -- microseconds since the Unix epoch
    PRIMARY KEY (voter, translation_id)
);

PRAGMA user_version = 1;
";
