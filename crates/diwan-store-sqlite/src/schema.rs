//! SQL schema for the diwan SQLite backend.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS records (
    collection TEXT NOT NULL,   -- partition name, e.g. 'tasks'
    id         TEXT NOT NULL,   -- client-assigned opaque id
    body       TEXT NOT NULL,   -- full JSON document, including the id
    PRIMARY KEY (collection, id)
);

CREATE INDEX IF NOT EXISTS records_collection_idx ON records(collection);

PRAGMA user_version = 1;
";
