// SQLite schema for the pulse collection.
//
// `schema_version` records which layout a database file was created with,
// so a later layout change can be applied to existing files in place.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Layout version written by this build.
pub const SCHEMA_VERSION: i64 = 1;

/// Create the tables if they don't exist yet and record the version.
///
/// Idempotent: `pulse init` and every store open call it.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Pulses, append-only. rowid preserves insertion order.
        -- created_secs/created_nanos hold the full-precision creation time
        -- for ordering; created_at is the RFC 3339 form for display and export.
        CREATE TABLE IF NOT EXISTS submissions (
            id TEXT PRIMARY KEY,
            text TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            created_at TEXT NOT NULL,              -- RFC 3339, UTC
            created_secs INTEGER NOT NULL,         -- unix seconds
            created_nanos INTEGER NOT NULL,        -- 0 to 999_999_999
            sentiment_score REAL NOT NULL,         -- -1.0 to 1.0
            sentiment_magnitude REAL NOT NULL,     -- 0.1 to 1.0
            sentiment_label TEXT NOT NULL,         -- positive / negative / neutral
            topics TEXT NOT NULL DEFAULT '[]'      -- JSON array of topic labels
        );

        CREATE INDEX IF NOT EXISTS idx_submissions_created
            ON submissions(created_secs, created_nanos);
        ",
    )
    .context("Failed to create pulse tables")?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// User tables in the file, reported by `pulse init`.
pub fn table_count(conn: &Connection) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )
    .context("Failed to count tables")
}
