// Storage layer — the submission collection behind a store trait.
//
// MemoryStore keeps pulses for the life of the process. With the default
// `sqlite` feature, SqliteStore persists them with rusqlite (bundled, so
// there's no system SQLite dependency). The database file lives wherever
// PULSE_DB_PATH points (defaults to ./pulse.db).

pub mod memory;
pub mod models;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod queries;
#[cfg(feature = "sqlite")]
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::MemoryStore;
pub use traits::SubmissionStore;

#[cfg(feature = "sqlite")]
use anyhow::{Context, Result};
#[cfg(feature = "sqlite")]
use std::path::Path;

/// Create the database file (and its directory) if missing, then migrate.
///
/// Used by `pulse init`.
#[cfg(feature = "sqlite")]
pub fn initialize_sqlite(db_path: &str) -> Result<sqlite::SqliteStore> {
    match Path::new(db_path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory for {db_path}"))?,
        _ => {}
    }
    connect(db_path)
}

/// Open a database that `pulse init` already created.
#[cfg(feature = "sqlite")]
pub fn open_sqlite(db_path: &str) -> Result<sqlite::SqliteStore> {
    if !Path::new(db_path).exists() {
        anyhow::bail!("No pulse database at {db_path}. Run `pulse init` first.");
    }
    // Files from older builds pick up pending migrations here
    connect(db_path)
}

#[cfg(feature = "sqlite")]
fn connect(db_path: &str) -> Result<sqlite::SqliteStore> {
    let conn = rusqlite::Connection::open(db_path)
        .with_context(|| format!("Failed to open pulse database {db_path}"))?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    schema::create_tables(&conn)?;
    Ok(sqlite::SqliteStore::new(conn))
}
