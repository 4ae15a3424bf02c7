use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

/// Owner of the single database handle. Every item operation lives on this
/// type so all SQL runs through one connection, one call at a time.
pub struct ItemStore {
    pub(super) conn: Connection,
}

impl ItemStore {
    /// Ensure the database file exists, create the table if needed, and return
    /// a ready store. The info line doubles as the "database ready" marker in
    /// the log before the UI loads its first list.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }

        let conn = Connection::open(path).context("failed to open SQLite database")?;
        ensure_schema(&conn)?;
        info!(path = %path.display(), "todo database ready");
        Ok(Self { conn })
    }

    /// Same schema on a throwaway in-memory connection.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        ensure_schema(&conn)?;
        Ok(Self { conn })
    }
}

/// Create the `todo_items` table when it is missing. Safe to run repeatedly.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS todo_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT,
            completed TINYINT
        )",
        [],
    )
    .context("failed to create todo_items table")?;
    Ok(())
}
