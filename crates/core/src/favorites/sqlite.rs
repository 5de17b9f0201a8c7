//! SQLite-backed record store.

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::{FavoritesError, RecordStore};

/// Named records in a single SQLite table.
pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    /// Open the database file, creating it and the table if needed.
    pub fn new(path: &Path) -> Result<Self, FavoritesError> {
        let conn = Connection::open(path).map_err(|e| FavoritesError::Storage(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, FavoritesError> {
        let conn =
            Connection::open_in_memory().map_err(|e| FavoritesError::Storage(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), FavoritesError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS records (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| FavoritesError::Storage(e.to_string()))?;

        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, FavoritesError> {
        self.conn
            .lock()
            .map_err(|e| FavoritesError::Storage(format!("Lock poisoned: {}", e)))
    }
}

impl RecordStore for SqliteRecordStore {
    fn load(&self, key: &str) -> Result<Option<String>, FavoritesError> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT value FROM records WHERE key = ?",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| FavoritesError::Storage(e.to_string()))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), FavoritesError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )
        .map_err(|e| FavoritesError::Storage(e.to_string()))?;
        Ok(())
    }
}
