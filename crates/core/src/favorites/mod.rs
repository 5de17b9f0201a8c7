//! Locally persisted favorites.
//!
//! The favorites set lives in memory inside `FavoritesStore` and is written
//! back in full to a `RecordStore` after every change.

mod sqlite;
mod store;

pub use sqlite::SqliteRecordStore;
pub use store::FavoritesStore;

use thiserror::Error;

/// Errors raised by favorites persistence.
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// Backing storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The favorites set could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Durable storage of named string records.
///
/// Each record is read and overwritten as a whole.
pub trait RecordStore: Send + Sync {
    /// Read a record; `None` if it has never been written.
    fn load(&self, key: &str) -> Result<Option<String>, FavoritesError>;

    /// Replace a record's contents.
    fn save(&self, key: &str, value: &str) -> Result<(), FavoritesError>;
}
