//! In-memory record store for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::favorites::{FavoritesError, RecordStore};

/// A `RecordStore` backed by a map, with switchable failures.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<HashMap<String, String>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing the save counter.
    pub fn put(&self, key: &str, value: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.insert(key.to_string(), value.to_string());
        }
    }

    /// Raw record contents.
    pub fn get(&self, key: &str) -> Option<String> {
        self.records.lock().ok()?.get(key).cloned()
    }

    /// Make every `load` fail.
    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Make every `save` fail.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self, key: &str) -> Result<Option<String>, FavoritesError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(FavoritesError::Storage("simulated read failure".to_string()));
        }
        let records = self
            .records
            .lock()
            .map_err(|e| FavoritesError::Storage(format!("Lock poisoned: {}", e)))?;
        Ok(records.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), FavoritesError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(FavoritesError::Storage("simulated write failure".to_string()));
        }
        let mut records = self
            .records
            .lock()
            .map_err(|e| FavoritesError::Storage(format!("Lock poisoned: {}", e)))?;
        records.insert(key.to_string(), value.to_string());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
