//! In-memory favorites set with write-through persistence.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{FavoritesError, RecordStore};
use crate::catalog::Movie;
use crate::metrics;

/// The user's favorite movies, in the order they were added.
pub struct FavoritesStore {
    backend: Arc<dyn RecordStore>,
    record_key: String,
    entries: Vec<Movie>,
    ids: HashSet<u32>,
}

impl fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("record_key", &self.record_key)
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl FavoritesStore {
    /// Read the favorites record once.
    ///
    /// A missing, unreadable or malformed record yields an empty set.
    /// Repeated ids keep their first occurrence.
    pub fn load(backend: Arc<dyn RecordStore>, record_key: impl Into<String>) -> Self {
        let record_key = record_key.into();

        let entries = match backend.load(&record_key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Movie>>(&raw) {
                Ok(movies) => movies,
                Err(e) => {
                    warn!(
                        "Favorites record '{}' is corrupt, starting empty: {}",
                        record_key, e
                    );
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No favorites record '{}' yet", record_key);
                Vec::new()
            }
            Err(e) => {
                warn!(
                    "Failed to read favorites record '{}', starting empty: {}",
                    record_key, e
                );
                Vec::new()
            }
        };

        let mut ids = HashSet::with_capacity(entries.len());
        let entries: Vec<Movie> = entries.into_iter().filter(|m| ids.insert(m.id)).collect();

        info!("Loaded {} favorites", entries.len());

        Self {
            backend,
            record_key,
            entries,
            ids,
        }
    }

    /// Add the movie if absent, remove it if present.
    ///
    /// The whole set is persisted before the change becomes visible; on a
    /// storage failure the set is left as it was. Returns whether the movie
    /// is a favorite afterwards.
    pub fn toggle(&mut self, movie: &Movie) -> Result<bool, FavoritesError> {
        let mut next = self.entries.clone();
        let added = match next.iter().position(|m| m.id == movie.id) {
            Some(index) => {
                next.remove(index);
                false
            }
            None => {
                next.push(movie.clone());
                true
            }
        };

        self.persist(&next)?;

        if added {
            self.ids.insert(movie.id);
        } else {
            self.ids.remove(&movie.id);
        }
        self.entries = next;

        let action = if added { "added" } else { "removed" };
        metrics::FAVORITE_TOGGLES.with_label_values(&[action]).inc();
        debug!("Favorite {} {} ({} total)", movie.id, action, self.entries.len());

        Ok(added)
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Favorites in insertion order.
    pub fn all(&self) -> &[Movie] {
        &self.entries
    }

    pub fn get(&self, id: u32) -> Option<&Movie> {
        self.entries.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self, entries: &[Movie]) -> Result<(), FavoritesError> {
        let raw = serde_json::to_string(entries)
            .map_err(|e| FavoritesError::Serialization(e.to_string()))?;
        self.backend.save(&self.record_key, &raw)
    }
}
