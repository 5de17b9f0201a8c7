//! Testing utilities and mock implementations.
//!
//! Mocks for the catalog and the favorites backend, so the controller can
//! be driven end to end without network or disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use marquee_core::testing::{fixtures, MemoryRecordStore, MockMovieCatalog};
//!
//! let catalog = MockMovieCatalog::new();
//! let backend = MemoryRecordStore::new();
//!
//! catalog.set_default_page(fixtures::movie_page(1, 20, 3, 60)).await;
//! backend.put("movieFavorites", "[]");
//! ```

mod memory_store;
mod mock_catalog;

pub use memory_store::MemoryRecordStore;
pub use mock_catalog::MockMovieCatalog;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{Movie, MoviePage, Video};

    /// Create a test movie with reasonable defaults.
    pub fn movie(id: u32, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: Some(format!("A film called {}.", title)),
            poster_path: Some(format!("/poster-{}.jpg", id)),
            release_date: Some("1999-03-31".to_string()),
            vote_average: 7.5,
            genres: None,
        }
    }

    /// Create page `page` holding `count` movies with ids continuing from
    /// the previous pages.
    pub fn movie_page(page: u32, count: u32, total_pages: u32, total_results: u32) -> MoviePage {
        let first = (page - 1) * count + 1;
        MoviePage {
            page,
            results: (first..first + count)
                .map(|id| movie(id, &format!("Movie {}", id)))
                .collect(),
            total_pages,
            total_results,
        }
    }

    /// Create an empty response for `page`.
    pub fn empty_page(page: u32) -> MoviePage {
        MoviePage {
            page,
            ..MoviePage::default()
        }
    }

    /// Create a YouTube video.
    pub fn video(key: &str, kind: &str, language: &str) -> Video {
        Video {
            key: key.to_string(),
            site: "YouTube".to_string(),
            kind: kind.to_string(),
            iso_639_1: Some(language.to_string()),
            name: Some(format!("{} ({})", kind, language)),
        }
    }
}
