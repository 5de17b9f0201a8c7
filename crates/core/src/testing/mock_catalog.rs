//! Mock movie catalog for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::catalog::{CatalogError, MovieCatalog, MoviePage, Video};
use crate::query::QueryDescriptor;

/// Mock implementation of the MovieCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable pages per search term, per page number or by default
/// - Delay responses per search term or page to force out-of-order completion
/// - Track descriptors for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::testing::{MockMovieCatalog, fixtures};
///
/// let catalog = MockMovieCatalog::new();
/// catalog.set_default_page(fixtures::movie_page(1, 20, 5, 100)).await;
/// catalog.set_page(5, fixtures::empty_page(5)).await;
/// ```
#[derive(Debug)]
pub struct MockMovieCatalog {
    /// Responses for search descriptors, by trimmed term.
    query_pages: Arc<RwLock<HashMap<String, MoviePage>>>,
    /// Responses by requested page number.
    pages: Arc<RwLock<HashMap<u32, MoviePage>>>,
    /// Response when nothing more specific matches.
    default_page: Arc<RwLock<Option<MoviePage>>>,
    /// Response delays for search descriptors, by trimmed term.
    query_delays: Arc<RwLock<HashMap<String, Duration>>>,
    /// Response delays by requested page number.
    page_delays: Arc<RwLock<HashMap<u32, Duration>>>,
    /// Videos by movie ID.
    videos: Arc<RwLock<HashMap<u32, Vec<Video>>>>,
    /// Recorded page requests.
    requests: Arc<RwLock<Vec<QueryDescriptor>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
}

impl Default for MockMovieCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMovieCatalog {
    /// Create a mock that answers every query with an empty page.
    pub fn new() -> Self {
        Self {
            query_pages: Arc::new(RwLock::new(HashMap::new())),
            pages: Arc::new(RwLock::new(HashMap::new())),
            default_page: Arc::new(RwLock::new(None)),
            query_delays: Arc::new(RwLock::new(HashMap::new())),
            page_delays: Arc::new(RwLock::new(HashMap::new())),
            videos: Arc::new(RwLock::new(HashMap::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    // =========================================================================
    // Response Configuration
    // =========================================================================

    /// Answer searches for `query` with `page`.
    pub async fn set_query_page(&self, query: &str, page: MoviePage) {
        self.query_pages
            .write()
            .await
            .insert(query.trim().to_string(), page);
    }

    /// Answer requests for page `number` with `page`.
    pub async fn set_page(&self, number: u32, page: MoviePage) {
        self.pages.write().await.insert(number, page);
    }

    /// Answer anything else with `page`.
    pub async fn set_default_page(&self, page: MoviePage) {
        *self.default_page.write().await = Some(page);
    }

    /// Hold searches for `query` for `delay` before answering.
    pub async fn set_query_delay(&self, query: &str, delay: Duration) {
        self.query_delays
            .write()
            .await
            .insert(query.trim().to_string(), delay);
    }

    /// Hold requests for page `number` for `delay` before answering.
    pub async fn set_page_delay(&self, number: u32, delay: Duration) {
        self.page_delays.write().await.insert(number, delay);
    }

    /// Set the videos attached to a movie.
    pub async fn set_videos(&self, movie_id: u32, videos: Vec<Video>) {
        self.videos.write().await.insert(movie_id, videos);
    }

    // =========================================================================
    // Request Recording
    // =========================================================================

    /// All page requests, oldest first.
    pub async fn requests(&self) -> Vec<QueryDescriptor> {
        self.requests.read().await.clone()
    }

    pub async fn last_request(&self) -> Option<QueryDescriptor> {
        self.requests.read().await.last().cloned()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Clear recorded requests.
    pub async fn clear_recorded(&self) {
        self.requests.write().await.clear();
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    async fn take_error(&self) -> Option<CatalogError> {
        self.next_error.write().await.take()
    }

    async fn response_for(&self, descriptor: &QueryDescriptor) -> MoviePage {
        if let QueryDescriptor::Search { query, .. } = descriptor {
            if let Some(page) = self.query_pages.read().await.get(query.trim()) {
                return page.clone();
            }
        }
        if let Some(page) = self.pages.read().await.get(&descriptor.page()) {
            return page.clone();
        }
        match self.default_page.read().await.as_ref() {
            Some(page) => page.clone(),
            None => MoviePage {
                page: descriptor.page(),
                ..MoviePage::default()
            },
        }
    }

    async fn delay_for(&self, descriptor: &QueryDescriptor) -> Option<Duration> {
        if let QueryDescriptor::Search { query, .. } = descriptor {
            if let Some(delay) = self.query_delays.read().await.get(query.trim()) {
                return Some(*delay);
            }
        }
        self.page_delays.read().await.get(&descriptor.page()).copied()
    }
}

#[async_trait]
impl MovieCatalog for MockMovieCatalog {
    async fn fetch_page(&self, descriptor: &QueryDescriptor) -> Result<MoviePage, CatalogError> {
        self.requests.write().await.push(descriptor.clone());

        if let Some(delay) = self.delay_for(descriptor).await {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self.response_for(descriptor).await)
    }

    async fn videos(&self, movie_id: u32) -> Result<Vec<Video>, CatalogError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self
            .videos
            .read()
            .await
            .get(&movie_id)
            .cloned()
            .unwrap_or_default())
    }
}
