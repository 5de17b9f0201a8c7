//! Movie catalog integration.
//!
//! The `MovieCatalog` trait is the seam between the browse controller and
//! the remote metadata API. `TmdbClient` is the production implementation;
//! `testing::MockMovieCatalog` stands in for it in tests.

mod tmdb;
mod trailer;
mod types;

pub use tmdb::{TmdbClient, TmdbConfig};
pub use trailer::{select_trailer, youtube_embed_url};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::query::QueryDescriptor;

/// Errors that can occur when talking to the movie catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Remote source of movie listings and trailers.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Run a search or discover query and return one page of results.
    async fn fetch_page(&self, descriptor: &QueryDescriptor) -> Result<MoviePage, CatalogError>;

    /// List the videos (trailers, teasers, clips) attached to a movie.
    async fn videos(&self, movie_id: u32) -> Result<Vec<Video>, CatalogError>;
}
