//! TMDB (The Movie Database) API client.
//!
//! TMDB requires an API key for access. Every request also carries the
//! configured locale so titles and overviews come back localized.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{MoviePage, Video};
use super::{CatalogError, MovieCatalog};
use crate::metrics;
use crate::query::QueryDescriptor;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Image base URL for posters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    /// Locale sent with every request.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "es-ES".to_string()
}

impl TmdbConfig {
    /// Image base URL, falling back to the public CDN.
    pub fn image_base_url(&self) -> &str {
        self.image_base_url
            .as_deref()
            .unwrap_or(DEFAULT_IMAGE_BASE_URL)
    }

    /// Two letter language prefix of the locale ("es" for "es-ES").
    pub fn language_code(&self) -> &str {
        self.language
            .split(['-', '_'])
            .next()
            .unwrap_or(&self.language)
    }
}

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, CatalogError> {
        if config.api_key.is_empty() {
            return Err(CatalogError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder().build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
            language: config.language,
        })
    }

    /// Query parameters appended to every request.
    fn auth_params(&self) -> [(&'static str, &str); 2] {
        [
            ("api_key", self.api_key.as_str()),
            ("language", self.language.as_str()),
        ]
    }

    /// Map non-success statuses onto catalog errors.
    async fn check_status(response: Response, resource: &str) -> Result<Response, CatalogError> {
        let status = response.status();
        if status == 401 {
            return Err(CatalogError::NotConfigured(
                "Invalid TMDB API key".to_string(),
            ));
        }
        if status == 404 {
            return Err(CatalogError::NotFound(resource.to_string()));
        }
        if status == 429 {
            return Err(CatalogError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn fetch_page(&self, descriptor: &QueryDescriptor) -> Result<MoviePage, CatalogError> {
        let url = format!("{}{}", self.base_url, descriptor.path());

        debug!("TMDB {} query: {}", descriptor.mode(), descriptor.endpoint());

        let start = Instant::now();
        let result = async {
            let response = self
                .client
                .get(&url)
                .query(&descriptor.params())
                .query(&self.auth_params())
                .send()
                .await?;

            let response = Self::check_status(response, descriptor.path()).await?;

            response.json::<MoviePage>().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse movie page response: {}", e))
            })
        }
        .await;

        metrics::CATALOG_REQUEST_DURATION
            .with_label_values(&[descriptor.mode().as_str()])
            .observe(start.elapsed().as_secs_f64());

        result
    }

    async fn videos(&self, movie_id: u32) -> Result<Vec<Video>, CatalogError> {
        let url = format!("{}/movie/{}/videos", self.base_url, movie_id);

        debug!("TMDB videos: id={}", movie_id);

        let start = Instant::now();
        let result = async {
            let response = self
                .client
                .get(&url)
                .query(&self.auth_params())
                .send()
                .await?;

            let response = Self::check_status(response, &format!("Movie ID {}", movie_id)).await?;

            let videos: TmdbVideosResponse = response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse videos response: {}", e))
            })?;

            Ok::<_, CatalogError>(videos.results)
        }
        .await;

        metrics::CATALOG_REQUEST_DURATION
            .with_label_values(&["videos"])
            .observe(start.elapsed().as_secs_f64());

        result
    }
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmdbVideosResponse {
    #[serde(default)]
    results: Vec<Video>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str) -> TmdbConfig {
        TmdbConfig {
            api_key: api_key.to_string(),
            base_url: None,
            image_base_url: None,
            language: default_language(),
        }
    }

    #[test]
    fn test_new_requires_api_key() {
        let result = TmdbClient::new(config(""));
        assert!(matches!(result, Err(CatalogError::NotConfigured(_))));
    }

    #[test]
    fn test_new_uses_default_base_url() {
        let client = TmdbClient::new(config("key")).unwrap();
        assert_eq!(client.base_url, "https://api.themoviedb.org/3");
        assert_eq!(client.language, "es-ES");
    }

    #[test]
    fn test_custom_base_url_trailing_slash_trimmed() {
        let mut cfg = config("key");
        cfg.base_url = Some("http://localhost:8080/3/".to_string());
        let client = TmdbClient::new(cfg).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/3");
    }

    #[test]
    fn test_auth_params() {
        let client = TmdbClient::new(config("secret")).unwrap();
        let params = client.auth_params();
        assert_eq!(params[0], ("api_key", "secret"));
        assert_eq!(params[1], ("language", "es-ES"));
    }

    #[test]
    fn test_language_code() {
        let mut cfg = config("key");
        assert_eq!(cfg.language_code(), "es");
        cfg.language = "pt_BR".to_string();
        assert_eq!(cfg.language_code(), "pt");
        cfg.language = "en".to_string();
        assert_eq!(cfg.language_code(), "en");
    }

    #[test]
    fn test_videos_response_parse() {
        let json = r#"{
            "id": 268,
            "results": [
                {"key": "abc", "site": "YouTube", "type": "Trailer", "iso_639_1": "es", "name": "Tráiler"},
                {"key": "def", "site": "Vimeo", "type": "Teaser"}
            ]
        }"#;
        let response: TmdbVideosResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].kind, "Trailer");
        assert_eq!(response.results[0].iso_639_1.as_deref(), Some("es"));
        assert!(response.results[1].iso_639_1.is_none());
    }
}
