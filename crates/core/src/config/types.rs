use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::TmdbConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
}

/// Favorites persistence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
    /// Name of the record holding the serialized favorites set.
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            favorites_key: default_favorites_key(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("marquee.db")
}

fn default_favorites_key() -> String {
    "movieFavorites".to_string()
}

/// Browsing behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrowseConfig {
    /// Minimum vote count applied to discover queries.
    #[serde(default = "default_min_vote_count")]
    pub min_vote_count: u32,
    /// Lower bound of the default year range.
    #[serde(default = "default_earliest_year")]
    pub earliest_year: i32,
    /// Maximum number of page links shown at once.
    #[serde(default = "default_page_window")]
    pub page_window: u32,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            min_vote_count: default_min_vote_count(),
            earliest_year: default_earliest_year(),
            page_window: default_page_window(),
        }
    }
}

fn default_min_vote_count() -> u32 {
    crate::query::DEFAULT_MIN_VOTE_COUNT
}

fn default_earliest_year() -> i32 {
    crate::query::EARLIEST_YEAR
}

fn default_page_window() -> u32 {
    5
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub tmdb: SanitizedTmdbConfig,
    pub storage: StorageConfig,
    pub browse: BrowseConfig,
}

/// Sanitized TMDB config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTmdbConfig {
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub language: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            tmdb: SanitizedTmdbConfig {
                api_key_configured: !config.tmdb.api_key.is_empty(),
                base_url: config.tmdb.base_url.clone(),
                language: config.tmdb.language.clone(),
            },
            storage: config.storage.clone(),
            browse: config.browse.clone(),
        }
    }
}
