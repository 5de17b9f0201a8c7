use chrono::Datelike;

use super::{types::Config, ConfigError};

/// Largest accepted `browse.page_window`.
pub const MAX_PAGE_WINDOW: u32 = 50;

/// Validate configuration
/// Currently validates:
/// - TMDB API key is present
/// - Favorites record key is not empty
/// - Page window is between 1 and `MAX_PAGE_WINDOW`
/// - Earliest browseable year is not in the future
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.tmdb.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "tmdb.api_key cannot be empty".to_string(),
        ));
    }

    if config.storage.favorites_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.favorites_key cannot be empty".to_string(),
        ));
    }

    if config.browse.page_window == 0 {
        return Err(ConfigError::ValidationError(
            "browse.page_window cannot be 0".to_string(),
        ));
    }

    if config.browse.page_window > MAX_PAGE_WINDOW {
        return Err(ConfigError::ValidationError(format!(
            "browse.page_window ({}) cannot exceed {}",
            config.browse.page_window, MAX_PAGE_WINDOW
        )));
    }

    let current_year = chrono::Local::now().year();
    if config.browse.earliest_year > current_year {
        return Err(ConfigError::ValidationError(format!(
            "browse.earliest_year ({}) is after the current year ({})",
            config.browse.earliest_year, current_year
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    fn base_config() -> Config {
        load_config_from_str(
            r#"
[tmdb]
api_key = "key"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&base_config()).is_ok());
    }

    #[test]
    fn test_validate_empty_api_key_fails() {
        let mut config = base_config();
        config.tmdb.api_key = "   ".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_empty_favorites_key_fails() {
        let mut config = base_config();
        config.storage.favorites_key = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_page_window_zero_fails() {
        let mut config = base_config();
        config.browse.page_window = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_page_window_upper_bound() {
        let mut config = base_config();
        config.browse.page_window = MAX_PAGE_WINDOW;
        assert!(validate_config(&config).is_ok());

        config.browse.page_window = u32::MAX;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("page_window"));
    }

    #[test]
    fn test_validate_future_earliest_year_fails() {
        let mut config = base_config();
        config.browse.earliest_year = 9999;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("earliest_year"));
    }
}
