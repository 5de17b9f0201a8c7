//! Types for movie catalog responses.

use serde::{Deserialize, Serialize};

/// Number of overview characters shown before the text is cut.
pub const OVERVIEW_EXCERPT_CHARS: usize = 100;

/// Poster size requested from the image CDN.
pub const POSTER_SIZE: &str = "w500";

/// A genre reference attached to a movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreRef {
    pub id: u32,
    pub name: String,
}

/// A movie as returned by the catalog.
///
/// Values are never modified after they arrive; the favorites store keeps
/// them verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Catalog movie ID.
    pub id: u32,
    /// Localized title.
    pub title: String,
    /// Synopsis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Poster path (relative to the image base URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    /// Release date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Average vote (0-10).
    #[serde(default)]
    pub vote_average: f32,
    /// Genres, only present on detailed records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<GenreRef>>,
}

impl Movie {
    /// Get the release year from the release date.
    pub fn year(&self) -> Option<i32> {
        self.release_date
            .as_ref()
            .and_then(|d| d.split('-').next())
            .and_then(|y| y.parse().ok())
    }

    /// Whether the overview is longer than the card excerpt.
    pub fn has_long_overview(&self) -> bool {
        self.overview
            .as_ref()
            .is_some_and(|o| o.chars().count() > OVERVIEW_EXCERPT_CHARS)
    }

    /// Overview cut to `OVERVIEW_EXCERPT_CHARS` characters, with an ellipsis
    /// when text was dropped.
    pub fn overview_excerpt(&self) -> Option<String> {
        let overview = self.overview.as_deref()?;
        if overview.is_empty() {
            return None;
        }
        if !self.has_long_overview() {
            return Some(overview.to_string());
        }
        let cut: String = overview.chars().take(OVERVIEW_EXCERPT_CHARS).collect();
        Some(format!("{}...", cut))
    }

    /// Full poster URL for the given image base URL.
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|p| format!("{}/{}{}", image_base_url.trim_end_matches('/'), POSTER_SIZE, p))
    }

    /// Comma separated genre names, if the record carries any.
    pub fn genre_names(&self) -> Option<String> {
        self.genres
            .as_ref()
            .filter(|g| !g.is_empty())
            .map(|g| g.iter().map(|g| g.name.as_str()).collect::<Vec<_>>().join(", "))
    }
}

/// One page of a search or discover response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MoviePage {
    /// Page number echoed by the server.
    #[serde(default)]
    pub page: u32,
    /// Movies on this page, in server order.
    #[serde(default)]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

/// A video attached to a movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    /// Site-specific video key (YouTube video id).
    pub key: String,
    /// Hosting site, e.g. "YouTube".
    pub site: String,
    /// Video type, e.g. "Trailer", "Teaser", "Clip".
    #[serde(rename = "type")]
    pub kind: String,
    /// ISO 639-1 language code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_639_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie_with_overview(overview: Option<&str>) -> Movie {
        Movie {
            id: 1,
            title: "Test".to_string(),
            overview: overview.map(String::from),
            poster_path: Some("/abc.jpg".to_string()),
            release_date: Some("1999-03-31".to_string()),
            vote_average: 8.1,
            genres: None,
        }
    }

    #[test]
    fn test_movie_year() {
        assert_eq!(movie_with_overview(None).year(), Some(1999));
    }

    #[test]
    fn test_movie_year_empty_date() {
        let mut movie = movie_with_overview(None);
        movie.release_date = Some(String::new());
        assert_eq!(movie.year(), None);
    }

    #[test]
    fn test_short_overview_kept_whole() {
        let movie = movie_with_overview(Some("A short plot."));
        assert!(!movie.has_long_overview());
        assert_eq!(movie.overview_excerpt().as_deref(), Some("A short plot."));
    }

    #[test]
    fn test_long_overview_truncated() {
        let text = "é".repeat(150);
        let movie = movie_with_overview(Some(&text));
        assert!(movie.has_long_overview());

        let excerpt = movie.overview_excerpt().unwrap();
        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt.chars().count(), OVERVIEW_EXCERPT_CHARS + 3);
    }

    #[test]
    fn test_poster_url() {
        let movie = movie_with_overview(None);
        assert_eq!(
            movie.poster_url("https://image.tmdb.org/t/p/").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
    }

    #[test]
    fn test_page_missing_results_is_empty() {
        let page: MoviePage = serde_json::from_str(r#"{"page": 4}"#).unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_results, 0);
    }

    #[test]
    fn test_movie_ignores_unknown_fields() {
        let json = r#"{
            "id": 268,
            "title": "Batman",
            "overview": "The Dark Knight of Gotham City...",
            "release_date": "1989-06-23",
            "vote_average": 7.2,
            "genre_ids": [14, 28],
            "adult": false,
            "popularity": 41.3
        }"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 268);
        assert_eq!(movie.year(), Some(1989));
        assert!(movie.poster_path.is_none());
        assert!(movie.genres.is_none());
    }

    #[test]
    fn test_genre_names() {
        let mut movie = movie_with_overview(None);
        movie.genres = Some(vec![
            GenreRef {
                id: 28,
                name: "Action".to_string(),
            },
            GenreRef {
                id: 80,
                name: "Crime".to_string(),
            },
        ]);
        assert_eq!(movie.genre_names().as_deref(), Some("Action, Crime"));
    }
}
