//! Endpoint builder: filter snapshot to remote query.

use std::fmt;

use serde::Serialize;

use super::filter::FilterState;
use super::DEFAULT_MIN_VOTE_COUNT;

/// Sort order used for discover queries.
pub const SORT_BY_POPULARITY: &str = "popularity.desc";

/// Which remote endpoint a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    Search,
    Discover,
}

impl QueryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryMode::Search => "search",
            QueryMode::Discover => "discover",
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved remote query.
///
/// Carries only the filter-derived parameters; credentials and locale are
/// appended by the catalog client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum QueryDescriptor {
    Search {
        query: String,
        min_rating: f32,
        page: u32,
    },
    Discover {
        min_rating: f32,
        min_vote_count: u32,
        page: u32,
        genre_id: Option<u32>,
        /// First day of the start year (YYYY-01-01).
        release_date_from: String,
        /// Last day of the end year (YYYY-12-31).
        release_date_to: String,
    },
}

impl QueryDescriptor {
    pub fn mode(&self) -> QueryMode {
        match self {
            QueryDescriptor::Search { .. } => QueryMode::Search,
            QueryDescriptor::Discover { .. } => QueryMode::Discover,
        }
    }

    pub fn page(&self) -> u32 {
        match self {
            QueryDescriptor::Search { page, .. } | QueryDescriptor::Discover { page, .. } => *page,
        }
    }

    /// Endpoint path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            QueryDescriptor::Search { .. } => "/search/movie",
            QueryDescriptor::Discover { .. } => "/discover/movie",
        }
    }

    /// Query-string parameters in wire order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            QueryDescriptor::Search {
                query,
                min_rating,
                page,
            } => vec![
                ("query", query.clone()),
                ("vote_average.gte", min_rating.to_string()),
                ("page", page.to_string()),
            ],
            QueryDescriptor::Discover {
                min_rating,
                min_vote_count,
                page,
                genre_id,
                release_date_from,
                release_date_to,
            } => {
                let mut params = vec![
                    ("sort_by", SORT_BY_POPULARITY.to_string()),
                    ("vote_average.gte", min_rating.to_string()),
                    ("vote_count.gte", min_vote_count.to_string()),
                    ("page", page.to_string()),
                ];
                if let Some(genre) = genre_id {
                    params.push(("with_genres", genre.to_string()));
                }
                params.push(("primary_release_date.gte", release_date_from.clone()));
                params.push(("primary_release_date.lte", release_date_to.clone()));
                params
            }
        }
    }

    /// Path plus URL-encoded query string, e.g.
    /// `/search/movie?query=batman&vote_average.gte=7&page=1`.
    pub fn endpoint(&self) -> String {
        let query = self
            .params()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(&v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path(), query)
    }
}

/// Builds query descriptors from filter snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointBuilder {
    min_vote_count: u32,
}

impl Default for EndpointBuilder {
    fn default() -> Self {
        Self {
            min_vote_count: DEFAULT_MIN_VOTE_COUNT,
        }
    }
}

impl EndpointBuilder {
    pub fn new(min_vote_count: u32) -> Self {
        Self { min_vote_count }
    }

    /// Map a filter snapshot to its remote query. Pure; the favorites view
    /// flag is ignored.
    pub fn build(&self, filter: &FilterState) -> QueryDescriptor {
        let page = filter.current_page();
        let min_rating = filter.min_rating();

        if let Some(term) = filter.search_term() {
            return QueryDescriptor::Search {
                query: term.to_string(),
                min_rating,
                page,
            };
        }

        let years = filter.year_range();
        QueryDescriptor::Discover {
            min_rating,
            min_vote_count: self.min_vote_count,
            page,
            genre_id: filter.genre_id(),
            release_date_from: format!("{:04}-01-01", years.start()),
            release_date_to: format!("{:04}-12-31", years.end()),
        }
    }
}

/// Build a descriptor with the default minimum vote count.
pub fn build(filter: &FilterState) -> QueryDescriptor {
    EndpointBuilder::default().build(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::YearRange;

    fn filter() -> FilterState {
        FilterState::new(YearRange::all_time(2024))
    }

    #[test]
    fn test_search_descriptor() {
        let f = filter().with_query("batman").with_min_rating(7.0);
        let descriptor = build(&f);

        assert_eq!(
            descriptor,
            QueryDescriptor::Search {
                query: "batman".to_string(),
                min_rating: 7.0,
                page: 1,
            }
        );
        assert_eq!(descriptor.mode(), QueryMode::Search);
        assert_eq!(
            descriptor.params(),
            vec![
                ("query", "batman".to_string()),
                ("vote_average.gte", "7".to_string()),
                ("page", "1".to_string()),
            ]
        );
        assert_eq!(
            descriptor.endpoint(),
            "/search/movie?query=batman&vote_average.gte=7&page=1"
        );
    }

    #[test]
    fn test_search_descriptor_has_no_discover_params() {
        let f = filter()
            .with_genre(Some(28))
            .with_year_range(YearRange::new(1980, 1989).unwrap())
            .with_query("alien");
        let keys: Vec<_> = build(&f).params().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["query", "vote_average.gte", "page"]);
    }

    #[test]
    fn test_search_term_is_trimmed_and_encoded() {
        let f = filter().with_query("  star wars ");
        let descriptor = build(&f);
        assert_eq!(
            descriptor.endpoint(),
            "/search/movie?query=star%20wars&vote_average.gte=0&page=1"
        );
    }

    #[test]
    fn test_discover_descriptor() {
        let f = filter()
            .with_genre(Some(28))
            .with_year_range(YearRange::new(1980, 1989).unwrap())
            .with_page(2);
        let descriptor = build(&f);

        assert_eq!(descriptor.mode(), QueryMode::Discover);
        assert_eq!(descriptor.page(), 2);
        assert_eq!(
            descriptor.endpoint(),
            "/discover/movie?sort_by=popularity.desc&vote_average.gte=0&vote_count.gte=50\
             &page=2&with_genres=28&primary_release_date.gte=1980-01-01\
             &primary_release_date.lte=1989-12-31"
        );
    }

    #[test]
    fn test_discover_without_genre_omits_param() {
        let descriptor = build(&filter());
        assert!(descriptor.params().iter().all(|(k, _)| *k != "with_genres"));
        assert_eq!(descriptor.path(), "/discover/movie");
    }

    #[test]
    fn test_fractional_rating_formatting() {
        let f = filter().with_min_rating(6.5);
        let params = build(&f).params();
        assert!(params.contains(&("vote_average.gte", "6.5".to_string())));
    }

    #[test]
    fn test_custom_min_vote_count() {
        let descriptor = EndpointBuilder::new(200).build(&filter());
        assert!(descriptor
            .params()
            .contains(&("vote_count.gte", "200".to_string())));
    }

    #[test]
    fn test_build_is_deterministic() {
        let f = filter().with_genre(Some(12)).with_min_rating(5.0).with_page(3);
        let first = build(&f);
        for _ in 0..10 {
            assert_eq!(build(&f), first);
        }
    }

    #[test]
    fn test_favorites_flag_does_not_change_descriptor() {
        let f = filter().with_genre(Some(16));
        let viewing = f.with_viewing_favorites(true);
        // toggling the view resets the page, which is already 1 here
        assert_eq!(build(&f), build(&viewing));
    }
}
