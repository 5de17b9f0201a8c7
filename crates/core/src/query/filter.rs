//! Filter state and its transitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{EARLIEST_YEAR, MAX_RATING};

/// Errors raised when building filter values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid year range: start {start} is after end {end}")]
    InvalidYearRange { start: i32, end: i32 },
}

/// Inclusive range of release years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: i32, end: i32) -> Result<Self, FilterError> {
        if start > end {
            return Err(FilterError::InvalidYearRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Create a range, raising `end` to `start` when it falls below it.
    pub fn normalized(start: i32, end: i32) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// The default range: earliest browseable year through `current_year`.
    pub fn all_time(current_year: i32) -> Self {
        Self::normalized(EARLIEST_YEAR, current_year)
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

/// A user intent that changes what is being browsed.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterIntent {
    /// Free-text search; an empty or blank term switches back to discover.
    Search(String),
    SelectGenre(Option<u32>),
    SetMinRating(f32),
    SetYearRange { start: i32, end: i32 },
    /// Jump to a page; clamped to the known page count.
    GoToPage(i64),
    NextPage,
    PreviousPage,
    ToggleFavoritesView,
    ResetFilters,
}

/// Clamp a requested page number into `[1, total_pages]`.
///
/// With no known pages the result is page 1.
pub fn clamp_page(requested: i64, total_pages: u32) -> u32 {
    requested.min(total_pages as i64).max(1) as u32
}

/// Snapshot of everything the user has selected.
///
/// Every transition returns a new value. Changing any field other than the
/// page puts the page back to 1; setting a field to the value it already
/// has is not a change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterState {
    query: String,
    genre_id: Option<u32>,
    min_rating: f32,
    year_range: YearRange,
    current_page: u32,
    viewing_favorites: bool,
}

impl FilterState {
    /// Default filters: no query, no genre, any rating, all years, page 1.
    pub fn new(default_years: YearRange) -> Self {
        Self {
            query: String::new(),
            genre_id: None,
            min_rating: 0.0,
            year_range: default_years,
            current_page: 1,
            viewing_favorites: false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn genre_id(&self) -> Option<u32> {
        self.genre_id
    }

    pub fn min_rating(&self) -> f32 {
        self.min_rating
    }

    pub fn year_range(&self) -> YearRange {
        self.year_range
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn viewing_favorites(&self) -> bool {
        self.viewing_favorites
    }

    /// The trimmed search term, if one is active.
    pub fn search_term(&self) -> Option<&str> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Search mode is active exactly when the trimmed query is non-empty.
    pub fn is_search_mode(&self) -> bool {
        self.search_term().is_some()
    }

    pub fn with_query(&self, query: impl Into<String>) -> Self {
        let query = query.into();
        if query == self.query {
            return self.clone();
        }
        Self {
            query,
            current_page: 1,
            ..self.clone()
        }
    }

    pub fn with_genre(&self, genre_id: Option<u32>) -> Self {
        if genre_id == self.genre_id {
            return self.clone();
        }
        Self {
            genre_id,
            current_page: 1,
            ..self.clone()
        }
    }

    /// Set the minimum rating, clamped to `[0, 10]`. NaN counts as 0.
    pub fn with_min_rating(&self, min_rating: f32) -> Self {
        let min_rating = if min_rating.is_nan() {
            0.0
        } else {
            min_rating.clamp(0.0, MAX_RATING)
        };
        if min_rating == self.min_rating {
            return self.clone();
        }
        Self {
            min_rating,
            current_page: 1,
            ..self.clone()
        }
    }

    pub fn with_year_range(&self, year_range: YearRange) -> Self {
        if year_range == self.year_range {
            return self.clone();
        }
        Self {
            year_range,
            current_page: 1,
            ..self.clone()
        }
    }

    pub fn with_viewing_favorites(&self, viewing_favorites: bool) -> Self {
        if viewing_favorites == self.viewing_favorites {
            return self.clone();
        }
        Self {
            viewing_favorites,
            current_page: 1,
            ..self.clone()
        }
    }

    /// Move to `page` (at least 1). The only transition that keeps the
    /// other fields and does not reset the page.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            current_page: page.max(1),
            ..self.clone()
        }
    }

    /// Apply an intent and return the resulting state.
    ///
    /// `total_pages` bounds page navigation; `default_years` is the range
    /// restored by a reset. Search, genre, rating and year intents also
    /// leave the favorites view.
    pub fn apply(&self, intent: &FilterIntent, total_pages: u32, default_years: YearRange) -> Self {
        match intent {
            FilterIntent::Search(query) => self
                .with_query(query.as_str())
                .with_viewing_favorites(false),
            FilterIntent::SelectGenre(genre_id) => {
                self.with_genre(*genre_id).with_viewing_favorites(false)
            }
            FilterIntent::SetMinRating(rating) => {
                self.with_min_rating(*rating).with_viewing_favorites(false)
            }
            FilterIntent::SetYearRange { start, end } => self
                .with_year_range(YearRange::normalized(*start, *end))
                .with_viewing_favorites(false),
            FilterIntent::GoToPage(page) => self.with_page(clamp_page(*page, total_pages)),
            FilterIntent::NextPage => {
                self.with_page(clamp_page(self.current_page as i64 + 1, total_pages))
            }
            FilterIntent::PreviousPage => {
                self.with_page(clamp_page(self.current_page as i64 - 1, total_pages))
            }
            FilterIntent::ToggleFavoritesView => {
                self.with_viewing_favorites(!self.viewing_favorites)
            }
            FilterIntent::ResetFilters => Self::new(default_years),
        }
    }
}
