use serde::Serialize;

use crate::catalog::{Movie, MoviePage};

/// Where the current result page stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultStatus {
    /// A fetch is in flight.
    Loading,
    /// Items from the latest successful fetch.
    Ready,
    /// The query matched nothing on page 1.
    NoResults,
    /// The latest fetch failed in transport or parsing.
    Failed { message: String },
}

/// The page of movies currently on display for the catalog view.
///
/// Replaced wholesale after every fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage {
    items: Vec<Movie>,
    total_pages: u32,
    total_results: u32,
    current_page: u32,
    status: ResultStatus,
}

impl Default for ResultPage {
    fn default() -> Self {
        Self::initial()
    }
}

impl ResultPage {
    /// Nothing fetched yet.
    pub fn initial() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
            total_results: 0,
            current_page: 1,
            status: ResultStatus::Loading,
        }
    }

    /// A non-empty response for `page`.
    pub(crate) fn loaded(response: MoviePage, page: u32) -> Self {
        Self {
            total_pages: response.total_pages.max(1),
            total_results: response.total_results,
            items: response.results,
            current_page: page,
            status: ResultStatus::Ready,
        }
    }

    /// An empty response on page 1.
    pub(crate) fn no_results() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
            total_results: 0,
            current_page: 1,
            status: ResultStatus::NoResults,
        }
    }

    /// Same items, marked as loading with any error cleared.
    pub(crate) fn loading(&self) -> Self {
        Self {
            status: ResultStatus::Loading,
            ..self.clone()
        }
    }

    /// Same items, flagged with a fetch failure.
    pub(crate) fn failed(&self, message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Failed {
                message: message.into(),
            },
            ..self.clone()
        }
    }

    /// Same items with any error flag cleared.
    pub(crate) fn without_error(&self) -> Self {
        if self.error_state() {
            self.loading()
        } else {
            self.clone()
        }
    }

    pub fn items(&self) -> &[Movie] {
        &self.items
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_results(&self) -> u32 {
        self.total_results
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn status(&self) -> &ResultStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == ResultStatus::Loading
    }

    /// True for both "no results" and failed fetches.
    pub fn error_state(&self) -> bool {
        matches!(
            self.status,
            ResultStatus::NoResults | ResultStatus::Failed { .. }
        )
    }
}
