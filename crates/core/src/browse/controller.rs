//! Filter state, fetch reconciliation and favorites behind one handle.

use std::sync::Arc;

use chrono::Datelike;
use rand::seq::IndexedRandom;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::pagination::PageWindow;
use super::result_page::ResultPage;
use crate::catalog::{select_trailer, CatalogError, Movie, MovieCatalog, MoviePage, Video};
use crate::config::Config;
use crate::favorites::{FavoritesError, FavoritesStore};
use crate::metrics;
use crate::query::{EndpointBuilder, FilterIntent, FilterState, QueryDescriptor, YearRange};

/// Controller tunables.
#[derive(Debug, Clone)]
pub struct BrowseSettings {
    /// Minimum vote count sent with discover queries.
    pub min_vote_count: u32,
    /// Maximum number of page links in the pagination window.
    pub page_window: u32,
    /// Year range used initially and restored on reset.
    pub default_years: YearRange,
    /// ISO 639-1 code preferred when picking a trailer.
    pub trailer_language: String,
}

impl BrowseSettings {
    /// Defaults for the given calendar year.
    pub fn new(current_year: i32) -> Self {
        Self {
            min_vote_count: crate::query::DEFAULT_MIN_VOTE_COUNT,
            page_window: 5,
            default_years: YearRange::all_time(current_year),
            trailer_language: "es".to_string(),
        }
    }

    /// Settings from loaded configuration, anchored on today's year.
    pub fn from_config(config: &Config) -> Self {
        let current_year = chrono::Local::now().year();
        Self {
            min_vote_count: config.browse.min_vote_count,
            page_window: config.browse.page_window,
            default_years: YearRange::normalized(config.browse.earliest_year, current_year),
            trailer_language: config.tmdb.language_code().to_string(),
        }
    }
}

/// A fetch that has been started but not yet reconciled.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    generation: u64,
    descriptor: QueryDescriptor,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }
}

/// What happened to a fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The result page was replaced.
    Loaded { items: usize, total_results: u32 },
    /// Page 1 came back empty.
    NoResults,
    /// A later page came back empty; the filter was moved to page 1.
    StalePage,
    /// Transport or parse failure; the previous items were kept.
    Failed { message: String },
    /// A newer fetch or filter change happened first; the response was dropped.
    Superseded,
    /// Favorites view is showing, nothing was requested.
    Skipped,
    /// The intent did not change the filter.
    Unchanged,
}

impl FetchOutcome {
    fn metric_label(&self) -> Option<&'static str> {
        match self {
            FetchOutcome::Loaded { .. } => Some("loaded"),
            FetchOutcome::NoResults => Some("no_results"),
            FetchOutcome::StalePage => Some("stale_page"),
            FetchOutcome::Failed { .. } => Some("failed"),
            _ => None,
        }
    }
}

/// A movie ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayedMovie {
    pub movie: Movie,
    pub is_favorite: bool,
}

/// Everything a front end needs to draw the current view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowseSnapshot {
    pub filter: FilterState,
    pub results: ResultPage,
    pub items: Vec<DisplayedMovie>,
    pub favorites_count: usize,
    pub pagination: Option<PageWindow>,
}

impl BrowseSnapshot {
    /// Message to show instead of an empty grid, if any.
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.items.is_empty() {
            return None;
        }
        if self.filter.viewing_favorites() {
            Some("You have no favorite movies yet")
        } else if self.results.error_state() {
            Some("No movies found for these filters")
        } else {
            None
        }
    }
}

struct ControllerState {
    filter: FilterState,
    results: ResultPage,
    generation: u64,
}

/// Drives a single catalog view.
///
/// All methods take `&self`; the controller can be shared behind an `Arc`
/// and driven from concurrent tasks. Only the most recently started fetch
/// may write its response into the result page.
pub struct BrowseController {
    catalog: Arc<dyn MovieCatalog>,
    favorites: RwLock<FavoritesStore>,
    state: RwLock<ControllerState>,
    builder: EndpointBuilder,
    settings: BrowseSettings,
}

impl BrowseController {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        favorites: FavoritesStore,
        settings: BrowseSettings,
    ) -> Self {
        Self {
            catalog,
            favorites: RwLock::new(favorites),
            state: RwLock::new(ControllerState {
                filter: FilterState::new(settings.default_years),
                results: ResultPage::initial(),
                generation: 0,
            }),
            builder: EndpointBuilder::new(settings.min_vote_count),
            settings,
        }
    }

    pub fn settings(&self) -> &BrowseSettings {
        &self.settings
    }

    pub async fn filter(&self) -> FilterState {
        self.state.read().await.filter.clone()
    }

    pub async fn results(&self) -> ResultPage {
        self.state.read().await.results.clone()
    }

    /// Current generation. Advances on every fetch start and filter change.
    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }

    // =========================================================================
    // Filter transitions
    // =========================================================================

    /// Apply an intent to the filter state without fetching.
    ///
    /// Returns whether a fetch is needed. A reset always counts as a change
    /// and clears the error state in the same transition.
    pub async fn apply(&self, intent: &FilterIntent) -> bool {
        let mut state = self.state.write().await;
        let next = state
            .filter
            .apply(intent, state.results.total_pages(), self.settings.default_years);
        let is_reset = matches!(intent, FilterIntent::ResetFilters);

        if next == state.filter && !is_reset {
            debug!("Intent {:?} left the filter unchanged", intent);
            return false;
        }

        state.filter = next;
        state.generation += 1;
        if is_reset {
            state.results = state.results.without_error();
        }
        true
    }

    /// Apply an intent and fetch if the filter changed.
    pub async fn dispatch(&self, intent: FilterIntent) -> FetchOutcome {
        if !self.apply(&intent).await {
            return FetchOutcome::Unchanged;
        }
        self.on_filters_changed().await
    }

    /// Fetch for the current filter unless the favorites view is showing.
    pub async fn on_filters_changed(&self) -> FetchOutcome {
        if self.state.read().await.filter.viewing_favorites() {
            debug!("Favorites view active, not fetching");
            return FetchOutcome::Skipped;
        }
        self.refresh().await
    }

    /// Jump to `page`, clamped to `[1, total_pages]`.
    pub async fn go_to_page(&self, page: i64) -> FetchOutcome {
        self.dispatch(FilterIntent::GoToPage(page)).await
    }

    /// Restore the default filter, clear the error state and fetch.
    pub async fn reset_filters(&self) -> FetchOutcome {
        self.dispatch(FilterIntent::ResetFilters).await
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    /// Fetch the current filter's page, retrying once from page 1 when the
    /// requested page turns out to be past the end.
    pub async fn refresh(&self) -> FetchOutcome {
        let ticket = self.begin_fetch().await;
        let response = self.catalog.fetch_page(ticket.descriptor()).await;

        match self.complete_fetch(&ticket, response).await {
            FetchOutcome::StalePage => {
                info!(
                    "Page {} returned nothing, reloading from page 1",
                    ticket.descriptor().page()
                );
                let retry = self.begin_fetch().await;
                let response = self.catalog.fetch_page(retry.descriptor()).await;
                self.complete_fetch(&retry, response).await
            }
            outcome => outcome,
        }
    }

    /// Claim a new generation and build the descriptor for the current
    /// filter. Any fetch started earlier becomes stale.
    pub async fn begin_fetch(&self) -> FetchTicket {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.results = state.results.loading();

        let descriptor = self.builder.build(&state.filter);
        debug!(
            generation = state.generation,
            endpoint = %descriptor.endpoint(),
            "Starting fetch"
        );

        FetchTicket {
            generation: state.generation,
            descriptor,
        }
    }

    /// Reconcile a catalog response with the state.
    ///
    /// Responses for a superseded ticket are dropped without touching state.
    pub async fn complete_fetch(
        &self,
        ticket: &FetchTicket,
        response: Result<MoviePage, CatalogError>,
    ) -> FetchOutcome {
        let mut state = self.state.write().await;

        if ticket.generation != state.generation {
            metrics::SUPERSEDED_RESPONSES.inc();
            debug!(
                generation = ticket.generation,
                latest = state.generation,
                "Discarding superseded response"
            );
            return FetchOutcome::Superseded;
        }

        let page = ticket.descriptor.page();
        let outcome = match response {
            Ok(response) if !response.results.is_empty() => {
                let outcome = FetchOutcome::Loaded {
                    items: response.results.len(),
                    total_results: response.total_results,
                };
                state.results = ResultPage::loaded(response, page);
                outcome
            }
            Ok(_) if page > 1 => {
                state.filter = state.filter.with_page(1);
                FetchOutcome::StalePage
            }
            Ok(_) => {
                state.results = ResultPage::no_results();
                FetchOutcome::NoResults
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", ticket.descriptor.endpoint(), e);
                let message = e.to_string();
                state.results = state.results.failed(message.clone());
                FetchOutcome::Failed { message }
            }
        };

        if let Some(label) = outcome.metric_label() {
            metrics::FETCHES_TOTAL
                .with_label_values(&[ticket.descriptor.mode().as_str(), label])
                .inc();
        }

        outcome
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    /// Flip the movie's favorite status; returns whether it is now a favorite.
    pub async fn toggle_favorite(&self, movie: &Movie) -> Result<bool, FavoritesError> {
        self.favorites.write().await.toggle(movie)
    }

    /// Toggle a movie by id, looking it up in the current results and then
    /// in the favorites. `None` if the id is not on screen or saved.
    pub async fn toggle_favorite_by_id(&self, id: u32) -> Result<Option<bool>, FavoritesError> {
        match self.find_movie(id).await {
            Some(movie) => self.toggle_favorite(&movie).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn is_favorite(&self, id: u32) -> bool {
        self.favorites.read().await.is_favorite(id)
    }

    pub async fn favorites(&self) -> Vec<Movie> {
        self.favorites.read().await.all().to_vec()
    }

    /// Find a movie among the current results or the favorites.
    pub async fn find_movie(&self, id: u32) -> Option<Movie> {
        let from_results = self
            .state
            .read()
            .await
            .results
            .items()
            .iter()
            .find(|m| m.id == id)
            .cloned();

        match from_results {
            Some(movie) => Some(movie),
            None => self.favorites.read().await.get(id).cloned(),
        }
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Movies on screen: the favorites in favorites view, otherwise the
    /// current result page.
    pub async fn displayed_items(&self) -> Vec<DisplayedMovie> {
        let state = self.state.read().await;
        let favorites = self.favorites.read().await;
        Self::displayed(&state, &favorites)
    }

    /// Pagination window, hidden in favorites view, with a single page, or
    /// while in error state.
    pub async fn pagination(&self) -> Option<PageWindow> {
        let state = self.state.read().await;
        self.window(&state)
    }

    pub async fn snapshot(&self) -> BrowseSnapshot {
        let state = self.state.read().await;
        let favorites = self.favorites.read().await;

        BrowseSnapshot {
            filter: state.filter.clone(),
            results: state.results.clone(),
            items: Self::displayed(&state, &favorites),
            favorites_count: favorites.len(),
            pagination: self.window(&state),
        }
    }

    /// A random movie among those on screen.
    pub async fn random_pick(&self) -> Option<Movie> {
        let items = self.displayed_items().await;
        items
            .choose(&mut rand::rng())
            .map(|item| item.movie.clone())
    }

    /// Best trailer for the movie, or `None` when there is none or the
    /// lookup failed.
    pub async fn trailer(&self, movie_id: u32) -> Option<Video> {
        match self.catalog.videos(movie_id).await {
            Ok(videos) => {
                let trailer = select_trailer(&videos, &self.settings.trailer_language).cloned();
                if trailer.is_none() {
                    debug!("Movie {} has no YouTube videos", movie_id);
                }
                trailer
            }
            Err(e) => {
                warn!("Failed to look up trailer for movie {}: {}", movie_id, e);
                None
            }
        }
    }

    fn displayed(state: &ControllerState, favorites: &FavoritesStore) -> Vec<DisplayedMovie> {
        let movies = if state.filter.viewing_favorites() {
            favorites.all()
        } else {
            state.results.items()
        };

        movies
            .iter()
            .map(|movie| DisplayedMovie {
                is_favorite: favorites.is_favorite(movie.id),
                movie: movie.clone(),
            })
            .collect()
    }

    fn window(&self, state: &ControllerState) -> Option<PageWindow> {
        let total_pages = state.results.total_pages();
        if state.filter.viewing_favorites() || total_pages <= 1 || state.results.error_state() {
            return None;
        }
        Some(PageWindow::compute(
            state.filter.current_page(),
            total_pages,
            self.settings.page_window,
        ))
    }
}
