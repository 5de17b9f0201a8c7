//! Browse controller integration tests.
//!
//! These tests drive the controller through intents the way a front end
//! does, against a mock catalog and a file-backed favorites store.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use marquee_core::{
    testing::{fixtures, MockMovieCatalog},
    BrowseController, BrowseSettings, FavoritesStore, FetchOutcome, FilterIntent, QueryDescriptor,
    QueryMode, RecordStore, ResultStatus, SqliteRecordStore, YearRange,
};

const KEY: &str = "movieFavorites";

/// Test helper owning the catalog mock and the database directory.
struct TestHarness {
    catalog: Arc<MockMovieCatalog>,
    store: Arc<SqliteRecordStore>,
    _temp_dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("marquee.db");
        let store =
            Arc::new(SqliteRecordStore::new(&db_path).expect("Failed to open record store"));

        Self {
            catalog: Arc::new(MockMovieCatalog::new()),
            store,
            _temp_dir: temp_dir,
        }
    }

    /// A controller as the binary would build it at startup.
    fn controller(&self) -> BrowseController {
        let favorites = FavoritesStore::load(self.store.clone(), KEY);
        BrowseController::new(self.catalog.clone(), favorites, BrowseSettings::new(2024))
    }
}

#[tokio::test]
async fn test_discover_then_search_then_reset() {
    let harness = TestHarness::new();
    harness
        .catalog
        .set_default_page(fixtures::movie_page(1, 20, 10, 200))
        .await;
    harness
        .catalog
        .set_query_page("batman", fixtures::movie_page(1, 8, 1, 8))
        .await;
    let controller = harness.controller();

    controller.on_filters_changed().await;
    controller
        .dispatch(FilterIntent::SelectGenre(Some(878)))
        .await;
    controller
        .dispatch(FilterIntent::Search("  batman ".to_string()))
        .await;

    let requests = harness.catalog.requests().await;
    assert_eq!(requests.len(), 3);
    assert_eq!(
        requests[1].endpoint(),
        "/discover/movie?sort_by=popularity.desc&vote_average.gte=0&vote_count.gte=50&page=1&with_genres=878&primary_release_date.gte=1900-01-01&primary_release_date.lte=2024-12-31"
    );
    assert_eq!(
        requests[2],
        QueryDescriptor::Search {
            query: "batman".to_string(),
            min_rating: 0.0,
            page: 1,
        }
    );

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.items.len(), 8);
    assert!(snapshot.pagination.is_none());

    controller.reset_filters().await;
    let last = harness.catalog.last_request().await.unwrap();
    assert_eq!(last.mode(), QueryMode::Discover);
    assert_eq!(controller.filter().await.genre_id(), None);
    assert_eq!(controller.filter().await.query(), "");
}

#[tokio::test]
async fn test_late_response_does_not_overwrite_newer_one() {
    let harness = TestHarness::new();
    harness
        .catalog
        .set_query_page("slow", fixtures::movie_page(1, 3, 1, 3))
        .await;
    harness
        .catalog
        .set_query_page("fast", fixtures::movie_page(2, 5, 2, 10))
        .await;
    harness
        .catalog
        .set_query_delay("slow", Duration::from_millis(200))
        .await;
    let controller = harness.controller();

    let (slow, fast) = tokio::join!(
        controller.dispatch(FilterIntent::Search("slow".to_string())),
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            controller
                .dispatch(FilterIntent::Search("fast".to_string()))
                .await
        }
    );

    assert_eq!(slow, FetchOutcome::Superseded);
    assert_eq!(
        fast,
        FetchOutcome::Loaded {
            items: 5,
            total_results: 10
        }
    );

    let results = controller.results().await;
    assert_eq!(results.items().len(), 5);
    assert_eq!(results.total_pages(), 2);
    assert_eq!(controller.filter().await.query(), "fast");
}

#[tokio::test]
async fn test_late_page_one_does_not_overwrite_page_two() {
    let harness = TestHarness::new();
    harness
        .catalog
        .set_page(1, fixtures::movie_page(1, 20, 5, 100))
        .await;
    harness
        .catalog
        .set_page(2, fixtures::movie_page(2, 20, 5, 100))
        .await;
    let controller = harness.controller();
    controller.on_filters_changed().await;

    harness
        .catalog
        .set_page_delay(1, Duration::from_millis(200))
        .await;

    let (first, second) = tokio::join!(controller.refresh(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.go_to_page(2).await
    });

    assert_eq!(first, FetchOutcome::Superseded);
    assert!(matches!(second, FetchOutcome::Loaded { .. }));

    let results = controller.results().await;
    assert_eq!(results.current_page(), 2);
    assert_eq!(results.items()[0].id, 21);
    assert_eq!(controller.filter().await.current_page(), 2);
}

#[tokio::test]
async fn test_stale_page_after_filter_narrowed() {
    let harness = TestHarness::new();
    harness
        .catalog
        .set_default_page(fixtures::movie_page(1, 20, 25, 500))
        .await;
    let controller = harness.controller();

    controller.on_filters_changed().await;
    controller.go_to_page(25).await;
    assert_eq!(controller.filter().await.current_page(), 25);

    // The server no longer has page 25 by the time the user comes back.
    harness.catalog.set_page(25, fixtures::empty_page(25)).await;
    harness.catalog.clear_recorded().await;

    let outcome = controller.refresh().await;

    assert!(matches!(outcome, FetchOutcome::Loaded { .. }));
    let pages: Vec<u32> = harness
        .catalog
        .requests()
        .await
        .iter()
        .map(|d| d.page())
        .collect();
    assert_eq!(pages, vec![25, 1]);
    assert_eq!(controller.filter().await.current_page(), 1);
    assert_eq!(controller.results().await.status(), &ResultStatus::Ready);
}

#[tokio::test]
async fn test_stale_retry_is_single() {
    let harness = TestHarness::new();
    harness
        .catalog
        .set_default_page(fixtures::movie_page(1, 20, 3, 60))
        .await;
    let controller = harness.controller();
    controller.on_filters_changed().await;
    controller.go_to_page(3).await;

    // Everything is gone now.
    harness.catalog.set_page(1, fixtures::empty_page(1)).await;
    harness.catalog.set_page(3, fixtures::empty_page(3)).await;
    harness.catalog.clear_recorded().await;

    let outcome = controller.refresh().await;

    assert_eq!(outcome, FetchOutcome::NoResults);
    assert_eq!(harness.catalog.request_count().await, 2);
    assert!(controller.results().await.error_state());
}

#[tokio::test]
async fn test_year_range_normalized() {
    let harness = TestHarness::new();
    harness
        .catalog
        .set_default_page(fixtures::movie_page(1, 20, 2, 40))
        .await;
    let controller = harness.controller();

    controller
        .dispatch(FilterIntent::SetYearRange {
            start: 1995,
            end: 1990,
        })
        .await;

    assert_eq!(
        controller.filter().await.year_range(),
        YearRange::new(1995, 1995).unwrap()
    );
    match harness.catalog.last_request().await.unwrap() {
        QueryDescriptor::Discover {
            release_date_from,
            release_date_to,
            ..
        } => {
            assert_eq!(release_date_from, "1995-01-01");
            assert_eq!(release_date_to, "1995-12-31");
        }
        other => panic!("expected discover, got {:?}", other),
    }
}

#[tokio::test]
async fn test_favorites_survive_restart() {
    let harness = TestHarness::new();
    harness
        .catalog
        .set_default_page(fixtures::movie_page(1, 10, 1, 10))
        .await;

    {
        let controller = harness.controller();
        controller.on_filters_changed().await;
        assert_eq!(controller.toggle_favorite_by_id(4).await.unwrap(), Some(true));
        assert_eq!(controller.toggle_favorite_by_id(9).await.unwrap(), Some(true));
        assert_eq!(controller.toggle_favorite_by_id(4).await.unwrap(), Some(false));
    }
    harness.catalog.clear_recorded().await;

    let controller = harness.controller();
    let favorites = controller.favorites().await;
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, 9);
    assert_eq!(favorites[0].title, "Movie 9");

    controller.dispatch(FilterIntent::ToggleFavoritesView).await;
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.favorites_count, 1);
    assert_eq!(snapshot.items[0].movie.id, 9);
    assert!(snapshot.items[0].is_favorite);
    assert_eq!(harness.catalog.request_count().await, 0);
}

#[tokio::test]
async fn test_corrupt_favorites_record_starts_empty() {
    let harness = TestHarness::new();
    harness
        .store
        .save(KEY, "[{\"id\": \"not a number\"}")
        .expect("Failed to seed record");
    harness
        .catalog
        .set_default_page(fixtures::movie_page(1, 5, 1, 5))
        .await;

    let controller = harness.controller();
    assert!(controller.favorites().await.is_empty());

    controller.on_filters_changed().await;
    controller.toggle_favorite_by_id(2).await.unwrap();

    let raw = harness
        .store
        .load(KEY)
        .expect("Failed to read record")
        .expect("Record missing");
    let persisted: Vec<marquee_core::Movie> = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].id, 2);
}
