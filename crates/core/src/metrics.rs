//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Result fetching (outcomes per query mode, discarded responses)
//! - Favorites (toggles)
//! - Catalog requests (latency)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Fetch Metrics
// =============================================================================

/// Completed fetches by query mode and outcome.
pub static FETCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("marquee_fetches_total", "Total result fetches"),
        &["mode", "outcome"], // outcome: "loaded", "no_results", "stale_page", "failed"
    )
    .unwrap()
});

/// Responses dropped because a newer fetch had been issued.
pub static SUPERSEDED_RESPONSES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "marquee_superseded_responses_total",
        "Responses discarded because a newer fetch was issued",
    )
    .unwrap()
});

// =============================================================================
// Favorites Metrics
// =============================================================================

/// Favorites toggles by action.
pub static FAVORITE_TOGGLES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("marquee_favorite_toggles_total", "Total favorites toggles"),
        &["action"], // "added", "removed"
    )
    .unwrap()
});

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Catalog request duration in seconds.
pub static CATALOG_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "marquee_catalog_request_duration_seconds",
            "Duration of catalog API requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["endpoint"], // "search", "discover", "videos"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(FETCHES_TOTAL.clone()),
        Box::new(SUPERSEDED_RESPONSES.clone()),
        Box::new(FAVORITE_TOGGLES.clone()),
        Box::new(CATALOG_REQUEST_DURATION.clone()),
    ]
}
