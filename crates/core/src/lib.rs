pub mod browse;
pub mod catalog;
pub mod config;
pub mod favorites;
pub mod metrics;
pub mod query;
pub mod testing;

pub use browse::{
    BrowseController, BrowseSettings, BrowseSnapshot, DisplayedMovie, FetchOutcome, PageWindow,
    ResultPage, ResultStatus,
};
pub use catalog::{CatalogError, Movie, MovieCatalog, MoviePage, TmdbClient, TmdbConfig, Video};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use favorites::{FavoritesError, FavoritesStore, RecordStore, SqliteRecordStore};
pub use query::{EndpointBuilder, FilterIntent, FilterState, QueryDescriptor, QueryMode, YearRange};
