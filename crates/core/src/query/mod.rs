//! Filter state and the remote query it maps to.
//!
//! `FilterState` is the user-controlled half of browsing; `EndpointBuilder`
//! turns a snapshot of it into a `QueryDescriptor` without any I/O.

mod descriptor;
mod filter;
mod presets;

pub use descriptor::{build, EndpointBuilder, QueryDescriptor, QueryMode, SORT_BY_POPULARITY};
pub use filter::{clamp_page, FilterError, FilterIntent, FilterState, YearRange};
pub use presets::{decade_presets, genre_name, DecadePreset, Genre, GENRES, RATING_PRESETS};

/// Lower bound of the default year range.
pub const EARLIEST_YEAR: i32 = 1900;

/// Minimum vote count applied to discover queries.
pub const DEFAULT_MIN_VOTE_COUNT: u32 = 50;

/// Upper bound of the rating scale.
pub const MAX_RATING: f32 = 10.0;
