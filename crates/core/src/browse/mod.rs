//! Result-set controller.
//!
//! `BrowseController` owns the filter state and the current result page,
//! turns intents into catalog fetches, and discards responses that arrive
//! after a newer fetch was issued.

mod controller;
mod pagination;
mod result_page;

pub use controller::{
    BrowseController, BrowseSettings, BrowseSnapshot, DisplayedMovie, FetchOutcome, FetchTicket,
};
pub use pagination::PageWindow;
pub use result_page::{ResultPage, ResultStatus};
