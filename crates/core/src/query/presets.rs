//! Quick-pick values offered by the front end.

use super::EARLIEST_YEAR;

/// A browseable genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: &'static str,
}

/// Genres offered as filters, keyed by their TMDB ids.
pub const GENRES: &[Genre] = &[
    Genre {
        id: 28,
        name: "Action",
    },
    Genre {
        id: 12,
        name: "Adventure",
    },
    Genre {
        id: 16,
        name: "Animation",
    },
    Genre {
        id: 35,
        name: "Comedy",
    },
    Genre {
        id: 80,
        name: "Crime",
    },
    Genre {
        id: 18,
        name: "Drama",
    },
    Genre {
        id: 14,
        name: "Fantasy",
    },
    Genre {
        id: 27,
        name: "Horror",
    },
    Genre {
        id: 10749,
        name: "Romance",
    },
    Genre {
        id: 878,
        name: "Science Fiction",
    },
];

/// Minimum-rating shortcuts; 0 means any rating.
pub const RATING_PRESETS: [f32; 6] = [0.0, 5.0, 6.0, 7.0, 8.0, 9.0];

pub fn genre_name(id: u32) -> Option<&'static str> {
    GENRES.iter().find(|g| g.id == id).map(|g| g.name)
}

/// A named year range shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecadePreset {
    pub label: &'static str,
    pub start: i32,
    pub end: i32,
}

/// Decade shortcuts; "All" and the current decade end at `current_year`.
pub fn decade_presets(current_year: i32) -> Vec<DecadePreset> {
    vec![
        DecadePreset {
            label: "All",
            start: EARLIEST_YEAR,
            end: current_year,
        },
        DecadePreset {
            label: "70s",
            start: 1970,
            end: 1979,
        },
        DecadePreset {
            label: "80s",
            start: 1980,
            end: 1989,
        },
        DecadePreset {
            label: "90s",
            start: 1990,
            end: 1999,
        },
        DecadePreset {
            label: "2000s",
            start: 2000,
            end: 2009,
        },
        DecadePreset {
            label: "2010s",
            start: 2010,
            end: 2019,
        },
        DecadePreset {
            label: "2020s",
            start: 2020,
            end: current_year,
        },
    ]
}
