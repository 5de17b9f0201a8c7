//! Plain-text rendering of controller snapshots.

use marquee_core::catalog::youtube_embed_url;
use marquee_core::query::{genre_name, GENRES};
use marquee_core::{
    BrowseSnapshot, DisplayedMovie, FilterState, Movie, PageWindow, ResultStatus, Video,
};

/// Render the whole view: filter line, items, pagination and status.
pub fn snapshot(snapshot: &BrowseSnapshot, image_base_url: &str) -> String {
    let mut out = filter_line(&snapshot.filter, snapshot.favorites_count);
    out.push('\n');

    if let ResultStatus::Failed { message } = snapshot.results.status() {
        if !snapshot.filter.viewing_favorites() {
            out.push_str(&format!("Could not load movies: {}\n", message));
        }
    }

    match snapshot.empty_message() {
        Some(message) => {
            out.push_str(message);
            out.push('\n');
        }
        None if snapshot.items.is_empty() => out.push_str("Loading...\n"),
        None => {
            for item in &snapshot.items {
                out.push_str(&movie_entry(item, image_base_url));
            }
        }
    }

    if !snapshot.filter.viewing_favorites() && !snapshot.items.is_empty() {
        out.push_str(&format!(
            "Showing {} of {} movies\n",
            snapshot.items.len(),
            snapshot.results.total_results()
        ));
    }

    if let Some(window) = &snapshot.pagination {
        out.push_str(&pagination(window));
        out.push('\n');
    }

    out
}

fn filter_line(filter: &FilterState, favorites_count: usize) -> String {
    if filter.viewing_favorites() {
        return format!("Favorites ({})", favorites_count);
    }

    let mut parts = Vec::new();
    match filter.search_term() {
        Some(term) => parts.push(format!("Search \"{}\"", term)),
        None => parts.push("Discover".to_string()),
    }
    if let Some(id) = filter.genre_id() {
        parts.push(format!("genre {}", genre_name(id).unwrap_or("unknown")));
    }
    if filter.min_rating() > 0.0 {
        parts.push(format!("rating >= {}", filter.min_rating()));
    }
    if !filter.is_search_mode() {
        let years = filter.year_range();
        parts.push(format!("{}-{}", years.start(), years.end()));
    }
    parts.push(format!("page {}", filter.current_page()));
    parts.join(" | ")
}

fn movie_entry(item: &DisplayedMovie, image_base_url: &str) -> String {
    let movie = &item.movie;
    let marker = if item.is_favorite { '*' } else { ' ' };
    let year = movie
        .year()
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();

    let mut out = format!(
        "[{}] {:>7}  {}{}  {:.1}\n",
        marker, movie.id, movie.title, year, movie.vote_average
    );
    let details = [
        movie.genre_names(),
        movie.overview_excerpt(),
        movie.poster_url(image_base_url),
    ];
    for line in details.into_iter().flatten() {
        out.push_str(&format!("             {}\n", line));
    }
    out
}

/// Page links, e.g. `<< < 8 9 [10] 11 12 > >>`. Disabled ends are dashed.
pub fn pagination(window: &PageWindow) -> String {
    let mut parts = Vec::new();
    if window.has_previous() {
        parts.push("<<".to_string());
        parts.push("<".to_string());
    } else {
        parts.push("--".to_string());
        parts.push("-".to_string());
    }
    for page in window.pages() {
        if *page == window.current_page() {
            parts.push(format!("[{}]", page));
        } else {
            parts.push(page.to_string());
        }
    }
    if window.has_next() {
        parts.push(">".to_string());
        parts.push(">>".to_string());
    } else {
        parts.push("-".to_string());
        parts.push("--".to_string());
    }
    format!("{}  (of {})", parts.join(" "), window.total_pages())
}

pub fn trailer(movie: Option<&Movie>, movie_id: u32, video: Option<&Video>) -> String {
    let title = movie
        .map(|m| m.title.clone())
        .unwrap_or_else(|| format!("movie {}", movie_id));
    match video {
        Some(video) => format!(
            "{}: {} {}",
            title,
            video.name.as_deref().unwrap_or(&video.kind),
            youtube_embed_url(&video.key)
        ),
        None => format!("No trailer available for {}", title),
    }
}

pub fn genres() -> String {
    GENRES
        .iter()
        .map(|g| format!("{:>6}  {}", g.id, g.name))
        .collect::<Vec<_>>()
        .join("\n")
}
