//! Trailer selection from a movie's video list.

use super::types::Video;

const YOUTUBE: &str = "YouTube";
const TRAILER: &str = "Trailer";

/// Pick the video to play as a movie's trailer.
///
/// Preference order:
/// 1. YouTube trailer in `language` (ISO 639-1)
/// 2. any YouTube trailer
/// 3. any YouTube video
pub fn select_trailer<'a>(videos: &'a [Video], language: &str) -> Option<&'a Video> {
    let is_youtube = |v: &&Video| v.site == YOUTUBE;
    let is_trailer = |v: &&Video| v.site == YOUTUBE && v.kind == TRAILER;

    videos
        .iter()
        .filter(is_trailer)
        .find(|v| v.iso_639_1.as_deref() == Some(language))
        .or_else(|| videos.iter().find(is_trailer))
        .or_else(|| videos.iter().find(is_youtube))
}

/// Embeddable player URL for a YouTube video key.
pub fn youtube_embed_url(key: &str) -> String {
    format!("https://www.youtube.com/embed/{}", key)
}
