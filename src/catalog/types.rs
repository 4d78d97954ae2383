//! TMDB response envelopes and their conversion into collector models.

use collector_db::models::{Genre, MediaEntry};
use serde::{Deserialize, Serialize};

/// One page of a discovery or search listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            results: self.results.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }

    /// True when no page follows this one.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}

/// A movie or TV result as TMDB sends it.
///
/// TV results use `name` / `first_air_date`; the aliases fold both shapes
/// into one.
#[derive(Debug, Deserialize)]
pub(crate) struct TmdbEntry {
    id: i64,
    #[serde(alias = "name")]
    title: Option<String>,
    overview: Option<String>,
    #[serde(alias = "first_air_date")]
    release_date: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f64>,
    popularity: Option<f64>,
    #[serde(default)]
    genre_ids: Vec<i64>,
}

impl TmdbEntry {
    pub(crate) fn into_entry(self, image_base_url: &str) -> MediaEntry {
        let mut entry = MediaEntry {
            id: self.id,
            title: self.title.unwrap_or_default(),
            overview: self.overview.unwrap_or_default(),
            release_date: self.release_date.unwrap_or_default(),
            poster_path: self.poster_path.unwrap_or_default(),
            backdrop_path: self.backdrop_path.unwrap_or_default(),
            vote_average: self.vote_average.unwrap_or_default(),
            popularity: self.popularity.unwrap_or_default(),
            trailer_url: String::new(),
            genre_ids: self.genre_ids,
            created_at: None,
        };
        resolve_image_paths(&mut entry, image_base_url);
        entry
    }
}

/// A video attached to a movie or show. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Provider key, e.g. the YouTube video ID.
    #[serde(default)]
    pub key: String,
    /// Hosting site, e.g. "YouTube".
    #[serde(default)]
    pub site: String,
    /// "Trailer", "Teaser", "Clip", "Featurette", ...
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoList {
    pub results: Vec<Video>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenreList {
    pub genres: Vec<Genre>,
}

/// Prefix `path` with the image base URL.
///
/// Empty paths stay empty and absolute URLs are returned unchanged, so the
/// rewrite can never be applied twice.
pub fn absolute_image_url(image_base_url: &str, path: &str) -> String {
    if path.is_empty()
        || path.starts_with(image_base_url)
        || path.starts_with("http://")
        || path.starts_with("https://")
    {
        return path.to_string();
    }
    format!("{image_base_url}{path}")
}

/// Rewrite an entry's poster and backdrop paths to absolute URLs.
pub fn resolve_image_paths(entry: &mut MediaEntry, image_base_url: &str) {
    entry.poster_path = absolute_image_url(image_base_url, &entry.poster_path);
    entry.backdrop_path = absolute_image_url(image_base_url, &entry.backdrop_path);
}
