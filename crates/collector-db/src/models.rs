//! Rust models matching the database schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A movie or TV show from the catalog.
///
/// For TV shows `title` holds the show name and `release_date` the first air
/// date; the table decides the column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaEntry {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub release_date: String,
    /// Empty, or an absolute image URL once the catalog client has run.
    pub poster_path: String,
    pub backdrop_path: String,
    pub vote_average: f64,
    pub popularity: f64,
    /// Empty when no qualifying video was found.
    pub trailer_url: String,
    pub genre_ids: Vec<i64>,
    /// Stamped once per write batch.
    pub created_at: Option<DateTime<Utc>>,
}

impl MediaEntry {
    pub fn has_trailer(&self) -> bool {
        !self.trailer_url.is_empty()
    }
}

/// A catalog genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Many-to-many link between an entry and a genre. The pair is the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryGenreLink {
    pub entry_id: i64,
    pub genre_id: i64,
}

impl EntryGenreLink {
    /// Flatten the `genre_ids` of a page of entries into link rows, in entry order.
    pub fn from_entries(entries: &[MediaEntry]) -> Vec<EntryGenreLink> {
        entries
            .iter()
            .flat_map(|entry| {
                entry.genre_ids.iter().map(move |&genre_id| EntryGenreLink {
                    entry_id: entry.id,
                    genre_id,
                })
            })
            .collect()
    }
}
