//! Database query modules.
//!
//! Every bulk write runs in one transaction: all rows commit or none do.
//! - entries: movies and TV shows
//! - genres: genre list and entry-genre link tables

pub mod entries;
pub mod genres;

use collector_common::MediaType;

/// Table and column names for one catalog kind.
pub(crate) struct EntryTable {
    pub table: &'static str,
    pub title_column: &'static str,
    pub date_column: &'static str,
    pub link_table: &'static str,
    pub link_column: &'static str,
}

pub(crate) fn entry_table(media_type: MediaType) -> EntryTable {
    match media_type {
        MediaType::Movie => EntryTable {
            table: "movies",
            title_column: "title",
            date_column: "release_date",
            link_table: "movie_genres",
            link_column: "movie_id",
        },
        MediaType::Tv => EntryTable {
            table: "tv_shows",
            title_column: "name",
            date_column: "first_air_date",
            link_table: "tvshow_genres",
            link_column: "tvshow_id",
        },
    }
}
