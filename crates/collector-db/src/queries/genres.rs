//! Genre and entry-genre link queries.

use collector_common::{Error, MediaType, Result};
use rusqlite::Connection;
use tracing::debug;

use super::entry_table;
use crate::models::{EntryGenreLink, Genre};

/// Insert or rename a batch of genres in a single transaction.
pub fn upsert_genres(conn: &Connection, genres: &[Genre]) -> Result<usize> {
    if genres.is_empty() {
        return Ok(0);
    }

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| Error::database(e.to_string()))?;
    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO genres (id, name) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            )
            .map_err(|e| Error::database(e.to_string()))?;

        for genre in genres {
            stmt.execute(rusqlite::params![genre.id, genre.name])
                .map_err(|e| Error::database(format!("failed to upsert genre {}: {e}", genre.id)))?;
        }
    }
    tx.commit().map_err(|e| Error::database(e.to_string()))?;

    debug!(rows = genres.len(), "Upserted genre batch");
    Ok(genres.len())
}

/// Store a batch of entry-genre links in a single transaction.
///
/// Pairs that already exist are left as they are.
pub fn upsert_genre_links(
    conn: &Connection,
    media_type: MediaType,
    links: &[EntryGenreLink],
) -> Result<usize> {
    if links.is_empty() {
        return Ok(0);
    }

    let t = entry_table(media_type);
    let sql = format!(
        "INSERT INTO {table} ({column}, genre_id) VALUES (?1, ?2)
         ON CONFLICT({column}, genre_id) DO NOTHING",
        table = t.link_table,
        column = t.link_column,
    );

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| Error::database(e.to_string()))?;
    {
        let mut stmt = tx
            .prepare(&sql)
            .map_err(|e| Error::database(e.to_string()))?;

        for link in links {
            stmt.execute(rusqlite::params![link.entry_id, link.genre_id])
                .map_err(|e| {
                    Error::database(format!(
                        "failed to link {media_type} {} to genre {}: {e}",
                        link.entry_id, link.genre_id
                    ))
                })?;
        }
    }
    tx.commit().map_err(|e| Error::database(e.to_string()))?;

    debug!(media_type = %media_type, rows = links.len(), "Upserted genre links");
    Ok(links.len())
}

/// Link one entry to each of `genre_ids`, atomically.
pub fn set_entry_genres(
    conn: &Connection,
    media_type: MediaType,
    entry_id: i64,
    genre_ids: &[i64],
) -> Result<usize> {
    let links: Vec<EntryGenreLink> = genre_ids
        .iter()
        .map(|&genre_id| EntryGenreLink { entry_id, genre_id })
        .collect();
    upsert_genre_links(conn, media_type, &links)
}

/// All genres, ordered by ID.
pub fn list_genres(conn: &Connection) -> Result<Vec<Genre>> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM genres ORDER BY id")
        .map_err(|e| Error::database(e.to_string()))?;

    let genres = stmt
        .query_map([], |row| {
            Ok(Genre {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(genres)
}

/// Genre IDs linked to one entry, in the order they were first stored.
pub fn genre_ids_for_entry(
    conn: &Connection,
    media_type: MediaType,
    entry_id: i64,
) -> Result<Vec<i64>> {
    let t = entry_table(media_type);
    let sql = format!(
        "SELECT genre_id FROM {table} WHERE {column} = ? ORDER BY rowid",
        table = t.link_table,
        column = t.link_column,
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| Error::database(e.to_string()))?;

    let ids = stmt
        .query_map([entry_id], |row| row.get(0))
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<i64>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(ids)
}
