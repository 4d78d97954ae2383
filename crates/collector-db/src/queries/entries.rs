//! Movie and TV show queries.
//!
//! [`upsert_entries`] is the bulk writer used by the collector: one transaction
//! per batch, one `created_at` per batch, and a full-row replace on conflict.

use chrono::{DateTime, Utc};
use collector_common::{Error, MediaType, Result};
use rusqlite::{named_params, Connection, OptionalExtension};
use tracing::debug;

use super::{entry_table, genres};
use crate::models::MediaEntry;

fn upsert_sql(media_type: MediaType) -> String {
    let t = entry_table(media_type);
    format!(
        "INSERT INTO {table} (
            id, {title}, overview, {date}, poster_path, backdrop_path,
            vote_average, trailer_url, popularity, created_at
         ) VALUES (
            :id, :title, :overview, :date, :poster_path, :backdrop_path,
            :vote_average, :trailer_url, :popularity, :created_at
         )
         ON CONFLICT(id) DO UPDATE SET
            {title} = excluded.{title},
            overview = excluded.overview,
            {date} = excluded.{date},
            poster_path = excluded.poster_path,
            backdrop_path = excluded.backdrop_path,
            vote_average = excluded.vote_average,
            trailer_url = excluded.trailer_url,
            popularity = excluded.popularity,
            created_at = excluded.created_at",
        table = t.table,
        title = t.title_column,
        date = t.date_column,
    )
}

/// Insert or replace a batch of entries in a single transaction.
///
/// Existing rows with the same ID are overwritten column by column. Every row
/// in the batch receives the same `created_at`. If any row fails the whole
/// batch is rolled back and the error is returned.
///
/// # Returns
///
/// * `Ok(usize)` - Number of rows written (0 for an empty batch)
/// * `Err(Error)` - If any row or the commit fails
pub fn upsert_entries(
    conn: &Connection,
    media_type: MediaType,
    entries: &[MediaEntry],
) -> Result<usize> {
    if entries.is_empty() {
        return Ok(0);
    }

    let sql = upsert_sql(media_type);
    let created_at = Utc::now().to_rfc3339();

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| Error::database(e.to_string()))?;
    {
        let mut stmt = tx
            .prepare(&sql)
            .map_err(|e| Error::database(e.to_string()))?;

        for entry in entries {
            stmt.execute(named_params! {
                ":id": entry.id,
                ":title": entry.title,
                ":overview": entry.overview,
                ":date": entry.release_date,
                ":poster_path": entry.poster_path,
                ":backdrop_path": entry.backdrop_path,
                ":vote_average": entry.vote_average,
                ":trailer_url": entry.trailer_url,
                ":popularity": entry.popularity,
                ":created_at": created_at,
            })
            .map_err(|e| {
                Error::database(format!("failed to upsert {media_type} {}: {e}", entry.id))
            })?;
        }
    }
    tx.commit().map_err(|e| Error::database(e.to_string()))?;

    debug!(
        media_type = %media_type,
        rows = entries.len(),
        created_at = %created_at,
        "Upserted entry batch"
    );
    Ok(entries.len())
}

fn select_sql(media_type: MediaType) -> String {
    let t = entry_table(media_type);
    format!(
        "SELECT id, {title}, overview, {date}, poster_path, backdrop_path,
                vote_average, popularity, trailer_url, created_at
         FROM {table}",
        table = t.table,
        title = t.title_column,
        date = t.date_column,
    )
}

fn parse_entry_row(row: &rusqlite::Row) -> rusqlite::Result<MediaEntry> {
    let created_at: String = row.get(9)?;
    Ok(MediaEntry {
        id: row.get(0)?,
        title: row.get(1)?,
        overview: row.get(2)?,
        release_date: row.get(3)?,
        poster_path: row.get(4)?,
        backdrop_path: row.get(5)?,
        vote_average: row.get(6)?,
        popularity: row.get(7)?,
        trailer_url: row.get(8)?,
        genre_ids: Vec::new(),
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
    })
}

/// Get a single entry by ID, with its linked genre IDs.
pub fn get_entry(conn: &Connection, media_type: MediaType, id: i64) -> Result<Option<MediaEntry>> {
    let sql = format!("{} WHERE id = ?", select_sql(media_type));
    let entry = conn
        .query_row(&sql, [id], parse_entry_row)
        .optional()
        .map_err(|e| Error::database(e.to_string()))?;

    match entry {
        Some(mut entry) => {
            entry.genre_ids = genres::genre_ids_for_entry(conn, media_type, id)?;
            Ok(Some(entry))
        }
        None => Ok(None),
    }
}

/// List entries ordered by ID. Genre IDs are not loaded.
pub fn list_entries(conn: &Connection, media_type: MediaType) -> Result<Vec<MediaEntry>> {
    let sql = format!("{} ORDER BY id", select_sql(media_type));
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| Error::database(e.to_string()))?;

    let entries = stmt
        .query_map([], parse_entry_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(entries)
}

/// Count stored entries of one kind.
pub fn count_entries(conn: &Connection, media_type: MediaType) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", entry_table(media_type).table);
    conn.query_row(&sql, [], |row| row.get(0))
        .map_err(|e| Error::database(e.to_string()))
}
