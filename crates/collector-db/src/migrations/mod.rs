//! Embedded schema migrations.
//!
//! The applied version lives in SQLite's `user_version` pragma. Migration `n`
//! is `MIGRATIONS[n - 1]`; each one runs in its own transaction together with
//! the version bump.

use rusqlite::Connection;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration {version} ({name}) failed: {source}")]
    Failed {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
}

/// `(name, sql)` in application order.
const MIGRATIONS: &[(&str, &str)] = &[("catalog tables", include_str!("001_initial.sql"))];

fn schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Bring the schema up to date. Returns how many migrations were applied.
pub fn run_migrations(conn: &Connection) -> Result<usize, MigrationError> {
    let start = schema_version(conn)? as usize;
    let mut applied = 0;

    for (index, &(name, sql)) in MIGRATIONS.iter().enumerate().skip(start) {
        let version = index as u32 + 1;
        let fail = |source| MigrationError::Failed { version, name, source };

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql).map_err(fail)?;
        tx.pragma_update(None, "user_version", version).map_err(fail)?;
        tx.commit().map_err(fail)?;

        info!(version, name, "Applied migration");
        applied += 1;
    }

    Ok(applied)
}
