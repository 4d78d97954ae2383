//! Collector-DB: schema, migrations, and bulk persistence.
//!
//! SQLite through rusqlite with r2d2 connection pooling.
//!
//! # Modules
//!
//! - `migrations` - Embedded schema migrations
//! - `pool` - Connection pool management
//! - `models` - Rust models matching the database schema
//! - `queries` - Transactional bulk upserts and read helpers
//!
//! # Example
//!
//! ```no_run
//! use collector_common::MediaType;
//! use collector_db::models::Genre;
//! use collector_db::pool::{get_conn, init_pool};
//! use collector_db::queries::genres;
//!
//! let pool = init_pool("catalog.db").unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! genres::upsert_genres(&conn, &[Genre { id: 28, name: "Action".into() }]).unwrap();
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
