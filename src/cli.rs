use clap::{Parser, Subcommand};
use collector_common::MediaType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tmdb-collector")]
#[command(author, version, about = "Collect TMDB movies and TV shows with trailers into SQLite")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover pages, attach trailers, and store everything
    Collect {
        /// Pages per media type (overrides fetch.num_pages)
        #[arg(long)]
        pages: Option<u32>,

        /// Only collect this media type (movie or tv)
        #[arg(long)]
        media: Option<MediaType>,
    },

    /// Fetch and store the movie and TV genre lists
    Genres,

    /// Search the catalog without storing anything
    Search {
        /// Free-text query
        #[arg(required = true)]
        query: String,

        /// Search TV shows instead of movies
        #[arg(long)]
        tv: bool,

        /// Result page
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Resolve the trailer URL for a single entry
    Trailer {
        /// TMDB ID
        id: i64,

        /// Treat the ID as a TV show
        #[arg(long)]
        tv: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
