mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use collector_common::MediaType;
use collector_db::pool::init_pool;
use tmdb_collector::catalog::{TmdbClient, TrailerProvider, TrailerResolver};
use tmdb_collector::collector::Collector;
use tmdb_collector::config;

async fn collect(
    config_path: Option<&Path>,
    pages: Option<u32>,
    media: Option<MediaType>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;
    if let Some(pages) = pages {
        config.fetch.num_pages = pages;
    }
    config::validate_config(&config)?;

    tracing::info!("Initializing database at {}", config.database_path);
    let pool = init_pool(&config.database_path)?;

    let collector = Collector::from_config(&config, pool)?;
    let media_types = match media {
        Some(media_type) => vec![media_type],
        None => MediaType::ALL.to_vec(),
    };

    let summary = collector.run(&media_types).await?;
    println!(
        "Saved {} genres, {} entries ({} with trailers) from {} pages",
        summary.genres,
        summary.entries(),
        summary.trailers(),
        summary.pages.len()
    );
    Ok(())
}

async fn genres(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    config::validate_config(&config)?;

    let pool = init_pool(&config.database_path)?;
    let collector = Collector::from_config(&config, pool)?;
    let count = collector.collect_genres().await?;
    println!("Saved {} genres", count);
    Ok(())
}

async fn search(
    config_path: Option<&Path>,
    query: &str,
    media_type: MediaType,
    page: u32,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    config::validate_config(&config)?;

    let client = TmdbClient::from_config(&config)?;
    let results = client.search(media_type, query, page).await?;

    println!(
        "Page {} of {} ({} results)",
        results.page, results.total_pages, results.total_results
    );
    for entry in results.results {
        println!("{:>8}  {}  {}", entry.id, entry.release_date, entry.title);
    }
    Ok(())
}

async fn trailer(config_path: Option<&Path>, id: i64, media_type: MediaType) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    config::validate_config(&config)?;

    let client = Arc::new(TmdbClient::from_config(&config)?);
    let resolver = TrailerResolver::new(client);
    match resolver.resolve(media_type, id).await? {
        Some(url) => println!("{}", url),
        None => println!("No trailer found for {} {}", media_type, id),
    }
    Ok(())
}

fn validate(config_path: Option<&Path>) -> Result<()> {
    match config::load_config_or_default(config_path) {
        Ok(config) => {
            config::validate_config(&config)?;
            println!("Configuration is valid");
            println!("  Database: {}", config.database_path);
            println!("  Language: {}", config.tmdb.language);
            println!("  Pages: {}", config.fetch.num_pages);
            println!("  Movie sort: {}", config.fetch.sort.movies.sort_by());
            println!("  TV sort: {}", config.fetch.sort.tv_shows.sort_by());
            Ok(())
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            Err(e)
        }
    }
}

fn media_type(tv: bool) -> MediaType {
    if tv {
        MediaType::Tv
    } else {
        MediaType::Movie
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise pick defaults from the verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "tmdb_collector=trace,collector_db=debug,reqwest=debug".to_string()
        } else {
            "tmdb_collector=info,collector_db=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let config_path = cli.config.as_deref();
    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Collect { pages, media } => rt.block_on(collect(config_path, pages, media)),
        Commands::Genres => rt.block_on(genres(config_path)),
        Commands::Search { query, tv, page } => {
            rt.block_on(search(config_path, &query, media_type(tv), page))
        }
        Commands::Trailer { id, tv } => rt.block_on(trailer(config_path, id, media_type(tv))),
        Commands::Validate { config: path } => validate(path.as_deref().or(config_path)),
        Commands::Version => {
            println!("tmdb-collector {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
