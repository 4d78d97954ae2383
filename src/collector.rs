//! Discovery pipeline: fetch a page, enrich it, persist it.
//!
//! Pages are processed one after another. Within a page all trailer lookups
//! finish before anything is written, and the database connection is taken
//! only after the last network call of the page.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use collector_common::MediaType;
use collector_db::models::EntryGenreLink;
use collector_db::pool::{get_conn, DbPool};
use collector_db::queries::{entries, genres};
use tracing::info;

use crate::catalog::{Enricher, EnrichmentReport, TmdbClient, TrailerResolver};
use crate::config::Config;

/// What one page contributed to the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub media_type: MediaType,
    pub page: u32,
    pub total_pages: u32,
    /// TMDB reported no page after this one.
    pub last: bool,
    pub entries: usize,
    pub links: usize,
    pub enrichment: EnrichmentReport,
}

/// Totals for a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub genres: usize,
    pub pages: Vec<PageSummary>,
}

impl RunSummary {
    pub fn entries(&self) -> usize {
        self.pages.iter().map(|p| p.entries).sum()
    }

    pub fn trailers(&self) -> usize {
        self.pages.iter().map(|p| p.enrichment.found).sum()
    }
}

/// Runs the discovery pipeline against an injected database pool.
pub struct Collector {
    client: Arc<TmdbClient>,
    enricher: Enricher,
    pool: DbPool,
    num_pages: u32,
}

impl Collector {
    pub fn new(client: Arc<TmdbClient>, enricher: Enricher, pool: DbPool, num_pages: u32) -> Self {
        Self {
            client,
            enricher,
            pool,
            num_pages,
        }
    }

    /// Wire a TMDB client, trailer resolver, and enricher from `config`.
    pub fn from_config(config: &Config, pool: DbPool) -> Result<Self> {
        let client = Arc::new(
            TmdbClient::from_config(config).context("Failed to build TMDB client")?,
        );
        let resolver = Arc::new(TrailerResolver::new(client.clone()));
        let enricher = Enricher::new(resolver)
            .with_deadline(config.fetch.trailer_deadline_secs.map(Duration::from_secs));
        Ok(Self::new(client, enricher, pool, config.fetch.num_pages))
    }

    /// Fetch and store the movie and TV genre lists.
    pub async fn collect_genres(&self) -> Result<usize> {
        let mut total = 0;
        for media_type in MediaType::ALL {
            let list = self
                .client
                .genres(media_type)
                .await
                .with_context(|| format!("Failed to fetch {media_type} genres"))?;

            let conn = get_conn(&self.pool)?;
            let written = genres::upsert_genres(&conn, &list)
                .with_context(|| format!("Failed to save {media_type} genres"))?;

            info!(media_type = %media_type, genres = written, "Saved genres");
            total += written;
        }
        Ok(total)
    }

    /// Discover one page, attach trailers, and upsert entries and genre links.
    pub async fn collect_page(&self, media_type: MediaType, page: u32) -> Result<PageSummary> {
        let mut listing = self
            .client
            .discover(media_type, page)
            .await
            .with_context(|| format!("Failed to discover {media_type} page {page}"))?;

        let enrichment = self.enricher.enrich(media_type, &mut listing.results).await;

        let conn = get_conn(&self.pool)?;
        let written = entries::upsert_entries(&conn, media_type, &listing.results)
            .with_context(|| format!("Failed to save {media_type} page {page}"))?;

        let links = EntryGenreLink::from_entries(&listing.results);
        let linked = genres::upsert_genre_links(&conn, media_type, &links)
            .with_context(|| format!("Failed to save {media_type} genre links for page {page}"))?;

        info!(
            media_type = %media_type,
            page,
            total_pages = listing.total_pages,
            entries = written,
            trailers = enrichment.found,
            links = linked,
            "Collected page"
        );

        Ok(PageSummary {
            media_type,
            page,
            total_pages: listing.total_pages,
            last: listing.is_last(),
            entries: written,
            links: linked,
            enrichment,
        })
    }

    /// Collect genres, then up to `num_pages` pages of each media type.
    ///
    /// Stops early when TMDB reports no further pages. The first fetch or
    /// write error ends the run.
    pub async fn run(&self, media_types: &[MediaType]) -> Result<RunSummary> {
        let mut summary = RunSummary {
            genres: self.collect_genres().await?,
            ..Default::default()
        };

        for &media_type in media_types {
            for page in 1..=self.num_pages {
                let page_summary = self.collect_page(media_type, page).await?;
                let last = page_summary.last;
                summary.pages.push(page_summary);
                if last {
                    break;
                }
            }
        }

        info!(
            genres = summary.genres,
            pages = summary.pages.len(),
            entries = summary.entries(),
            trailers = summary.trailers(),
            "Collection run complete"
        );
        Ok(summary)
    }
}
