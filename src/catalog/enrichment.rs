//! Bounded-concurrency trailer enrichment for a page of entries.
//!
//! [`Enricher::enrich`] spawns one task per entry. A semaphore admits at most
//! [`ENRICHMENT_CONCURRENCY`] resolutions at a time; a failed, panicked, or
//! timed-out resolution leaves that entry without a trailer and never stops
//! the rest of the batch.
//!
//! # Example
//!
//! ```rust,ignore
//! let enricher = Enricher::new(Arc::new(TrailerResolver::new(client)));
//! let report = enricher.enrich(MediaType::Movie, &mut page.results).await;
//! ```

use std::sync::Arc;
use std::time::Duration;

use collector_common::MediaType;
use collector_db::models::MediaEntry;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::error::CatalogError;
use super::trailer::TrailerProvider;

/// Maximum number of trailer resolutions in flight per batch.
pub const ENRICHMENT_CONCURRENCY: usize = 10;

/// Per-batch outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    pub attempted: usize,
    pub found: usize,
    pub missing: usize,
    pub failed: usize,
}

#[derive(Debug, thiserror::Error)]
enum ResolutionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("deadline of {0:?} exceeded")]
    Deadline(Duration),

    #[error("admission gate closed")]
    GateClosed,
}

type Resolution = Result<Option<String>, ResolutionError>;

/// Decorates entries with trailer URLs.
pub struct Enricher {
    provider: Arc<dyn TrailerProvider>,
    limit: usize,
    deadline: Option<Duration>,
}

impl Enricher {
    pub fn new(provider: Arc<dyn TrailerProvider>) -> Self {
        Self {
            provider,
            limit: ENRICHMENT_CONCURRENCY,
            deadline: None,
        }
    }

    /// Override the admission limit. Values below 1 are raised to 1.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Abort any single resolution that takes longer than `deadline`.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Resolve a trailer for every entry and write it into `trailer_url`.
    ///
    /// Returns once every resolution has finished. Entries keep their
    /// positions; entries without a trailer end up with an empty URL.
    /// Dropping the returned future aborts all outstanding resolutions.
    pub async fn enrich(&self, media_type: MediaType, entries: &mut [MediaEntry]) -> EnrichmentReport {
        let gate = Arc::new(Semaphore::new(self.limit));
        let mut tasks = JoinSet::new();

        for (index, entry) in entries.iter().enumerate() {
            let gate = gate.clone();
            let provider = self.provider.clone();
            let deadline = self.deadline;
            let id = entry.id;

            tasks.spawn(async move {
                let Ok(_permit) = gate.acquire_owned().await else {
                    return (index, Err(ResolutionError::GateClosed));
                };
                (index, resolve_one(provider.as_ref(), media_type, id, deadline).await)
            });
        }

        let mut resolutions: Vec<Option<Resolution>> = (0..entries.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, resolution)) => resolutions[index] = Some(resolution),
                Err(e) => warn!(media_type = %media_type, error = %e, "Trailer task aborted"),
            }
        }

        let mut report = EnrichmentReport {
            attempted: entries.len(),
            ..Default::default()
        };

        for (entry, resolution) in entries.iter_mut().zip(resolutions) {
            match resolution {
                Some(Ok(Some(url))) => {
                    entry.trailer_url = url;
                    report.found += 1;
                }
                Some(Ok(None)) => {
                    entry.trailer_url.clear();
                    report.missing += 1;
                }
                Some(Err(e)) => {
                    warn!(
                        media_type = %media_type,
                        entry_id = entry.id,
                        error = %e,
                        "Trailer resolution failed; leaving trailer empty"
                    );
                    entry.trailer_url.clear();
                    report.failed += 1;
                }
                None => {
                    entry.trailer_url.clear();
                    report.failed += 1;
                }
            }
        }

        info!(
            media_type = %media_type,
            attempted = report.attempted,
            found = report.found,
            missing = report.missing,
            failed = report.failed,
            "Enrichment batch complete"
        );
        report
    }
}

async fn resolve_one(
    provider: &dyn TrailerProvider,
    media_type: MediaType,
    id: i64,
    deadline: Option<Duration>,
) -> Resolution {
    debug!(media_type = %media_type, id, "Resolving trailer");
    match deadline {
        Some(limit) => match tokio::time::timeout(limit, provider.resolve(media_type, id)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(ResolutionError::Deadline(limit)),
        },
        None => Ok(provider.resolve(media_type, id).await?),
    }
}
