//! Trailer selection and resolution with locale fallback.

use std::sync::Arc;

use async_trait::async_trait;
use collector_common::MediaType;
use tracing::{debug, info, warn};

use super::client::TmdbClient;
use super::error::{CatalogError, CatalogResult};
use super::types::Video;

/// Locale retried when the primary locale has no usable video.
pub const FALLBACK_LOCALE: &str = "en-US";

const YOUTUBE: &str = "YouTube";
const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Lower is better; `None` means the video never qualifies.
fn rank(video: &Video) -> Option<u8> {
    if video.site != YOUTUBE {
        return None;
    }
    match (video.kind.as_str(), video.official) {
        ("Trailer", true) => Some(0),
        ("Trailer", false) => Some(1),
        ("Teaser", _) => Some(2),
        ("Clip", _) => Some(3),
        _ => None,
    }
}

/// Pick the best video: official YouTube trailer, then any YouTube trailer,
/// then teaser, then clip. Ties go to the earliest video in the list.
pub fn select_trailer(videos: &[Video]) -> Option<&Video> {
    videos
        .iter()
        .filter_map(|video| rank(video).map(|r| (r, video)))
        .min_by_key(|(r, _)| *r)
        .map(|(_, video)| video)
}

/// Playback URL for a YouTube video key.
pub fn trailer_url(key: &str) -> String {
    format!("{YOUTUBE_WATCH_URL}{key}")
}

/// Source of trailer URLs for catalog entries.
///
/// `Ok(None)` means the entry has no qualifying video; errors are reserved for
/// failed lookups.
#[async_trait]
pub trait TrailerProvider: Send + Sync {
    async fn resolve(&self, media_type: MediaType, id: i64) -> CatalogResult<Option<String>>;
}

/// Resolves trailers through the TMDB videos endpoint.
pub struct TrailerResolver {
    client: Arc<TmdbClient>,
}

impl TrailerResolver {
    pub fn new(client: Arc<TmdbClient>) -> Self {
        Self { client }
    }

    async fn resolve_in_locale(
        &self,
        media_type: MediaType,
        id: i64,
        locale: &str,
    ) -> CatalogResult<Option<String>> {
        let videos = self.client.videos(media_type, id, locale).await?;
        Ok(select_trailer(&videos).map(|video| trailer_url(&video.key)))
    }
}

#[async_trait]
impl TrailerProvider for TrailerResolver {
    /// Try the client's primary locale, then [`FALLBACK_LOCALE`] if it differs.
    ///
    /// The first trailer found wins. An error is returned only when neither
    /// attempt produced a trailer and at least one attempt failed.
    async fn resolve(&self, media_type: MediaType, id: i64) -> CatalogResult<Option<String>> {
        let primary = self.client.language();
        let mut locales = vec![primary];
        if primary != FALLBACK_LOCALE {
            locales.push(FALLBACK_LOCALE);
        }

        let mut last_error: Option<CatalogError> = None;
        for locale in locales {
            match self.resolve_in_locale(media_type, id, locale).await {
                Ok(Some(url)) => {
                    debug!(media_type = %media_type, id, locale, url = %url, "Trailer found");
                    return Ok(Some(url));
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(media_type = %media_type, id, locale, error = %e, "Trailer lookup failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => {
                info!(media_type = %media_type, id, "No trailer found");
                Ok(None)
            }
        }
    }
}
