//! TMDB v3 catalog client.
//!
//! One GET per call: discovery and search listings, genre lists, and per-entry
//! video lists. Listing results come back with absolute image URLs.

use std::time::Duration;

use collector_common::MediaType;
use collector_db::models::{Genre, MediaEntry};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{CatalogError, CatalogResult};
use super::types::{GenreList, Page, TmdbEntry, Video, VideoList};
use crate::config::{Config, FetchConfig, TmdbConfig};

const USER_AGENT: &str = concat!("tmdb-collector/", env!("CARGO_PKG_VERSION"));

/// Client for the TMDB endpoints the collector uses.
///
/// # Examples
///
/// ```no_run
/// use collector_common::MediaType;
/// use tmdb_collector::catalog::TmdbClient;
/// use tmdb_collector::config::Config;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let mut config = Config::default();
/// config.tmdb.api_key = "your-api-key".into();
///
/// let client = TmdbClient::from_config(&config)?;
/// let page = client.discover(MediaType::Movie, 1).await?;
/// println!("{} of {} pages", page.page, page.total_pages);
/// # Ok(())
/// # }
/// ```
pub struct TmdbClient {
    http: Client,
    base_url: String,
    api_key: String,
    image_base_url: String,
    language: String,
    fetch: FetchConfig,
}

impl TmdbClient {
    /// Build a client with the configured request timeout.
    ///
    /// Fails if the HTTP client cannot be constructed; there is no fallback to
    /// an untimed client.
    pub fn new(tmdb: &TmdbConfig, fetch: &FetchConfig) -> CatalogResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(tmdb.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: tmdb.base_url.trim_end_matches('/').to_string(),
            api_key: tmdb.api_key.clone(),
            image_base_url: tmdb.image_base_url.clone(),
            language: tmdb.language.clone(),
            fetch: fetch.clone(),
        })
    }

    pub fn from_config(config: &Config) -> CatalogResult<Self> {
        Self::new(&config.tmdb, &config.fetch)
    }

    /// Primary locale for listings and trailer lookups.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// GET `path`, check the status, and decode the body.
    ///
    /// The body is read as text first so a non-success response can carry it.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> CatalogResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(path, ?params, "TMDB request");

        let resp = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    fn discover_params(&self, media_type: MediaType, page: u32) -> Vec<(&'static str, String)> {
        let sort = match media_type {
            MediaType::Movie => &self.fetch.sort.movies,
            MediaType::Tv => &self.fetch.sort.tv_shows,
        };

        let mut params = vec![
            ("page", page.to_string()),
            ("sort_by", sort.sort_by()),
            ("include_adult", self.fetch.include_adult.to_string()),
            ("language", self.language.clone()),
        ];

        match media_type {
            MediaType::Movie => {
                params.push(("include_video", self.fetch.include_video.to_string()));
                if let Some(ref date) = self.fetch.max_release_date {
                    params.push(("release_date.lte", date.clone()));
                }
            }
            MediaType::Tv => {
                if let Some(ref date) = self.fetch.max_release_date {
                    params.push(("first_air_date.lte", date.clone()));
                }
            }
        }

        params
    }

    fn into_entries(&self, page: Page<TmdbEntry>) -> Page<MediaEntry> {
        page.map(|raw| raw.into_entry(&self.image_base_url))
    }

    /// Fetch one discovery page using the configured filters and sort order.
    pub async fn discover(&self, media_type: MediaType, page: u32) -> CatalogResult<Page<MediaEntry>> {
        let params = self.discover_params(media_type, page);
        let body: Page<TmdbEntry> = self
            .get_json(&format!("/discover/{}", media_type.api_path()), &params)
            .await?;

        debug!(
            media_type = %media_type,
            page,
            results = body.results.len(),
            total_pages = body.total_pages,
            "TMDB discover"
        );
        Ok(self.into_entries(body))
    }

    /// Free-text search, one page at a time.
    pub async fn search(
        &self,
        media_type: MediaType,
        query: &str,
        page: u32,
    ) -> CatalogResult<Page<MediaEntry>> {
        let params = [
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("language", self.language.clone()),
        ];
        let body: Page<TmdbEntry> = self
            .get_json(&format!("/search/{}", media_type.api_path()), &params)
            .await?;

        Ok(self.into_entries(body))
    }

    /// Genre list for one media type in the primary locale.
    pub async fn genres(&self, media_type: MediaType) -> CatalogResult<Vec<Genre>> {
        let params = [("language", self.language.clone())];
        let body: GenreList = self
            .get_json(&format!("/genre/{}/list", media_type.api_path()), &params)
            .await?;
        Ok(body.genres)
    }

    /// Videos attached to one entry for `locale`.
    pub async fn videos(
        &self,
        media_type: MediaType,
        id: i64,
        locale: &str,
    ) -> CatalogResult<Vec<Video>> {
        let params = [("language", locale.to_string())];
        let body: VideoList = self
            .get_json(&format!("/{}/{id}/videos", media_type.api_path()), &params)
            .await?;
        Ok(body.results)
    }
}
