//! Remote catalog access: listings, trailers, and enrichment.
//!
//! # Module layout
//!
//! - [`client`] -- TMDB HTTP client (discover, search, genres, videos).
//! - [`types`] -- Response envelopes, [`Video`], image URL rewriting.
//! - [`trailer`] -- Trailer selection policy and locale-fallback resolver.
//! - [`enrichment`] -- Bounded-concurrency enrichment of a page of entries.
//! - [`error`] -- [`CatalogError`] taxonomy.

pub mod client;
pub mod enrichment;
pub mod error;
pub mod trailer;
pub mod types;

pub use client::TmdbClient;
pub use enrichment::{Enricher, EnrichmentReport, ENRICHMENT_CONCURRENCY};
pub use error::{CatalogError, CatalogResult};
pub use trailer::{select_trailer, trailer_url, TrailerProvider, TrailerResolver, FALLBACK_LOCALE};
pub use types::{absolute_image_url, Page, Video};
