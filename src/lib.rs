//! tmdb-collector - TMDB discovery, trailer enrichment, and SQLite persistence
//!
//! This library crate exposes the pipeline for the binary and integration tests.

pub mod catalog;
pub mod collector;
pub mod config;
