//! Core type definitions shared by the catalog client and the database.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Catalog kind of an entry.
///
/// Movies and TV shows live in separate remote endpoints and separate
/// tables, but share one entry shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// A feature film.
    Movie,
    /// A TV series.
    Tv,
}

impl MediaType {
    /// Both catalog kinds, movies first.
    pub const ALL: [MediaType; 2] = [MediaType::Movie, MediaType::Tv];

    /// Path segment used by the remote API (`/discover/movie`, `/tv/{id}/videos`).
    pub fn api_path(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Tv => write!(f, "tv"),
        }
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" | "movies" => Ok(Self::Movie),
            "tv" | "show" | "shows" | "tv_shows" => Ok(Self::Tv),
            other => Err(Error::invalid_input(format!("unknown media type: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_paths() {
        assert_eq!(MediaType::Movie.api_path(), "movie");
        assert_eq!(MediaType::Tv.api_path(), "tv");
    }

    #[test]
    fn parse_media_type() {
        assert_eq!("movie".parse::<MediaType>().unwrap(), MediaType::Movie);
        assert_eq!("Shows".parse::<MediaType>().unwrap(), MediaType::Tv);
        assert!("music".parse::<MediaType>().is_err());
    }

    #[test]
    fn display_matches_api_path() {
        for media_type in MediaType::ALL {
            assert_eq!(media_type.to_string(), media_type.api_path());
        }
    }
}
