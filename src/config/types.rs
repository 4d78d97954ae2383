use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// SQLite database file the collector writes to.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub fetch: FetchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            tmdb: TmdbConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

fn default_database_path() -> String {
    "tmdb-collector.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// TMDB v3 API key. Falls back to `TMDB_API_KEY` when empty.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Prefix for relative poster and backdrop paths.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Primary locale for listings and trailer lookups (e.g. "pt-BR").
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/original".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// Discovery pages to collect per media type.
    #[serde(default = "default_num_pages")]
    pub num_pages: u32,

    #[serde(default)]
    pub include_adult: bool,

    /// Movies only; the TV discovery endpoint has no such filter.
    #[serde(default)]
    pub include_video: bool,

    /// Upper bound on release / first air date, `YYYY-MM-DD`.
    #[serde(default)]
    pub max_release_date: Option<String>,

    /// Caller-side deadline for one trailer resolution, on top of the HTTP timeout.
    #[serde(default)]
    pub trailer_deadline_secs: Option<u64>,

    #[serde(default)]
    pub sort: SortSettings,
}

fn default_num_pages() -> u32 {
    1
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            num_pages: default_num_pages(),
            include_adult: false,
            include_video: false,
            max_release_date: None,
            trailer_deadline_secs: None,
            sort: SortSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SortSettings {
    #[serde(default)]
    pub movies: SortConfig,

    #[serde(default)]
    pub tv_shows: SortConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SortConfig {
    #[serde(default = "default_sort_field")]
    pub field: String,

    #[serde(default)]
    pub direction: SortDirection,
}

fn default_sort_field() -> String {
    "popularity".to_string()
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            field: default_sort_field(),
            direction: SortDirection::default(),
        }
    }
}

impl SortConfig {
    /// Value for TMDB's `sort_by` parameter, e.g. `popularity.desc`.
    pub fn sort_by(&self) -> String {
        format!("{}.{}", self.field, self.direction)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}
