mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable consulted when the config file has no API key.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./config.toml",
        "./tmdb-collector.toml",
        "~/.config/tmdb-collector/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    let mut config = Config::default();
    apply_env(&mut config);
    Ok(config)
}

fn apply_env(config: &mut Config) {
    if config.tmdb.api_key.is_empty() {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.tmdb.api_key = key;
        }
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.tmdb.api_key.trim().is_empty() {
        anyhow::bail!("TMDB API key is not set (config `tmdb.api_key` or {API_KEY_ENV})");
    }

    for (name, url) in [
        ("tmdb.base_url", &config.tmdb.base_url),
        ("tmdb.image_base_url", &config.tmdb.image_base_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("{name} must be an http(s) URL, got {url:?}");
        }
    }

    if config.tmdb.language.trim().is_empty() {
        anyhow::bail!("tmdb.language cannot be empty");
    }

    if config.tmdb.request_timeout_secs == 0 {
        anyhow::bail!("tmdb.request_timeout_secs cannot be 0");
    }

    if config.fetch.num_pages == 0 {
        anyhow::bail!("fetch.num_pages cannot be 0");
    }

    if let Some(ref date) = config.fetch.max_release_date {
        chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("fetch.max_release_date is not YYYY-MM-DD: {date:?}"))?;
    }

    if config.fetch.trailer_deadline_secs == Some(0) {
        anyhow::bail!("fetch.trailer_deadline_secs cannot be 0");
    }

    Ok(())
}
