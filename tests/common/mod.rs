//! Shared helpers for integration tests.
//!
//! Builds configs that point at a [`MockServer`] and JSON bodies shaped like
//! TMDB responses.

#![allow(dead_code)]

use serde_json::{json, Value};
use tmdb_collector::config::Config;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-key";
pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/original";

/// Config aimed at `server` with the given primary locale.
pub fn config_for(server: &MockServer, language: &str) -> Config {
    let mut config = Config::default();
    config.tmdb.api_key = API_KEY.to_string();
    config.tmdb.base_url = server.uri();
    config.tmdb.image_base_url = IMAGE_BASE.to_string();
    config.tmdb.language = language.to_string();
    config.tmdb.request_timeout_secs = 5;
    config
}

/// A discover/search result row for a movie.
pub fn movie_json(id: i64, poster: Option<&str>) -> Value {
    json!({
        "id": id,
        "title": format!("Movie {id}"),
        "overview": "An overview",
        "release_date": "2024-05-01",
        "poster_path": poster,
        "backdrop_path": null,
        "vote_average": 7.5,
        "popularity": 120.25,
        "genre_ids": [28, 12]
    })
}

/// A discover/search result row for a TV show.
pub fn show_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Show {id}"),
        "overview": "A show",
        "first_air_date": "2023-09-10",
        "poster_path": "/show.jpg",
        "backdrop_path": "/show-bg.jpg",
        "vote_average": 8.0,
        "popularity": 50.0,
        "genre_ids": [18]
    })
}

pub fn page_json(page: u32, total_pages: u32, results: Vec<Value>) -> Value {
    json!({
        "page": page,
        "total_pages": total_pages,
        "total_results": results.len(),
        "results": results
    })
}

pub fn video_json(key: &str, kind: &str, official: bool) -> Value {
    json!({
        "iso_639_1": "en",
        "key": key,
        "site": "YouTube",
        "type": kind,
        "official": official
    })
}

pub fn videos_json(videos: Vec<Value>) -> Value {
    json!({ "id": 1, "results": videos })
}

/// Serve `body` for `/{media}/{id}/videos` in `locale`.
pub async fn mount_videos(server: &MockServer, media: &str, id: i64, locale: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{media}/{id}/videos")))
        .and(query_param("language", locale))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve small genre lists for both media types.
pub async fn mount_genres(server: &MockServer) {
    for (media, genres) in [
        ("movie", json!([{"id": 28, "name": "Action"}, {"id": 12, "name": "Adventure"}])),
        ("tv", json!([{"id": 18, "name": "Drama"}])),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/genre/{media}/list")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "genres": genres })))
            .mount(server)
            .await;
    }
}
