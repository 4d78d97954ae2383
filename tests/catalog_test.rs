//! TMDB client and trailer resolver against a mock TMDB server.

mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use collector_common::MediaType;
use serde_json::json;
use tmdb_collector::catalog::{CatalogError, TmdbClient, TrailerProvider, TrailerResolver};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::*;

#[tokio::test]
async fn discover_sends_filters_and_rewrites_images() {
    let server = MockServer::start().await;
    let mut config = config_for(&server, "pt-BR");
    config.fetch.max_release_date = Some("2024-12-31".to_string());

    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("api_key", API_KEY))
        .and(query_param("page", "2"))
        .and(query_param("sort_by", "popularity.desc"))
        .and(query_param("include_adult", "false"))
        .and(query_param("include_video", "false"))
        .and(query_param("language", "pt-BR"))
        .and(query_param("release_date.lte", "2024-12-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            2,
            7,
            vec![movie_json(10, Some("/poster.jpg")), movie_json(11, None)],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = TmdbClient::from_config(&config).unwrap();
    let page = client.discover(MediaType::Movie, 2).await.unwrap();

    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 7);
    assert_eq!(page.results.len(), 2);

    let first = &page.results[0];
    assert_eq!(first.id, 10);
    assert_eq!(first.title, "Movie 10");
    assert_eq!(first.poster_path, format!("{IMAGE_BASE}/poster.jpg"));
    assert_eq!(first.backdrop_path, "");
    assert_eq!(first.genre_ids, vec![28, 12]);
    assert_eq!(first.trailer_url, "");

    assert_eq!(page.results[1].poster_path, "");
}

#[tokio::test]
async fn discover_tv_folds_show_fields() {
    let server = MockServer::start().await;
    let mut config = config_for(&server, "en-US");
    config.fetch.max_release_date = Some("2024-12-31".to_string());

    Mock::given(method("GET"))
        .and(path("/discover/tv"))
        .and(query_param("first_air_date.lte", "2024-12-31"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json(1, 1, vec![show_json(99)])),
        )
        .mount(&server)
        .await;

    let client = TmdbClient::from_config(&config).unwrap();
    let page = client.discover(MediaType::Tv, 1).await.unwrap();

    let show = &page.results[0];
    assert_eq!(show.title, "Show 99");
    assert_eq!(show.release_date, "2023-09-10");
    assert_eq!(show.backdrop_path, format!("{IMAGE_BASE}/show-bg.jpg"));
    assert!(page.is_last());
}

#[tokio::test]
async fn non_success_status_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"status_message":"Invalid API key"}"#),
        )
        .mount(&server)
        .await;

    let client = TmdbClient::from_config(&config_for(&server, "en-US")).unwrap();
    let err = client.discover(MediaType::Movie, 1).await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_matches!(err, CatalogError::Api { ref body, .. } if body.contains("Invalid API key"));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": "nope" })))
        .mount(&server)
        .await;

    let client = TmdbClient::from_config(&config_for(&server, "en-US")).unwrap();
    let err = client.discover(MediaType::Movie, 1).await.unwrap_err();

    assert_matches!(err, CatalogError::Decode(_));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let mut config = tmdb_collector::config::Config::default();
    config.tmdb.api_key = API_KEY.to_string();
    config.tmdb.base_url = "http://127.0.0.1:1".to_string();
    config.tmdb.request_timeout_secs = 2;

    let client = TmdbClient::from_config(&config).unwrap();
    let err = client.discover(MediaType::Movie, 1).await.unwrap_err();

    assert_matches!(err, CatalogError::Transport(_));
}

#[tokio::test]
async fn request_timeout_is_enforced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/genre/movie/list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "genres": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = config_for(&server, "en-US");
    config.tmdb.request_timeout_secs = 1;
    let client = TmdbClient::from_config(&config).unwrap();

    let err = client.genres(MediaType::Movie).await.unwrap_err();
    assert_matches!(err, CatalogError::Transport(ref e) if e.is_timeout());
}

#[tokio::test]
async fn search_passes_query_and_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "blade runner"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            3,
            3,
            vec![movie_json(78, Some("/br.jpg"))],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = TmdbClient::from_config(&config_for(&server, "en-US")).unwrap();
    let page = client.search(MediaType::Movie, "blade runner", 3).await.unwrap();

    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].poster_path, format!("{IMAGE_BASE}/br.jpg"));
}

#[tokio::test]
async fn genres_are_flattened() {
    let server = MockServer::start().await;
    mount_genres(&server).await;

    let client = TmdbClient::from_config(&config_for(&server, "en-US")).unwrap();
    let movie = client.genres(MediaType::Movie).await.unwrap();
    let tv = client.genres(MediaType::Tv).await.unwrap();

    assert_eq!(movie.len(), 2);
    assert_eq!(movie[0].id, 28);
    assert_eq!(movie[0].name, "Action");
    assert_eq!(tv.len(), 1);
    assert_eq!(tv[0].name, "Drama");
}

fn resolver_for(server: &MockServer, language: &str) -> TrailerResolver {
    let client = Arc::new(TmdbClient::from_config(&config_for(server, language)).unwrap());
    TrailerResolver::new(client)
}

#[tokio::test]
async fn falls_back_to_english_when_primary_is_empty() {
    let server = MockServer::start().await;
    mount_videos(&server, "movie", 5, "pt-BR", videos_json(vec![])).await;
    mount_videos(
        &server,
        "movie",
        5,
        "en-US",
        videos_json(vec![video_json("teaser-key", "Teaser", true)]),
    )
    .await;

    let url = resolver_for(&server, "pt-BR")
        .resolve(MediaType::Movie, 5)
        .await
        .unwrap();

    assert_eq!(url.as_deref(), Some("https://www.youtube.com/watch?v=teaser-key"));
}

#[tokio::test]
async fn primary_hit_skips_fallback() {
    let server = MockServer::start().await;
    mount_videos(
        &server,
        "tv",
        8,
        "pt-BR",
        videos_json(vec![
            video_json("clip-key", "Clip", true),
            video_json("trailer-key", "Trailer", true),
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/tv/8/videos"))
        .and(query_param("language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(videos_json(vec![])))
        .expect(0)
        .mount(&server)
        .await;

    let url = resolver_for(&server, "pt-BR")
        .resolve(MediaType::Tv, 8)
        .await
        .unwrap();

    assert_eq!(url.as_deref(), Some("https://www.youtube.com/watch?v=trailer-key"));
}

#[tokio::test]
async fn english_primary_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/3/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(videos_json(vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let url = resolver_for(&server, "en-US")
        .resolve(MediaType::Movie, 3)
        .await
        .unwrap();

    assert_eq!(url, None);
}

#[tokio::test]
async fn no_videos_anywhere_is_not_an_error() {
    let server = MockServer::start().await;
    mount_videos(&server, "movie", 4, "de-DE", videos_json(vec![])).await;
    mount_videos(
        &server,
        "movie",
        4,
        "en-US",
        videos_json(vec![json!({
            "key": "vimeo",
            "site": "Vimeo",
            "type": "Trailer",
            "official": true
        })]),
    )
    .await;

    let url = resolver_for(&server, "de-DE")
        .resolve(MediaType::Movie, 4)
        .await
        .unwrap();

    assert_eq!(url, None);
}

#[tokio::test]
async fn primary_error_is_dropped_when_fallback_finds_trailer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/6/videos"))
        .and(query_param("language", "fr-FR"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    mount_videos(
        &server,
        "movie",
        6,
        "en-US",
        videos_json(vec![video_json("fallback", "Trailer", false)]),
    )
    .await;

    let url = resolver_for(&server, "fr-FR")
        .resolve(MediaType::Movie, 6)
        .await
        .unwrap();

    assert_eq!(url.as_deref(), Some("https://www.youtube.com/watch?v=fallback"));
}

#[tokio::test]
async fn error_surfaces_when_nothing_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/6/videos"))
        .and(query_param("language", "fr-FR"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    mount_videos(&server, "movie", 6, "en-US", videos_json(vec![])).await;

    let err = resolver_for(&server, "fr-FR")
        .resolve(MediaType::Movie, 6)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
}
