#![cfg(not(target_arch = "wasm32"))]

use flix_core::{CatalogClient, CatalogError, Category, EngineConfig, EntityId};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CatalogClient {
    let mut config = EngineConfig::new("test-key");
    config.base_url = format!("{}/3", server.uri());
    CatalogClient::new(&config)
}

fn listing(ids: &[u64]) -> serde_json::Value {
    json!({
        "page": 1,
        "results": ids.iter().map(|id| json!({
            "id": id,
            "title": format!("Movie {id}"),
            "overview": "Plot",
            "backdrop_path": format!("/{id}.jpg"),
            "poster_path": null,
            "genre_ids": [12, 28]
        })).collect::<Vec<_>>(),
        "total_pages": 4,
        "total_results": 80
    })
}

// ── Listings ────────────────────────────────────────────────────

#[tokio::test]
async fn now_playing_decodes_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/now_playing"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[1, 2, 3])))
        .expect(1)
        .mount(&server)
        .await;

    let list = client_for(&server).now_playing().await.unwrap();
    assert_eq!(list.item_count(), 3);
    assert_eq!(list.items[0].id, EntityId::new(1));
    assert_eq!(list.items[0].backdrop_path.as_deref(), Some("/1.jpg"));
    assert_eq!(list.total_pages, 4);
    assert_eq!(list.total_results, 80);
}

#[tokio::test]
async fn tv_listing_reads_name_as_title() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/tv/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [{"id": 9, "name": "Show", "overview": "", "backdrop_path": null, "genre_ids": []}],
            "total_pages": 1,
            "total_results": 1
        })))
        .mount(&server)
        .await;

    let list = client_for(&server).popular().await.unwrap();
    assert_eq!(list.items[0].title, "Show");
}

#[tokio::test]
async fn every_listing_hits_its_endpoint() {
    let server = MockServer::start().await;
    for category in Category::ALL {
        Mock::given(method("GET"))
            .and(path(format!("/3/{}", category.endpoint())))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[7])))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    client.now_playing().await.unwrap();
    client.top_rated().await.unwrap();
    client.upcoming().await.unwrap();
    client.airing_today().await.unwrap();
    client.popular().await.unwrap();
    client.tv_top_rated().await.unwrap();
    client.search("x").await.unwrap();
}

#[tokio::test]
async fn search_sends_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("query", "star wars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[11])))
        .expect(1)
        .mount(&server)
        .await;

    let list = client_for(&server).search("star wars").await.unwrap();
    assert_eq!(list.items[0].id, EntityId::new(11));
}

// ── Failures ────────────────────────────────────────────────────

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/upcoming"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let err = client_for(&server).upcoming().await.unwrap_err();
    assert!(matches!(err, CatalogError::Decode(_)));
}

#[tokio::test]
async fn non_json_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/top_rated"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).top_rated().await.unwrap_err();
    assert!(matches!(err, CatalogError::Decode(_)));
}

#[tokio::test]
async fn rejected_key_uses_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/tv/airing_today"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status_code": 7,
            "status_message": "Invalid API key: You must be granted a valid key."
        })))
        .mount(&server)
        .await;

    match client_for(&server).airing_today().await.unwrap_err() {
        CatalogError::Api { status, message } => {
            assert_eq!(status, 401);
            assert!(message.starts_with("Invalid API key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    drop(server);

    let err = client.now_playing().await.unwrap_err();
    assert!(matches!(err, CatalogError::Network(_)));
}
