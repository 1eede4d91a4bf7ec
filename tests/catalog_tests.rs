//! 目录 API 客户端测试

use cinesearch::domain::error::CsError;
use cinesearch::domain::model::ListKind;
use cinesearch::domain::traits::Catalog;
use cinesearch::infrastructure::config::CatalogConfig;
use cinesearch::infrastructure::network::catalog::TmdbCatalog;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog(server: &MockServer) -> TmdbCatalog {
    let config = CatalogConfig {
        base_url: server.uri(),
        token: Some("test-token".to_string()),
        language: "en-US".to_string(),
    };
    TmdbCatalog::new(reqwest::Client::new(), config)
}

#[tokio::test]
async fn test_search_sends_bearer_and_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("query", "Inception"))
        .and(query_param("page", "1"))
        .and(query_param("include_adult", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [
                {"id": 27205, "title": "Inception", "vote_average": 8.4, "release_date": "2010-07-15"},
                {"id": 64956, "title": "Inception: The Cobol Job"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let movies = catalog(&server).search("Inception").await.unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].id, Some(27205));
    assert_eq!(movies[0].rating, 8.4);
    assert_eq!(movies[1].overview, "No overview available");
}

#[tokio::test]
async fn test_search_error_carries_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status_code": 7,
            "status_message": "Invalid API key: You must be granted a valid key."
        })))
        .mount(&server)
        .await;

    let err = catalog(&server).search("Inception").await.unwrap_err();
    match err {
        CsError::Api(message) => {
            assert!(message.contains("401"));
            assert!(message.contains("Invalid API key"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_search_error_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = catalog(&server).search("Inception").await.unwrap_err();
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_list_uses_kind_and_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/now_playing"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 1, "title": "Fresh"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let movies = catalog(&server)
        .list(ListKind::NowPlaying, 2)
        .await
        .unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Fresh");
}

#[tokio::test]
async fn test_details_enriches_trailer_and_certification() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/27205"))
        .and(query_param("append_to_response", "videos,release_dates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 27205,
            "title": "Inception",
            "runtime": 148,
            "budget": 160000000,
            "popularity": 120.5,
            "genres": [{"id": 28, "name": "Action"}],
            "production_companies": [{"id": 923, "name": "Legendary Pictures"}],
            "videos": {"results": [{"key": "YoHD9XEInc0", "site": "YouTube", "type": "Trailer"}]},
            "release_dates": {"results": [
                {"iso_3166_1": "US", "release_dates": [{"certification": "PG-13"}]}
            ]}
        })))
        .mount(&server)
        .await;

    let movie = catalog(&server).details(27205).await.unwrap();
    assert_eq!(movie.runtime, 148);
    assert_eq!(movie.genres, vec!["Action"]);
    assert_eq!(movie.production_companies, vec!["Legendary Pictures"]);
    assert_eq!(movie.trailer.as_deref(), Some("YoHD9XEInc0"));
    assert_eq!(movie.rating_classification.as_deref(), Some("PG-13"));
    assert_eq!(movie.popularity_tier.as_deref(), Some("blockbuster"));
}

#[tokio::test]
async fn test_details_tolerate_incomplete_extras() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/680"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 680,
            "title": "Pulp Fiction",
            "runtime": 154,
            "videos": {"results": [{"site": "YouTube", "type": "Trailer"}]},
            "release_dates": {"results": [{"release_dates": [{"certification": "R"}]}]}
        })))
        .mount(&server)
        .await;

    let movie = catalog(&server).details(680).await.unwrap();
    assert_eq!(movie.title, "Pulp Fiction");
    assert_eq!(movie.runtime, 154);
    assert_eq!(movie.trailer, None);
    assert_eq!(movie.rating_classification, None);
}
