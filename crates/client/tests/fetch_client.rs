//! Integration tests for FetchClient and the worker over real HTTP.
//!
//! Uses wiremock as the origin server.

use std::sync::Arc;
use std::time::Duration;

use precache_client::{FetchClient, FetchConfig, Network, Source, Worker};
use precache_core::{CACHE_NAME, CacheDb, Error, MANIFEST, Request, canonicalize};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> FetchClient {
    FetchClient::new(FetchConfig::default()).expect("failed to create client")
}

fn get(server: &MockServer, p: &str) -> Request {
    Request::get(canonicalize(&format!("{}{}", server.uri(), p)).unwrap())
}

async fn mount_manifest(server: &MockServer) {
    for p in MANIFEST {
        Mock::given(method("GET"))
            .and(path(*p))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!("asset {p}")))
            .mount(server)
            .await;
    }
}

async fn worker_for(server: &MockServer) -> Worker {
    let db = CacheDb::open_in_memory().await.unwrap();
    Worker::new(db, Arc::new(client()), Url::parse(&server.uri()).unwrap())
}

#[tokio::test]
async fn test_fetch_success_captures_status_headers_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/css/style.css"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("body { color: red; }")
                .insert_header("content-type", "text/css")
                .insert_header("etag", "\"abc123\""),
        )
        .mount(&server)
        .await;

    let response = client().fetch(&get(&server, "/css/style.css")).await.expect("fetch failed");

    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"body { color: red; }");
    assert_eq!(response.content_type(), Some("text/css"));
    assert_eq!(response.header("ETag"), Some("\"abc123\""));
}

#[tokio::test]
async fn test_fetch_non_ok_is_a_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&server)
        .await;

    let response = client().fetch(&get(&server, "/missing")).await.expect("404 should not be an error");
    assert_eq!(response.status, 404);
    assert!(!response.is_ok());
}

#[tokio::test]
async fn test_fetch_uses_request_method() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/save"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let request = Request::new("post", canonicalize(&format!("{}/api/save", server.uri())).unwrap()).unwrap();
    let response = client().fetch(&request).await.unwrap();
    assert_eq!(response.status, 201);
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    let request = Request::get(canonicalize("http://127.0.0.1:1/").unwrap());
    let result = client().fetch(&request).await;
    assert!(matches!(result, Err(Error::Network(_))));
}

#[tokio::test]
async fn test_fetch_too_large() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/roms/game.gb"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 2048]))
        .mount(&server)
        .await;

    let client = FetchClient::new(FetchConfig { max_bytes: Some(1024), ..Default::default() }).unwrap();
    let result = client.fetch(&get(&server, "/roms/game.gb")).await;
    assert!(matches!(result, Err(Error::FetchTooLarge(_))));
}

#[tokio::test]
async fn test_large_responses_pass_through_without_a_cap() {
    let server = MockServer::start().await;
    let big = vec![7u8; 17 * 1024 * 1024];
    Mock::given(method("GET"))
        .and(path("/video.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(big.clone()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/roms/game.gb"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(big.clone()))
        .mount(&server)
        .await;
    mount_manifest(&server).await;

    let worker = worker_for(&server).await;
    assert_eq!(worker.install().await.expect("install failed").stored, 8);

    let rom = worker.request("GET", "/roms/game.gb").unwrap();
    let outcome = worker.handle_fetch(&rom).await.unwrap();
    assert_eq!(outcome.source, Source::Cache);
    assert_eq!(outcome.response.body.len(), big.len());

    let video = worker.request("GET", "/video.mp4").unwrap();
    let outcome = worker.handle_fetch(&video).await.unwrap();
    assert_eq!(outcome.source, Source::Network);
    assert_eq!(outcome.response.body, big);
}

#[tokio::test]
async fn test_fetch_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(1000)))
        .mount(&server)
        .await;

    let client = FetchClient::new(FetchConfig { timeout: Duration::from_millis(100), ..Default::default() }).unwrap();
    let result = client.fetch(&get(&server, "/slow")).await;
    assert!(matches!(result, Err(Error::FetchTimeout(_))));
}

#[tokio::test]
async fn test_install_then_serve_from_cache() {
    let server = MockServer::start().await;
    mount_manifest(&server).await;
    Mock::given(method("GET"))
        .and(path("/unknown.png"))
        .respond_with(ResponseTemplate::new(200).set_body_string("png"))
        .expect(2)
        .mount(&server)
        .await;

    let worker = worker_for(&server).await;
    let report = worker.install().await.expect("install failed");
    assert_eq!(report.cache_name, CACHE_NAME);
    assert_eq!(report.stored, 8);

    let before = server.received_requests().await.unwrap().len();
    let index = worker.request("GET", "/index.html").unwrap();
    let outcome = worker.handle_fetch(&index).await.unwrap();
    assert_eq!(outcome.source, Source::Cache);
    assert_eq!(outcome.response.body, b"asset /index.html");
    assert_eq!(server.received_requests().await.unwrap().len(), before);

    let unknown = worker.request("GET", "/unknown.png").unwrap();
    for _ in 0..2 {
        let outcome = worker.handle_fetch(&unknown).await.unwrap();
        assert_eq!(outcome.source, Source::Network);
        assert_eq!(outcome.response.body, b"png");
    }
}

#[tokio::test]
async fn test_install_fails_when_origin_unreachable() {
    let worker = {
        let db = CacheDb::open_in_memory().await.unwrap();
        Worker::new(db, Arc::new(client()), Url::parse("http://127.0.0.1:1").unwrap())
    };

    let result = worker.install().await;
    assert!(matches!(result, Err(Error::InstallFailed { .. })));

    let cache = worker.db().open_cache(CACHE_NAME).await.unwrap();
    assert!(cache.keys().await.unwrap().is_empty());
}
