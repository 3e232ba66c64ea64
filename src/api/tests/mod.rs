use super::*;
use crate::downloader::test_helpers::{
    FakeExtractor, create_test_downloader_with_config, sample_media,
};
use crate::error::ApiError;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::time::Duration;
use tower::ServiceExt; // for oneshot()


/// Helper to create a test VideoDownloader wrapped in Arc
fn create_test_downloader(fake: Arc<FakeExtractor>) -> Arc<VideoDownloader> {
    Arc::new(create_test_downloader_with_config(Config::default(), fake))
}

/// Helper to build the router for a downloader with its own config
fn create_test_router(downloader: Arc<VideoDownloader>) -> Router {
    let config = downloader.get_config();
    create_router(downloader, config)
}

/// POST a JSON body to `uri`
fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_body(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn read_api_error(response: axum::response::Response) -> ApiError {
    serde_json::from_slice(&read_body(response).await).unwrap()
}

#[tokio::test]
async fn test_api_server_spawns() {
    let fake = Arc::new(FakeExtractor::new("abc123", "Test Clip", Vec::new()));
    let downloader = create_test_downloader(fake);

    // Use a random available port for testing
    let mut config = (*downloader.get_config()).clone();
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap(); // Port 0 = OS assigns a free port
    let config = Arc::new(config);

    let api_handle = tokio::spawn({
        let downloader = downloader.clone();
        let config = config.clone();
        async move { start_api_server(downloader, config).await }
    });

    // Give it a moment to start
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!api_handle.is_finished(), "server should still be running");

    api_handle.abort();
}

#[tokio::test]
async fn test_api_server_graceful_shutdown() {
    let fake = Arc::new(FakeExtractor::new("abc123", "Test Clip", Vec::new()));
    let downloader = create_test_downloader(fake);

    let mut config = (*downloader.get_config()).clone();
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap();
    let config = Arc::new(config);

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let api_handle = tokio::spawn(start_api_server_with_shutdown(
        downloader,
        config,
        async move {
            rx.await.ok();
        },
    ));

    tokio::time::sleep(Duration::from_millis(100)).await;
    tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), api_handle)
        .await
        .expect("server should stop after the shutdown signal")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_bind_failure_is_io_error() {
    let fake = Arc::new(FakeExtractor::new("abc123", "Test Clip", Vec::new()));
    let downloader = create_test_downloader(fake);

    // Hold a port so the server cannot bind it
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let mut config = (*downloader.get_config()).clone();
    config.server.api.bind_address = taken.local_addr().unwrap();

    let result = start_api_server(downloader, Arc::new(config)).await;
    assert!(matches!(result, Err(crate::error::Error::Io(_))));
}

#[tokio::test]
async fn test_spawn_api_server_method() {
    let fake = Arc::new(FakeExtractor::new("abc123", "Test Clip", Vec::new()));
    let mut config = Config::default();
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap();
    let downloader = Arc::new(create_test_downloader_with_config(config, fake));

    let api_handle = downloader.spawn_api_server();

    tokio::time::sleep(Duration::from_millis(100)).await;
    api_handle.abort();
}

#[tokio::test]
async fn test_cors_enabled() {
    let fake = Arc::new(FakeExtractor::new("abc123", "Test Clip", Vec::new()));
    let downloader = create_test_downloader(fake);

    let mut config = (*downloader.get_config()).clone();
    config.server.api.cors_enabled = true;
    config.server.api.cors_origins = vec!["*".to_string()];
    let app = create_router(downloader, Arc::new(config));

    let request = Request::builder()
        .uri("/api/v1/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert!(
        headers.contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
    let exposed = headers
        .get("access-control-expose-headers")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    assert!(exposed.contains("x-download-filename"));
}

#[tokio::test]
async fn test_cors_disabled() {
    let fake = Arc::new(FakeExtractor::new("abc123", "Test Clip", Vec::new()));
    let downloader = create_test_downloader(fake);

    let mut config = (*downloader.get_config()).clone();
    config.server.api.cors_enabled = false;
    config.server.api.cors_origins = vec!["*".to_string()];
    let app = create_router(downloader, Arc::new(config));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("Origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_cors_specific_origin() {
    let fake = Arc::new(FakeExtractor::new("abc123", "Test Clip", Vec::new()));
    let downloader = create_test_downloader(fake);

    let mut config = (*downloader.get_config()).clone();
    config.server.api.cors_enabled = true;
    config.server.api.cors_origins = vec!["http://allowed.example".to_string()];
    let app = create_router(downloader, Arc::new(config));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("Origin", "http://allowed.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://allowed.example"
    );
}

#[tokio::test]
async fn test_default_config_rejects_foreign_origin() {
    let fake = Arc::new(FakeExtractor::new("abc123", "Test Clip", sample_media()));
    let downloader = create_test_downloader(fake);
    let app = create_test_router(downloader);

    let preflight = app
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/v1/downloads")
                .header("Origin", "https://evil.example")
                .header("Access-Control-Request-Method", "POST")
                .header("Access-Control-Request-Headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(
        !preflight
            .headers()
            .contains_key("access-control-allow-origin")
    );

    let mut request = post_json("/api/v1/downloads", r#"{"url": "http://192.168.1.1/admin"}"#);
    request
        .headers_mut()
        .insert("origin", "https://evil.example".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();
    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[tokio::test]
async fn test_cors_empty_origin_list_allows_none() {
    let fake = Arc::new(FakeExtractor::new("abc123", "Test Clip", Vec::new()));
    let downloader = create_test_downloader(fake);

    let mut config = (*downloader.get_config()).clone();
    config.server.api.cors_enabled = true;
    config.server.api.cors_origins = Vec::new();
    let app = create_router(downloader, Arc::new(config));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("Origin", "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_swagger_ui_toggle() {
    let fake = Arc::new(FakeExtractor::new("abc123", "Test Clip", Vec::new()));
    let downloader = create_test_downloader(fake);

    let app = create_test_router(downloader.clone());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut config = (*downloader.get_config()).clone();
    config.server.api.swagger_ui = false;
    let app = create_router(downloader, Arc::new(config));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
