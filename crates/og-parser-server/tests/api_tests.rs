//! Integration tests for the HTTP parse API, driven through the router
//! with in-memory fetchers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use og_parser_server::fetch::Fetcher;
use og_parser_server::transport::{router, AppState};
use og_parser_server::types::{ServerError, ServerResult};

// ─────────────────────── helpers ───────────────────────

/// Serves canned HTML by URL; unknown URLs fail like an unreachable host.
struct StaticFetcher {
    pages: HashMap<String, String>,
}

impl StaticFetcher {
    fn with_page(url: &str, html: &str) -> Self {
        let mut pages = HashMap::new();
        pages.insert(url.to_string(), html.to_string());
        Self { pages }
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> ServerResult<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ServerError::Retrieval(format!("connection refused: {url}")))
    }
}

fn app(fetcher: StaticFetcher) -> axum::Router {
    router(Arc::new(AppState::new(Arc::new(fetcher))))
}

fn empty_app() -> axum::Router {
    app(StaticFetcher {
        pages: HashMap::new(),
    })
}

fn parse_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/parse")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send a request through the router and return status plus JSON body.
async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

const ARTICLE: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <title>Page Title</title>
  <meta property="og:title" content="Hi">
  <meta name="twitter:card" content="summary">
</head>
<body>
  <img src="https://x.com/a.jpg">
  <img src="not a url">
</body>
</html>"#;

// ═══════════════════════════════════════════════════════
// SUCCESS
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_parse_success_envelope() {
    let app = app(StaticFetcher::with_page("https://x.com/post", ARTICLE));
    let (status, body) = send(app, parse_request(json!({ "url": "https://x.com/post" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Success");
    assert_eq!(
        body["tags"],
        json!({
            "og:title": "Hi",
            "og:type": "website",
            "og:image": ["https://x.com/a.jpg"],
            "og:locale": "fr",
            "twitter:card": "summary",
        })
    );

    let tried = body["triedToParse"].as_array().unwrap();
    assert_eq!(tried.len(), 11);
    assert_eq!(tried[0], "og:title");
    assert_eq!(tried[7], "og:image:secure_url");
    assert_eq!(tried[10], "twitter:creator");
}

#[tokio::test]
async fn test_tags_keep_declaration_order() {
    let app = app(StaticFetcher::with_page("https://x.com/post", ARTICLE));
    let response = app
        .oneshot(parse_request(json!({ "url": "https://x.com/post" })))
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    let title = text.find("\"og:title\"").unwrap();
    let kind = text.find("\"og:type\"").unwrap();
    let image = text.find("\"og:image\"").unwrap();
    let card = text.find("\"twitter:card\"").unwrap();
    assert!(title < kind && kind < image && image < card);
}

#[tokio::test]
async fn test_page_without_metadata() {
    let url = "http://bare.example.com/";
    let app = app(StaticFetcher::with_page(url, "<html></html>"));
    let (status, body) = send(app, parse_request(json!({ "url": url }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tags"], json!({ "og:type": "website", "og:image": [] }));
    assert_eq!(body["triedToParse"].as_array().unwrap().len(), 11);
}

// ═══════════════════════════════════════════════════════
// INPUT ERRORS
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_missing_url_is_rejected() {
    let (status, body) = send(empty_app(), parse_request(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "status": 400, "message": "Invalid URL Provided", "error": true })
    );
}

#[tokio::test]
async fn test_invalid_url_is_rejected() {
    for url in ["", "not a url", "/relative", "javascript:alert(1)", "http://localhost/"] {
        let (status, body) = send(empty_app(), parse_request(json!({ "url": url }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "url {url:?}");
        assert_eq!(body["error"], true);
    }
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/parse")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(empty_app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

// ═══════════════════════════════════════════════════════
// SERVER ERRORS AND ROUTING
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_retrieval_failure_is_server_fault() {
    let (status, body) = send(
        empty_app(),
        parse_request(json!({ "url": "https://unreachable.example.com/" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], 502);
    assert_eq!(body["error"], true);
    assert!(body["message"].as_str().unwrap().contains("Retrieval error"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let request = Request::builder()
        .uri("/api/unknown")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(empty_app(), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "status": 404, "message": "Not Found", "error": true })
    );
}

#[tokio::test]
async fn test_wrong_method_is_not_found() {
    let requests = [
        Request::builder().method("GET").uri("/api/parse"),
        Request::builder().method("DELETE").uri("/api/parse"),
        Request::builder().method("POST").uri("/health"),
    ];
    for builder in requests {
        let (status, body) = send(empty_app(), builder.body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "status": 404, "message": "Not Found", "error": true })
        );
    }
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(empty_app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}
