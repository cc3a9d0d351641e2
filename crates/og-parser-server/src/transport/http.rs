//! HTTP transport: the parse API, /health, and the not-found fallback.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::{get, post},
    Router,
};
use og_parser::{HtmlDocument, MetadataEngine};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::fetch::Fetcher;
use crate::types::{ParseRequest, ParseResponse, ServerError, ServerResult};

/// Shared state passed to all handlers via axum State.
pub struct AppState {
    pub fetcher: Arc<dyn Fetcher>,
    pub engine: MetadataEngine,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            engine: MetadataEngine::new(),
        }
    }
}

/// Build the service router.
///
/// A known path hit with the wrong method answers like an unknown route, so
/// every failure carries the JSON error envelope.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/parse", post(handle_parse).fallback(handle_not_found))
        .route("/health", get(handle_health).fallback(handle_not_found))
        .fallback(handle_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, state: Arc<AppState>) -> ServerResult<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP transport listening on {addr}");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    Ok(())
}

/// Check that the request carries a valid absolute URL.
pub fn validate_request(request: &ParseRequest) -> ServerResult<&str> {
    match request.url.as_deref() {
        Some(url) if og_parser::is_valid_absolute_url(url) => Ok(url),
        _ => Err(ServerError::InvalidInput("Invalid URL Provided".to_string())),
    }
}

/// Fetch `url` and resolve its metadata.
pub async fn parse_url(state: &AppState, url: &str) -> ServerResult<ParseResponse> {
    let html = state.fetcher.fetch(url).await?;
    // The parsed DOM is not Send; keep it inside this synchronous scope.
    let (tags, attempted) = {
        let doc = HtmlDocument::parse(&html);
        state.engine.resolve(&doc)?
    };
    tracing::info!(url, resolved = tags.resolved_fields().len(), "parsed page metadata");
    Ok(ParseResponse::success(tags, attempted))
}

async fn handle_parse(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ParseRequest>, JsonRejection>,
) -> ServerResult<Json<ParseResponse>> {
    let Json(request) =
        body.map_err(|_| ServerError::InvalidInput("Invalid URL Provided".to_string()))?;
    let url = validate_request(&request)?;
    parse_url(&state, url).await.map(Json)
}

/// Health check endpoint.
async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn handle_not_found() -> ServerError {
    ServerError::NotFound
}
