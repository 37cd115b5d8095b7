use std::path::Path;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::server::views::{dictionary, hello::hello, simplify::simplify};
use crate::server::AppState;

/// The JSON API alone, without CORS or static files.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/hello", get(hello))
        .route("/api/simplify", post(simplify))
        .route(
            "/api/dictionary",
            get(dictionary::list_entries).post(dictionary::create_entry),
        )
        .route(
            "/api/dictionary/:id",
            put(dictionary::update_entry).delete(dictionary::delete_entry),
        )
}

/// Full application: API, frontend fallback, CORS and request tracing.
pub fn router(state: AppState, server: &ServerConfig) -> Result<Router> {
    let static_dir = Path::new(&server.static_dir);
    // client-side routes resolve to the single-page app's entry document
    let frontend = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Ok(api_router()
        .fallback_service(frontend)
        .layer(cors_layer(&server.allow_origin)?)
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn cors_layer(allow_origin: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(allow_origin)
        .with_context(|| format!("invalid allowed origin: {}", allow_origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}
