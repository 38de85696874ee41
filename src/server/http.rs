use std::path::PathBuf;

use axum::{
    handler::HandlerWithoutStateExt,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::ServerConfig;
use crate::server::ws::{self, AppState};

/// Full application router: the event channel plus static pages.
/// Missing files anywhere get the same plain-text 404 as unknown routes.
pub fn router(config: &ServerConfig, state: AppState) -> Router {
    let index_file = config.index_file.clone();
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
        .route("/", get(move || index(index_file.clone())))
        .nest_service(
            "/public",
            ServeDir::new(&config.public_dir).not_found_service(not_found.into_service()),
        )
        .nest_service(
            "/assets",
            ServeDir::new(&config.assets_dir).not_found_service(not_found.into_service()),
        )
        .fallback(not_found)
        // Browsers must always fetch fresh copies
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate, max-age=0"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
}

async fn index(path: PathBuf) -> Response {
    match tokio::fs::read(&path).await {
        Ok(html) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            html,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("cannot read index file {}: {}", path.display(), e);
            not_found().await.into_response()
        }
    }
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "Not Found",
    )
}
