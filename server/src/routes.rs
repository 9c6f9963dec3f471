mod api;
mod pages;

use crate::AppState;
use crate::Config;
use anyhow::Context;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get_service;
use axum::Router;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::DefaultMakeSpan;
use tower_http::trace::DefaultOnFailure;
use tower_http::trace::DefaultOnRequest;
use tower_http::trace::DefaultOnResponse;
use tower_http::trace::TraceLayer;

pub fn routes(config: &Config, app_state: Arc<AppState>) -> anyhow::Result<Router> {
    let mut router = app_router(app_state);

    if let Some(public_directory) = config.public_directory.as_ref() {
        let static_file_dir = std::fs::canonicalize(public_directory)
            .context("failed to canonicalize static file dir")?;
        let serve_dir = get_service(ServeDir::new(static_file_dir)).handle_error(server_error);
        router = router.fallback_service(serve_dir);
    }

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(
            DefaultMakeSpan::new()
                .level(tracing::Level::INFO)
                .include_headers(config.logging.include_headers),
        )
        .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
        .on_response(DefaultOnResponse::new().level(tracing::Level::INFO))
        .on_failure(DefaultOnFailure::new().level(tracing::Level::ERROR));

    Ok(router.layer(trace_layer))
}

/// The api and page routes, without static files or tracing
fn app_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", self::api::routes())
        .merge(self::pages::routes())
        .with_state(app_state)
}

async fn server_error(_err: std::convert::Infallible) -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
}
