use crate::AppState;
use anyhow::Context;
use axum::extract::Path;
use axum::extract::State;
use axum::http::header::ACCESS_CONTROL_ALLOW_METHODS;
use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::Json;
use axum::Router;
use std::sync::Arc;
use tracing::error;
use tracing::info;

#[derive(Debug, serde::Serialize)]
struct ApiError {
    error: &'static str,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/manga-list/:page", get(api_manga_list))
        .route("/manga/:id", get(api_manga_id))
        .route("/manga/:id/:chapter", get(api_manga_id_chapter))
        .route("/search/:query", get(api_search))
}

async fn api_manga_list(
    State(app_state): State<Arc<AppState>>,
    Path(page): Path<String>,
) -> impl IntoResponse {
    forward(&app_state, &["manga-list", &page], "Failed to fetch manga list").await
}

async fn api_manga_id(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    forward(&app_state, &["manga", &id], "Failed to fetch manga").await
}

async fn api_manga_id_chapter(
    State(app_state): State<Arc<AppState>>,
    Path((id, chapter)): Path<(String, String)>,
) -> impl IntoResponse {
    forward(&app_state, &["manga", &id, &chapter], "Failed to fetch chapter").await
}

async fn api_search(
    State(app_state): State<Arc<AppState>>,
    Path(query): Path<String>,
) -> impl IntoResponse {
    forward(&app_state, &["search", &query], "Failed to search manga").await
}

/// Forward a request to the upstream api, once.
///
/// The upstream body is passed through as-is.
/// Any failure becomes a 500 with a fixed message.
async fn forward(app_state: &AppState, segments: &[&str], message: &'static str) -> Response {
    let path = segments.join("/");
    info!("forwarding \"{path}\"");

    let result = app_state
        .client
        .get_raw_json(segments)
        .await
        .with_context(|| format!("failed to forward \"{path}\""))
        .map_err(|error| {
            error!("{error:?}");
            ApiError { error: message }
        });

    match result {
        Ok(body) => (
            StatusCode::OK,
            [
                (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (ACCESS_CONTROL_ALLOW_METHODS, "GET"),
            ],
            Json(body),
        )
            .into_response(),
        Err(error) => (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response(),
    }
}
