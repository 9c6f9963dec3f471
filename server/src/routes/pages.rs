mod components;

use crate::AppState;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use manga_view::DetailView;
use manga_view::ListingView;
use manga_view::ReaderView;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(landing))
        .route("/home", get(home))
        .route("/manga/:id", get(manga_id))
        .route("/manga/:id/read/:chapter", get(manga_id_read_chapter))
}

async fn landing() -> Html<String> {
    Html(self::components::document(
        "Manga Plus",
        false,
        &self::components::landing(),
    ))
}

#[derive(Debug, serde::Deserialize)]
struct HomeParams {
    page: Option<u32>,
    q: Option<String>,
}

async fn home(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<HomeParams>,
) -> Html<String> {
    let view = ListingView::new(app_state.client.clone());
    match params.q.as_deref().filter(|query| !query.trim().is_empty()) {
        Some(query) => view.search(query).await,
        None => view.select_page(params.page.unwrap_or(1)).await,
    }

    let state = view.state();
    app_state.hints.remember_listing(&state.manga);

    Html(self::components::document(
        "Manga Plus",
        true,
        &self::components::listing(&state),
    ))
}

#[derive(Debug, serde::Deserialize)]
struct DetailParams {
    latest: Option<String>,
    order: Option<String>,
}

async fn manga_id(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<DetailParams>,
) -> Html<String> {
    let mut view = DetailView::load(
        &app_state.client,
        &app_state.hints,
        &id,
        params.latest.as_deref(),
    )
    .await;
    view.set_reversed(params.order.as_deref() == Some("desc"));

    Html(self::components::document(
        view.title(),
        true,
        &self::components::detail(&view),
    ))
}

async fn manga_id_read_chapter(
    State(app_state): State<Arc<AppState>>,
    Path((id, chapter)): Path<(String, u32)>,
) -> Html<String> {
    let view = ReaderView::load(&app_state.client, &id, chapter).await;

    Html(self::components::document(
        &format!("Chapter {chapter}"),
        true,
        &self::components::reader(&view),
    ))
}

#[cfg(test)]
mod test {
    use crate::routes::test_util::app_state;
    use crate::routes::test_util::body_text;
    use crate::routes::test_util::get;
    use crate::routes::test_util::spawn_upstream;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get as get_route;
    use axum::Json;
    use axum::Router;
    use serde_json::json;

    fn upstream() -> Router {
        Router::new()
            .route(
                "/api/manga-list/:page",
                get_route(|Path(page): Path<u32>| async move {
                    match page {
                        1 => Json(json!({
                            "pagination": [1, 2, 3, 4],
                            "data": [
                                { "id": "solo-leveling", "title": "Solo Leveling", "imgUrl": "a.jpg", "latestChapter": "chapter-12" },
                                { "id": "one-piece", "title": "One Piece", "imgUrl": null },
                            ],
                        }))
                        .into_response(),
                        2 => Json(json!({ "pagination": [], "data": [] })).into_response(),
                        _ => StatusCode::NOT_FOUND.into_response(),
                    }
                }),
            )
            .route(
                "/api/search/:query",
                get_route(|Path(query): Path<String>| async move {
                    let manga = if query == "one_piece" {
                        json!([{ "id": "one-piece", "title": "One Piece", "imgUrl": "b.jpg" }])
                    } else {
                        json!([])
                    };
                    Json(json!({ "keyword": query, "count": 1, "manga": manga }))
                }),
            )
            .route(
                "/api/manga/:id",
                get_route(|Path(id): Path<String>| async move {
                    match id.as_str() {
                        "solo-leveling" => Json(json!({
                            "title": "Solo Leveling",
                            "author": "Chugong",
                            "updatedAt": 1700000000,
                            "views": 1520000,
                            "latestChapter": "chapter-200",
                        }))
                        .into_response(),
                        "no-chapters" => Json(json!({ "title": "No Chapters" })).into_response(),
                        _ => StatusCode::NOT_FOUND.into_response(),
                    }
                }),
            )
            .route(
                "/api/manga/:id/:chapter",
                get_route(|Path((_id, chapter)): Path<(String, u32)>| async move {
                    match chapter {
                        1 => Json(json!({ "images": ["p1.png", "p2.png", "p3.png"] })),
                        _ => Json(json!({ "title": "nothing here" })),
                    }
                }),
            )
    }

    #[tokio::test]
    async fn landing() {
        let upstream = spawn_upstream(upstream()).await;
        let response = get(app_state(upstream), "/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Your Gateway to Unlimited Manga"));
        assert!(html.contains("href=\"/home\">Start Reading</a>"));
    }

    #[tokio::test]
    async fn home_lists_cards_and_pages() {
        let upstream = spawn_upstream(upstream()).await;
        let app_state = app_state(upstream);
        let html = body_text(get(app_state.clone(), "/home").await).await;

        assert_eq!(html.matches("class=\"manga-card\"").count(), 2);
        assert_eq!(html.matches("class=\"page-button").count(), 4);
        assert!(html.contains("href=\"/manga/solo-leveling?latest=chapter-12\""));
        assert!(html.contains("class=\"page-button active\" href=\"/home\">1</a>"));
        assert!(html.contains("href=\"/home?page=3\">3</a>"));

        // The listing remembers hints for the detail page.
        assert_eq!(
            app_state.hints.recall("solo-leveling").as_deref(),
            Some("chapter-12")
        );
        let html = body_text(get(app_state, "/manga/solo-leveling").await).await;
        assert_eq!(html.matches("class=\"chapter-link\"").count(), 12);
    }

    #[tokio::test]
    async fn home_messages() {
        let upstream = spawn_upstream(upstream()).await;

        let html = body_text(get(app_state(upstream), "/home?page=2").await).await;
        assert!(html.contains("No manga data available at the moment"));
        assert!(!html.contains("class=\"pagination\""));

        let html = body_text(get(app_state(upstream), "/home?page=9").await).await;
        assert!(html.contains(
            "The website is currently unavailable due to an unknown issue. Please try again later."
        ));
    }

    #[tokio::test]
    async fn home_search() {
        let upstream = spawn_upstream(upstream()).await;

        let html = body_text(get(app_state(upstream), "/home?q=one%20piece").await).await;
        assert_eq!(html.matches("class=\"manga-card\"").count(), 1);
        assert!(!html.contains("class=\"pagination\""));
        assert!(html.contains("value=\"one piece\""));

        let html = body_text(get(app_state(upstream), "/home?q=naruto").await).await;
        assert!(html.contains("No results found for your search"));

        let html = body_text(get(app_state(upstream), "/home?q=%20%20").await).await;
        assert_eq!(html.matches("class=\"manga-card\"").count(), 2);
    }

    #[tokio::test]
    async fn detail_chapters() {
        let upstream = spawn_upstream(upstream()).await;

        let html = body_text(
            get(
                app_state(upstream),
                "/manga/solo-leveling?latest=chapter-3&order=desc",
            )
            .await,
        )
        .await;
        assert!(html.contains("<h1>Solo Leveling</h1>"));
        assert!(html.contains("<dt>Author</dt><dd>Chugong</dd>"));
        assert!(html.contains("<dt>Last Updated</dt><dd>1700000000</dd>"));
        assert!(html.contains("<dt>Views</dt><dd>1,520,000</dd>"));
        assert!(html.contains(">Undo reverse</a>"));
        let first = html.find("/manga/solo-leveling/read/3").expect("missing chapter 3");
        let last = html.find("/manga/solo-leveling/read/1").expect("missing chapter 1");
        assert!(first < last);
        assert_eq!(html.matches("class=\"chapter-link\"").count(), 3);

        // Without a hint, the detail payload sizes the list.
        let html = body_text(get(app_state(upstream), "/manga/solo-leveling").await).await;
        assert_eq!(html.matches("class=\"chapter-link\"").count(), 200);
        assert!(html.contains(">Reverse order</a>"));
    }

    #[tokio::test]
    async fn detail_messages() {
        let upstream = spawn_upstream(upstream()).await;

        let html = body_text(get(app_state(upstream), "/manga/no-chapters?latest=latest").await).await;
        assert!(html.contains("No chapters available"));

        let html = body_text(get(app_state(upstream), "/manga/missing").await).await;
        assert!(html.contains("Failed to load manga"));
        assert!(!html.contains("class=\"chapter-link\""));
    }

    #[tokio::test]
    async fn reader_pages() {
        let upstream = spawn_upstream(upstream()).await;

        let html = body_text(get(app_state(upstream), "/manga/solo-leveling/read/1").await).await;
        assert_eq!(html.matches("class=\"page\"").count(), 3);
        let first = html.find("p1.png").expect("missing page 1");
        let last = html.find("p3.png").expect("missing page 3");
        assert!(first < last);
        assert!(html.contains("<span class=\"nav-button disabled\">Previous</span>"));

        let html = body_text(get(app_state(upstream), "/manga/solo-leveling/read/2").await).await;
        assert!(html.contains("No pages found in this chapter"));
        assert!(html.contains("href=\"/manga/solo-leveling/read/1\">Previous</a>"));
        assert!(html.contains("href=\"/manga/solo-leveling/read/3\">Next</a>"));
    }
}
