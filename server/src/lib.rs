use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use docsearch_core::{SearchEngine, SearchHit};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    /// Free-text query; an absent parameter is the empty query.
    #[serde(default)]
    pub query: String,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
}

/// Builds the router: `/search` and `/health`, with the web root served
/// from `static_dir` when one is configured.
pub fn build_app(engine: Arc<SearchEngine>, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .with_state(AppState { engine });
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }
    app.layer(TraceLayer::new_for_http()).layer(cors)
}

/// Answers one query with the ranked hits as a bare JSON array. A query
/// that matches nothing is an empty array, never an error.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<SearchHit>> {
    let hits = state.engine.search(&params.query);
    tracing::debug!(query = %params.query, hits = hits.len(), "search served");
    Json(hits)
}
