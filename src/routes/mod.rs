use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::FetchSettings,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    recommender::RecommenderConfig,
    services::MovieCatalog,
};

pub mod movies;
pub mod recommendations;

/// Shared application state
pub struct AppState {
    pub catalog: Arc<dyn MovieCatalog>,
    pub fetch: FetchSettings,
    pub recommender: RecommenderConfig,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies/trending", get(movies::trending))
        .route("/movies/popular", get(movies::popular))
        .route("/movies/top-rated", get(movies::top_rated))
        .route("/movies/upcoming", get(movies::upcoming))
        .route("/movies/:id", get(movies::details))
        .route("/movies/:id/similar", get(movies::similar))
        .route("/genres", get(movies::genres))
        .route("/genres/:id/movies", get(movies::by_genre))
        .route("/search", get(movies::search))
        .route("/recommendations/ml", post(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
