use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{RecommendationRequest, RecommendationResponse},
    routes::AppState,
    services::recommendations,
};

/// Handler for the content-based recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<RecommendationResponse>>> {
    tracing::info!(
        request_id = %request_id,
        seed_count = request.movie_ids.len(),
        "Processing recommendation request"
    );

    let response = recommendations::recommend_for_ids(
        state.catalog.clone(),
        &state.fetch,
        &state.recommender,
        request.movie_ids,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        returned = response.len(),
        "Recommendations completed"
    );

    Ok(Json(response))
}
