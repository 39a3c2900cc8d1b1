use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Genre, GenreId, Movie, MovieDetails, MovieId, Page},
    routes::AppState,
    services::Listing,
};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
    page: Option<u32>,
}

fn page_or_first(page: Option<u32>) -> u32 {
    page.unwrap_or(1).max(1)
}

async fn listing(state: &AppState, listing: Listing) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.catalog.listing(listing).await?;
    Ok(Json(movies))
}

pub async fn trending(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Movie>>> {
    listing(&state, Listing::Trending).await
}

pub async fn popular(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Movie>>> {
    listing(&state, Listing::Popular).await
}

pub async fn top_rated(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Movie>>> {
    listing(&state, Listing::TopRated).await
}

pub async fn upcoming(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Movie>>> {
    listing(&state, Listing::Upcoming).await
}

/// Full movie details, including credits and similar movies
pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MovieId>,
) -> AppResult<Json<MovieDetails>> {
    let details = state.catalog.movie_details(id).await?;
    Ok(Json(details))
}

pub async fn similar(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MovieId>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.catalog.similar_movies(id).await?;
    Ok(Json(movies))
}

pub async fn genres(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.catalog.genres().await?;
    Ok(Json(genres))
}

pub async fn by_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<GenreId>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<Page<Movie>>> {
    let movies = state
        .catalog
        .movies_by_genre(id, page_or_first(params.page))
        .await?;
    Ok(Json(movies))
}

/// Handler for movie search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Page<Movie>>> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Query parameter is required".to_string()))?;

    let results = state
        .catalog
        .search(query, page_or_first(params.page))
        .await?;
    Ok(Json(results))
}
