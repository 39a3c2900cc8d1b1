use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::{
    config::FetchSettings,
    error::{AppError, AppResult},
    models::{Movie, MovieDetails, MovieId, RecommendationResponse},
    recommender::{self, RecommenderConfig},
    services::{catalog::MovieCatalog, retry::with_retry},
};

/// Generates content-based recommendations for a list of seed movie ids
///
/// Fetches full details for every seed (credits included), takes each seed's
/// "similar movies" as its candidate pool, hydrates the candidates with their
/// own credits so director overlap can be scored, then runs the ranking
/// engine. Any seed that cannot be fetched fails the whole request.
pub async fn recommend_for_ids(
    catalog: Arc<dyn MovieCatalog>,
    settings: &FetchSettings,
    config: &RecommenderConfig,
    movie_ids: Vec<MovieId>,
) -> AppResult<Vec<RecommendationResponse>> {
    if movie_ids.is_empty() {
        return Err(AppError::InvalidInput(
            "At least one movie id is required".to_string(),
        ));
    }
    if movie_ids.len() > settings.max_seed_movies {
        return Err(AppError::InvalidInput(format!(
            "At most {} movie ids are accepted, got {}",
            settings.max_seed_movies,
            movie_ids.len()
        )));
    }

    let seed_details = fetch_details_batch(catalog.clone(), settings, movie_ids)
        .await
        .into_iter()
        .collect::<AppResult<Vec<MovieDetails>>>()?;

    let pools: Vec<Vec<Movie>> = seed_details.iter().map(MovieDetails::similar_movies).collect();
    let seeds: Vec<Movie> = seed_details.into_iter().map(|d| d.movie).collect();

    let pools = if settings.hydrate_candidates {
        hydrate_candidates(catalog.clone(), settings, &seeds, pools).await
    } else {
        pools
    };

    tracing::info!(
        provider = catalog.name(),
        seeds = seeds.len(),
        candidates = pools.iter().map(Vec::len).sum::<usize>(),
        "Ranking candidates"
    );

    let ranked = recommender::recommend(&seeds, &pools, config)?;

    Ok(ranked
        .into_iter()
        .map(|rec| RecommendationResponse {
            movie: Movie {
                credits: None,
                ..rec.movie
            },
            explanation: rec.explanation,
            score: rec.score,
        })
        .collect())
}

/// Fetches details for many movies in parallel, bounded by the configured
/// concurrency. Results come back in input order.
async fn fetch_details_batch(
    catalog: Arc<dyn MovieCatalog>,
    settings: &FetchSettings,
    ids: Vec<MovieId>,
) -> Vec<AppResult<MovieDetails>> {
    let permits = Arc::new(Semaphore::new(settings.concurrency));
    let mut tasks = Vec::with_capacity(ids.len());

    for id in ids {
        let catalog = catalog.clone();
        let permits = permits.clone();
        let retry = settings.retry.clone();

        let task = tokio::spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?;
            with_retry(&retry, "movie_details", || catalog.movie_details(id)).await
        });
        tasks.push(task);
    }

    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        results.push(match task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Task join error");
                Err(AppError::Internal(e.to_string()))
            }
        });
    }

    results
}

/// Replaces lightweight candidate records with full details where possible
///
/// Candidates that are also seeds reuse the seed record. A candidate whose
/// details cannot be fetched keeps its listing record; its missing crew just
/// scores zero on director overlap.
async fn hydrate_candidates(
    catalog: Arc<dyn MovieCatalog>,
    settings: &FetchSettings,
    seeds: &[Movie],
    pools: Vec<Vec<Movie>>,
) -> Vec<Vec<Movie>> {
    let mut hydrated: HashMap<MovieId, Movie> =
        seeds.iter().map(|seed| (seed.id, seed.clone())).collect();

    let mut seen = HashSet::new();
    let missing: Vec<MovieId> = pools
        .iter()
        .flatten()
        .map(|movie| movie.id)
        .filter(|id| !hydrated.contains_key(id) && seen.insert(*id))
        .collect();

    let results = fetch_details_batch(catalog, settings, missing.clone()).await;

    let mut failures = 0usize;
    for (id, result) in missing.into_iter().zip(results) {
        match result {
            Ok(details) => {
                hydrated.insert(id, details.movie);
            }
            Err(e) => {
                failures += 1;
                tracing::warn!(movie_id = id, error = %e, "Candidate hydration failed");
            }
        }
    }

    if failures > 0 {
        tracing::warn!(failures, "Some candidates were ranked without full details");
    }

    pools
        .into_iter()
        .map(|pool| {
            pool.into_iter()
                .map(|movie| hydrated.get(&movie.id).cloned().unwrap_or(movie))
                .collect()
        })
        .collect()
}
