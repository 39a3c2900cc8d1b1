use std::collections::HashSet;

use crate::models::Movie;

use super::{explain, extract_features, pair_score, RecommendError, RecommenderConfig};

/// A ranked candidate with its aggregate score and explanation
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub movie: Movie,
    /// Mean similarity to all seeds, in [0, 1]
    pub score: f64,
    pub explanation: String,
}

/// Ranks candidates from all pools against the seed movies.
///
/// `pools[i]` holds the candidates surfaced for `seeds[i]`. Every candidate is
/// scored against every seed; its score is the mean of those similarities and
/// its explanation refers to the single best-matching seed (earliest seed on
/// ties). Candidates are deduplicated by id keeping the highest score, then
/// the top `max_results` are returned in descending score order.
///
/// Seeds are not removed from the candidate pools.
pub fn recommend(
    seeds: &[Movie],
    pools: &[Vec<Movie>],
    config: &RecommenderConfig,
) -> Result<Vec<Recommendation>, RecommendError> {
    if seeds.is_empty() {
        return Err(RecommendError::NoSeeds);
    }
    if seeds.len() != pools.len() {
        return Err(RecommendError::PoolCountMismatch {
            seeds: seeds.len(),
            pools: pools.len(),
        });
    }

    let seed_features: Vec<_> = seeds
        .iter()
        .map(|seed| extract_features(seed, config))
        .collect();

    let mut scored: Vec<Recommendation> = pools
        .iter()
        .flatten()
        .map(|candidate| {
            let features = extract_features(candidate, config);
            let similarities: Vec<f64> = seed_features
                .iter()
                .map(|seed| pair_score(&features, seed, config))
                .collect();

            let score = similarities.iter().sum::<f64>() / similarities.len() as f64;
            let best = best_index(&similarities);

            Recommendation {
                movie: candidate.clone(),
                score,
                explanation: explain(
                    candidate,
                    &features,
                    &seeds[best],
                    &seed_features[best],
                    config,
                ),
            }
        })
        .collect();

    let candidate_count = scored.len();

    // Stable sort: equal scores keep pool order, so dedup stays deterministic.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut seen = HashSet::new();
    let ranked: Vec<Recommendation> = scored
        .into_iter()
        .filter(|rec| seen.insert(rec.movie.id))
        .take(config.max_results)
        .collect();

    tracing::debug!(
        seeds = seeds.len(),
        candidates = candidate_count,
        unique = seen.len(),
        returned = ranked.len(),
        "Recommendations ranked"
    );

    Ok(ranked)
}

/// Index of the largest value, first occurrence wins
fn best_index(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = i;
        }
    }
    best
}
