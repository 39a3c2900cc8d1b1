use std::collections::HashSet;
use std::hash::Hash;

use super::{FeatureSet, RecommenderConfig};

/// Jaccard index of two sets: |A ∩ B| / |A ∪ B|
///
/// Zero when either set is empty, so two movies that both lack a signal are
/// never rewarded for it.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let shared = a.intersection(b).count();
    let union = a.len() + b.len() - shared;

    shared as f64 / union as f64
}

pub fn keyword_similarity(a: &FeatureSet, b: &FeatureSet) -> f64 {
    jaccard(a.keywords.as_set(), b.keywords.as_set())
}

pub fn genre_similarity(a: &FeatureSet, b: &FeatureSet) -> f64 {
    jaccard(&a.genres, &b.genres)
}

pub fn director_similarity(a: &FeatureSet, b: &FeatureSet) -> f64 {
    jaccard(a.directors.as_set(), b.directors.as_set())
}

/// Weighted combination of keyword, genre and director similarity, in [0, 1]
///
/// Clamped because validated weights may still sum a rounding error above 1.0.
pub fn pair_score(a: &FeatureSet, b: &FeatureSet, config: &RecommenderConfig) -> f64 {
    let score = config.keyword_weight * keyword_similarity(a, b)
        + config.genre_weight * genre_similarity(a, b)
        + config.director_weight * director_similarity(a, b);
    score.clamp(0.0, 1.0)
}
