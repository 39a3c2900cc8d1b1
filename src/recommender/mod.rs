//! Content-based recommendation engine
//!
//! Given a set of seed movies and, per seed, a pool of candidate movies, ranks
//! the candidates by how much they share with the seeds (overview keywords,
//! genres, directors) and explains each pick in a short sentence.
//!
//! The engine is synchronous and pure: it never performs I/O and never
//! mutates its inputs. Fetching seeds and candidate pools is the caller's job
//! (see `services::recommendations`).

use serde::Deserialize;
use std::collections::HashSet;

pub mod explanation;
pub mod features;
pub mod pipeline;
pub mod similarity;
pub mod stopwords;

pub use explanation::explain;
pub use features::{extract_features, extract_keywords, FeatureSet, OrderedSet};
pub use pipeline::{recommend, Recommendation};
pub use similarity::{jaccard, pair_score};

/// Errors raised by the recommendation engine
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    #[error("at least one seed movie is required")]
    NoSeeds,

    #[error("expected one candidate pool per seed movie ({seeds} seeds, {pools} pools)")]
    PoolCountMismatch { seeds: usize, pools: usize },

    #[error("invalid recommender weights: {0}")]
    InvalidWeights(String),
}

/// Tuning knobs for scoring and explanations
///
/// Defaults reproduce the reference behavior: keywords 0.4, genres 0.2,
/// directors 0.4, five results, three theme keywords per explanation and a
/// 7.5 rating threshold for the "highly rated" clause.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommenderConfig {
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f64,

    #[serde(default = "default_genre_weight")]
    pub genre_weight: f64,

    #[serde(default = "default_director_weight")]
    pub director_weight: f64,

    /// Maximum number of recommendations returned
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Maximum number of shared keywords listed under "Similar themes"
    #[serde(default = "default_max_theme_keywords")]
    pub max_theme_keywords: usize,

    /// Candidates rated at or above this get the "Highly rated" clause
    #[serde(default = "default_high_rating_threshold")]
    pub high_rating_threshold: f64,

    /// Minimum token length kept by the keyword extractor
    #[serde(default = "default_min_keyword_len")]
    pub min_keyword_len: usize,

    #[serde(skip, default = "default_stopwords")]
    pub stopwords: HashSet<String>,
}

fn default_keyword_weight() -> f64 {
    0.4
}

fn default_genre_weight() -> f64 {
    0.2
}

fn default_director_weight() -> f64 {
    0.4
}

fn default_max_results() -> usize {
    5
}

fn default_max_theme_keywords() -> usize {
    3
}

fn default_high_rating_threshold() -> f64 {
    7.5
}

fn default_min_keyword_len() -> usize {
    3
}

fn default_stopwords() -> HashSet<String> {
    stopwords::STOPWORDS.iter().map(|w| w.to_string()).collect()
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            keyword_weight: default_keyword_weight(),
            genre_weight: default_genre_weight(),
            director_weight: default_director_weight(),
            max_results: default_max_results(),
            max_theme_keywords: default_max_theme_keywords(),
            high_rating_threshold: default_high_rating_threshold(),
            min_keyword_len: default_min_keyword_len(),
            stopwords: default_stopwords(),
        }
    }
}

impl RecommenderConfig {
    /// Load overrides from `RECOMMENDER_*` environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let config = envy::prefixed("RECOMMENDER_")
            .from_env::<RecommenderConfig>()
            .map_err(|e| anyhow::anyhow!("Failed to load recommender config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Weights must be non-negative and sum to 1.0 so that scores stay in [0, 1]
    pub fn validate(&self) -> Result<(), RecommendError> {
        let weights = [
            ("keyword", self.keyword_weight),
            ("genre", self.genre_weight),
            ("director", self.director_weight),
        ];

        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(RecommendError::InvalidWeights(format!(
                    "{} weight must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        let sum: f64 = weights.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(RecommendError::InvalidWeights(format!(
                "weights must sum to 1.0, got {}",
                sum
            )));
        }

        Ok(())
    }
}
