use serde::Deserialize;
use std::time::Duration;

use crate::services::retry::RetryConfig;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Retries per catalog call after the first attempt
    #[serde(default = "default_fetch_max_retries")]
    pub fetch_max_retries: u32,

    /// First retry delay, doubled on each further attempt
    #[serde(default = "default_fetch_initial_backoff_ms")]
    pub fetch_initial_backoff_ms: u64,

    /// Concurrent catalog requests per recommendation call
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,

    /// Largest accepted seed list
    #[serde(default = "default_max_seed_movies")]
    pub max_seed_movies: usize,

    /// Fetch full details (credits) for every candidate before ranking
    #[serde(default = "default_hydrate_candidates")]
    pub hydrate_candidates: bool,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_fetch_max_retries() -> u32 {
    3
}

fn default_fetch_initial_backoff_ms() -> u64 {
    200
}

fn default_fetch_concurrency() -> usize {
    8
}

fn default_max_seed_movies() -> usize {
    10
}

fn default_hydrate_candidates() -> bool {
    true
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Fetch settings used by the recommendation orchestrator
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            retry: RetryConfig {
                max_retries: self.fetch_max_retries,
                initial_backoff: Duration::from_millis(self.fetch_initial_backoff_ms),
                ..Default::default()
            },
            concurrency: self.fetch_concurrency.max(1),
            max_seed_movies: self.max_seed_movies,
            hydrate_candidates: self.hydrate_candidates,
        }
    }
}

/// How the orchestrator talks to the catalog
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub retry: RetryConfig,
    pub concurrency: usize,
    pub max_seed_movies: usize,
    pub hydrate_candidates: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            concurrency: default_fetch_concurrency(),
            max_seed_movies: default_max_seed_movies(),
            hydrate_candidates: default_hydrate_candidates(),
        }
    }
}
