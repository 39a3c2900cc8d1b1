/// TMDB (The Movie Database) catalog provider
///
/// API Flow:
/// 1. Listings: /trending/movie/week, /movie/popular, /movie/top_rated, /movie/upcoming
/// 2. Details: /movie/{id}?append_to_response=credits,similar,recommendations
/// 3. Genres: /genre/movie/list and /discover/movie?with_genres={id}
/// 4. Search: /search/movie?query=...
///
/// Every response is cached in Redis through the `cached!` macro.
use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{Genre, GenreId, Movie, MovieDetails, MovieId, Page},
    services::catalog::{Listing, MovieCatalog},
};
use reqwest::{Client as HttpClient, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};

const LISTING_CACHE_TTL: u64 = 3600; // 1 hour
const DETAILS_CACHE_TTL: u64 = 86400; // 1 day
const GENRES_CACHE_TTL: u64 = 604800; // 1 week
const SEARCH_CACHE_TTL: u64 = 3600; // 1 hour

const DETAILS_APPEND: &str = "credits,similar,recommendations";

#[derive(Clone)]
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Cache,
}

#[derive(Deserialize)]
struct GenreList {
    #[serde(default)]
    genres: Vec<Genre>,
}

impl TmdbCatalog {
    pub fn new(cache: Cache, api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            cache,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// GET a TMDB path and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let response = self
            .http_client
            .get(self.url(path))
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("TMDB resource {}", path)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, path = %path, "Failed to deserialize TMDB response");
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbCatalog {
    async fn listing(&self, listing: Listing) -> AppResult<Vec<Movie>> {
        cached!(
            self.cache,
            CacheKey::Listing(listing.name()),
            LISTING_CACHE_TTL,
            async move {
                let page: Page<Movie> = self.get_json(listing.path(), &[]).await?;

                tracing::info!(
                    listing = listing.name(),
                    results = page.results.len(),
                    provider = "tmdb",
                    "Listing fetched"
                );

                Ok::<_, AppError>(page.results)
            }
        )
    }

    async fn movie_details(&self, id: MovieId) -> AppResult<MovieDetails> {
        cached!(
            self.cache,
            CacheKey::MovieDetails(id),
            DETAILS_CACHE_TTL,
            async move {
                let details: MovieDetails = self
                    .get_json(
                        &format!("/movie/{}", id),
                        &[("append_to_response", DETAILS_APPEND.to_string())],
                    )
                    .await
                    .map_err(|e| match e {
                        AppError::NotFound(_) => AppError::NotFound(format!("Movie {}", id)),
                        other => other,
                    })?;

                tracing::info!(
                    movie_id = id,
                    similar = details.similar.as_ref().map_or(0, |p| p.results.len()),
                    provider = "tmdb",
                    "Movie details fetched"
                );

                Ok::<_, AppError>(details)
            }
        )
    }

    async fn genres(&self) -> AppResult<Vec<Genre>> {
        cached!(self.cache, CacheKey::Genres, GENRES_CACHE_TTL, async move {
            let list: GenreList = self.get_json("/genre/movie/list", &[]).await?;
            Ok::<_, AppError>(list.genres)
        })
    }

    async fn movies_by_genre(&self, genre_id: GenreId, page: u32) -> AppResult<Page<Movie>> {
        cached!(
            self.cache,
            CacheKey::GenreMovies(genre_id, page),
            LISTING_CACHE_TTL,
            async move {
                self.get_json::<Page<Movie>>(
                    "/discover/movie",
                    &[
                        ("with_genres", genre_id.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await
            }
        )
    }

    async fn search(&self, query: &str, page: u32) -> AppResult<Page<Movie>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        cached!(
            self.cache,
            CacheKey::Search(query.to_string(), page),
            SEARCH_CACHE_TTL,
            async move {
                let results: Page<Movie> = self
                    .get_json(
                        "/search/movie",
                        &[("query", query.trim().to_string()), ("page", page.to_string())],
                    )
                    .await?;

                tracing::info!(
                    query = %query,
                    results = results.results.len(),
                    provider = "tmdb",
                    "Movie search completed"
                );

                Ok::<_, AppError>(results)
            }
        )
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
