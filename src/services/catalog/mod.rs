/// Movie catalog abstraction
///
/// The catalog is the external metadata source (TMDB in production). Routes
/// proxy it directly and the recommendation orchestrator pulls seed details
/// and candidate pools from it.
use crate::{
    error::AppResult,
    models::{Genre, GenreId, Movie, MovieDetails, MovieId, Page},
};

pub mod tmdb;

pub use tmdb::TmdbCatalog;

/// Curated movie listings exposed by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Trending,
    Popular,
    TopRated,
    Upcoming,
}

impl Listing {
    /// Catalog path for this listing
    pub fn path(&self) -> &'static str {
        match self {
            Listing::Trending => "/trending/movie/week",
            Listing::Popular => "/movie/popular",
            Listing::TopRated => "/movie/top_rated",
            Listing::Upcoming => "/movie/upcoming",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Listing::Trending => "trending",
            Listing::Popular => "popular",
            Listing::TopRated => "top_rated",
            Listing::Upcoming => "upcoming",
        }
    }
}

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// First page of a curated listing
    async fn listing(&self, listing: Listing) -> AppResult<Vec<Movie>>;

    /// Full details of a movie, including credits and similar movies
    async fn movie_details(&self, id: MovieId) -> AppResult<MovieDetails>;

    /// All movie genres known to the catalog
    async fn genres(&self) -> AppResult<Vec<Genre>>;

    /// Movies tagged with a genre
    async fn movies_by_genre(&self, genre_id: GenreId, page: u32) -> AppResult<Page<Movie>>;

    /// Free-text movie search
    async fn search(&self, query: &str, page: u32) -> AppResult<Page<Movie>>;

    /// Movies the catalog considers similar to `id`
    ///
    /// Default implementation reads the `similar` block of the details.
    async fn similar_movies(&self, id: MovieId) -> AppResult<Vec<Movie>> {
        Ok(self.movie_details(id).await?.similar_movies())
    }

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
