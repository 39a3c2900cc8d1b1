use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use reelmatch_api::{
    config::FetchSettings,
    create_router,
    error::{AppError, AppResult},
    models::{Credits, CrewMember, Genre, GenreId, Movie, MovieDetails, MovieId, Page},
    recommender::RecommenderConfig,
    services::{Listing, MovieCatalog},
    AppState,
};

/// In-memory catalog standing in for TMDB
struct FakeCatalog {
    movies: HashMap<MovieId, MovieDetails>,
}

#[async_trait::async_trait]
impl MovieCatalog for FakeCatalog {
    async fn listing(&self, listing: Listing) -> AppResult<Vec<Movie>> {
        let mut movies: Vec<Movie> = self.movies.values().map(|d| d.movie.clone()).collect();
        movies.sort_by_key(|m| m.id);
        if listing == Listing::TopRated {
            movies.retain(|m| m.vote_average.unwrap_or_default() >= 7.5);
        }
        Ok(movies)
    }

    async fn movie_details(&self, id: MovieId) -> AppResult<MovieDetails> {
        self.movies
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Movie {}", id)))
    }

    async fn genres(&self) -> AppResult<Vec<Genre>> {
        Ok(vec![
            Genre { id: 80, name: "Crime".to_string() },
            Genre { id: 9648, name: "Mystery".to_string() },
        ])
    }

    async fn movies_by_genre(&self, genre_id: GenreId, page: u32) -> AppResult<Page<Movie>> {
        let results: Vec<Movie> = self
            .movies
            .values()
            .map(|d| d.movie.clone())
            .filter(|m| m.genre_ids.iter().flatten().any(|g| *g == genre_id))
            .collect();
        Ok(Page {
            page,
            total_results: results.len() as u64,
            total_pages: 1,
            results,
        })
    }

    async fn search(&self, query: &str, page: u32) -> AppResult<Page<Movie>> {
        let needle = query.to_lowercase();
        let results: Vec<Movie> = self
            .movies
            .values()
            .map(|d| d.movie.clone())
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .collect();
        Ok(Page {
            page,
            total_results: results.len() as u64,
            total_pages: 1,
            results,
        })
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

fn movie(
    id: MovieId,
    title: &str,
    overview: &str,
    genres: &[GenreId],
    director: &str,
    rating: f64,
) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        overview: Some(overview.to_string()),
        genre_ids: Some(genres.to_vec()),
        credits: Some(Credits {
            cast: vec![],
            crew: vec![CrewMember {
                id: id * 10,
                name: director.to_string(),
                job: "Director".to_string(),
                department: Some("Directing".to_string()),
                profile_path: None,
            }],
        }),
        vote_average: Some(rating),
        ..Default::default()
    }
}

fn details(movie: Movie, similar: Vec<Movie>) -> MovieDetails {
    MovieDetails {
        movie,
        similar: Some(Page {
            results: similar,
            ..Default::default()
        }),
        recommendations: None,
    }
}

/// Strips credits the way a TMDB listing would
fn listed(movie: &Movie) -> Movie {
    Movie {
        credits: None,
        ..movie.clone()
    }
}

fn create_test_server() -> TestServer {
    let noir = movie(
        1,
        "Noir City",
        "A detective investigates a murder in a noir city",
        &[80, 18],
        "Jane Doe",
        7.0,
    );
    let harbor = movie(
        2,
        "Harbor Lights",
        "Smugglers work the harbor at night",
        &[80],
        "Sam Poe",
        6.8,
    );
    let mystery = movie(
        3,
        "Mystery Street",
        "A detective solves a murder mystery",
        &[80, 9648],
        "Jane Doe",
        7.9,
    );
    let meadow = movie(
        4,
        "Meadow Song",
        "Farmers celebrate spring harvest festivals",
        &[10402],
        "John Roe",
        6.1,
    );
    let night = movie(
        5,
        "Night Harbor",
        "A detective chases smugglers across the harbor",
        &[80, 53],
        "Sam Poe",
        7.2,
    );

    let mut movies = HashMap::new();
    movies.insert(
        1,
        details(noir.clone(), vec![listed(&mystery), listed(&meadow), listed(&night)]),
    );
    movies.insert(
        2,
        details(harbor.clone(), vec![listed(&night), listed(&mystery)]),
    );
    movies.insert(3, details(mystery, vec![]));
    movies.insert(4, details(meadow, vec![]));
    movies.insert(5, details(night, vec![]));

    let state = Arc::new(AppState {
        catalog: Arc::new(FakeCatalog { movies }),
        fetch: FetchSettings::default(),
        recommender: RecommenderConfig::default(),
    });

    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let id = "6f1c3a52-8a8e-4a55-9a55-0c6d1f2b9d11";

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_listings() {
    let server = create_test_server();

    let response = server.get("/api/movies/trending").await;
    response.assert_status_ok();
    let movies: Vec<Value> = response.json();
    assert_eq!(movies.len(), 5);

    let response = server.get("/api/movies/top-rated").await;
    response.assert_status_ok();
    let movies: Vec<Value> = response.json();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["title"], "Mystery Street");
}

#[tokio::test]
async fn test_movie_details_and_not_found() {
    let server = create_test_server();

    let response = server.get("/api/movies/1").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["title"], "Noir City");
    assert_eq!(body["credits"]["crew"][0]["job"], "Director");
    assert_eq!(body["similar"]["results"].as_array().unwrap().len(), 3);

    let response = server.get("/api/movies/999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Movie 999");
}

#[tokio::test]
async fn test_similar_movies() {
    let server = create_test_server();
    let response = server.get("/api/movies/2/similar").await;
    response.assert_status_ok();

    let movies: Vec<Value> = response.json();
    let ids: Vec<u64> = movies.iter().map(|m| m["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![5, 3]);
}

#[tokio::test]
async fn test_genres_and_genre_movies() {
    let server = create_test_server();

    let response = server.get("/api/genres").await;
    response.assert_status_ok();
    let genres: Vec<Value> = response.json();
    assert_eq!(genres.len(), 2);

    let response = server.get("/api/genres/9648/movies").add_query_param("page", 2).await;
    response.assert_status_ok();
    let page: Value = response.json();
    assert_eq!(page["page"], 2);
    assert_eq!(page["results"][0]["title"], "Mystery Street");
}

#[tokio::test]
async fn test_search_requires_query() {
    let server = create_test_server();

    let response = server.get("/api/search").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.get("/api/search").add_query_param("q", "   ").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.get("/api/search").add_query_param("q", "harbor").await;
    response.assert_status_ok();
    let page: Value = response.json();
    assert_eq!(page["results"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_recommendations_ranked_with_explanations() {
    let server = create_test_server();

    let response = server
        .post("/api/recommendations/ml")
        .json(&json!({ "movieIds": [1] }))
        .await;
    response.assert_status_ok();

    let recs: Vec<Value> = response.json();
    let ids: Vec<u64> = recs.iter().map(|r| r["movie"]["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![3, 5, 4]);

    assert_eq!(
        recs[0]["explanation"],
        "Directed by Jane Doe, who also directed 'Noir City' • Shares 1 genre with 'Noir City' • Similar themes: detective, murder • Highly rated by audiences"
    );
    assert_eq!(
        recs[2]["explanation"],
        "Similar to \"Noir City\" based on content and themes"
    );
    assert_eq!(recs[2]["score"], 0.0);
    assert!(recs[0]["movie"].get("credits").is_none());
}

#[tokio::test]
async fn test_recommendations_deduplicate_across_seeds() {
    let server = create_test_server();

    let response = server
        .post("/api/recommendations/ml")
        .json(&json!({ "movieIds": [1, 2] }))
        .await;
    response.assert_status_ok();

    let recs: Vec<Value> = response.json();
    let ids: Vec<u64> = recs.iter().map(|r| r["movie"]["id"].as_u64().unwrap()).collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(ids[0], 5);

    // Night Harbor matches Harbor Lights best (same director, shared themes)
    assert!(recs[0]["explanation"]
        .as_str()
        .unwrap()
        .starts_with("Directed by Sam Poe, who also directed 'Harbor Lights'"));

    let scores: Vec<f64> = recs.iter().map(|r| r["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_recommendations_reject_empty_seed_list() {
    let server = create_test_server();

    let response = server
        .post("/api/recommendations/ml")
        .json(&json!({ "movieIds": [] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("At least one movie id"));
}

#[tokio::test]
async fn test_recommendations_unknown_seed() {
    let server = create_test_server();

    let response = server
        .post("/api/recommendations/ml")
        .json(&json!({ "movieIds": [1, 404] }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}
