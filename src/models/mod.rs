use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// TMDB movie identifier
pub type MovieId = u64;

/// TMDB genre identifier
pub type GenreId = u32;

/// A movie as returned by the catalog, either from a listing (trending, search,
/// similar, ...) or from a details lookup.
///
/// Listing records carry `genre_ids`; detail records carry `genres` and,
/// when requested, `credits`. Everything except the id and title is optional
/// so that partially populated records never fail to deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_ids: Option<Vec<GenreId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<Genre>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<Credits>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub original_language: Option<String>,
}

/// Full movie details (`/movie/{id}` with credits, similar and recommendations appended)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar: Option<Page<Movie>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Page<Movie>>,
}

impl MovieDetails {
    /// Movies the catalog considers similar to this one, in catalog order
    pub fn similar_movies(&self) -> Vec<Movie> {
        self.similar
            .as_ref()
            .map(|page| page.results.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// A paginated catalog response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_results: 0,
            total_pages: 0,
        }
    }
}

fn first_page() -> u32 {
    1
}

/// TMDB sends `""` for unknown release dates
fn empty_string_as_none_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Request body for ML recommendations
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub movie_ids: Vec<MovieId>,
}

/// One recommended movie as returned to the client
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub movie: Movie,
    pub explanation: String,
    pub score: f64,
}
