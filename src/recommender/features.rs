use std::collections::HashSet;
use std::hash::Hash;

use crate::models::{GenreId, Movie};

use super::RecommenderConfig;

/// A set that remembers the order in which items were first inserted
///
/// Lookups go through a hash set; iteration follows insertion order so that
/// anything derived from it (explanations in particular) is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedSet<T: Eq + Hash> {
    items: Vec<T>,
    index: HashSet<T>,
}

impl<T: Eq + Hash + Clone> OrderedSet<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// Inserts the item unless already present; returns whether it was added
    pub fn insert(&mut self, item: T) -> bool {
        if self.index.insert(item.clone()) {
            self.items.push(item);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_set(&self) -> &HashSet<T> {
        &self.index
    }

    /// Items also present in `other`, in this set's order
    pub fn shared_with<'a>(&'a self, other: &'a OrderedSet<T>) -> impl Iterator<Item = &'a T> {
        self.items.iter().filter(move |item| other.contains(item))
    }
}

impl<T: Eq + Hash + Clone> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

/// The derived representation of a movie used for scoring
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    /// Lowercase, stopword-filtered overview tokens
    pub keywords: OrderedSet<String>,
    pub genres: HashSet<GenreId>,
    pub directors: OrderedSet<String>,
}

/// Extracts significant keywords from a free-text overview.
///
/// The text is lowercased and stripped of everything but ASCII word
/// characters and whitespace, then split on whitespace. Short tokens and
/// stopwords are dropped.
pub fn extract_keywords(text: &str, config: &RecommenderConfig) -> OrderedSet<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| token.len() >= config.min_keyword_len)
        .filter(|token| !config.stopwords.contains(*token))
        .map(str::to_string)
        .collect()
}

/// Names of crew members credited with the job "director" (any case)
pub fn extract_directors(movie: &Movie) -> OrderedSet<String> {
    movie
        .credits
        .iter()
        .flat_map(|credits| credits.crew.iter())
        .filter(|member| member.job.eq_ignore_ascii_case("director"))
        .map(|member| member.name.clone())
        .collect()
}

/// Genre ids from `genre_ids` (listing records) and `genres` (detail records)
pub fn extract_genres(movie: &Movie) -> HashSet<GenreId> {
    let listed = movie.genre_ids.iter().flatten().copied();
    let detailed = movie.genres.iter().flatten().map(|genre| genre.id);
    listed.chain(detailed).collect()
}

/// Builds the full feature set of a movie. Missing data yields empty sets.
pub fn extract_features(movie: &Movie, config: &RecommenderConfig) -> FeatureSet {
    FeatureSet {
        keywords: extract_keywords(movie.overview.as_deref().unwrap_or_default(), config),
        genres: extract_genres(movie),
        directors: extract_directors(movie),
    }
}
