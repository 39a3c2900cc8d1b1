use crate::models::Movie;

use super::{FeatureSet, RecommenderConfig};

const SEPARATOR: &str = " • ";

/// Builds a short justification for recommending `candidate` because of `seed`.
///
/// Clauses are added in a fixed order (directors, genres, themes, rating)
/// and joined with a bullet. Without any clause the generic sentence is used.
pub fn explain(
    candidate: &Movie,
    candidate_features: &FeatureSet,
    seed: &Movie,
    seed_features: &FeatureSet,
    config: &RecommenderConfig,
) -> String {
    let mut clauses = Vec::new();

    let shared_directors: Vec<&str> = candidate_features
        .directors
        .shared_with(&seed_features.directors)
        .map(String::as_str)
        .collect();
    match shared_directors.as_slice() {
        [] => {}
        [director] => clauses.push(format!(
            "Directed by {}, who also directed '{}'",
            director, seed.title
        )),
        many => clauses.push(format!(
            "Shares directors ({}) with '{}'",
            join_names(many),
            seed.title
        )),
    }

    let shared_genres = candidate_features
        .genres
        .intersection(&seed_features.genres)
        .count();
    if shared_genres > 0 {
        clauses.push(format!(
            "Shares {} genre{} with '{}'",
            shared_genres,
            if shared_genres == 1 { "" } else { "s" },
            seed.title
        ));
    }

    let themes: Vec<&str> = candidate_features
        .keywords
        .shared_with(&seed_features.keywords)
        .take(config.max_theme_keywords)
        .map(String::as_str)
        .collect();
    if !themes.is_empty() {
        clauses.push(format!("Similar themes: {}", themes.join(", ")));
    }

    if candidate
        .vote_average
        .is_some_and(|rating| rating >= config.high_rating_threshold)
    {
        clauses.push("Highly rated by audiences".to_string());
    }

    if clauses.is_empty() {
        return format!("Similar to \"{}\" based on content and themes", seed.title);
    }

    clauses.join(SEPARATOR)
}

/// "A and B", "A, B and C"
fn join_names(names: &[&str]) -> String {
    match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} and {}", rest.join(", "), last),
        Some((last, _)) => last.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommender::OrderedSet;

    fn movie(title: &str, rating: Option<f64>) -> Movie {
        Movie {
            id: 1,
            title: title.to_string(),
            vote_average: rating,
            ..Default::default()
        }
    }

    fn features(keywords: &[&str], genres: &[u32], directors: &[&str]) -> FeatureSet {
        FeatureSet {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            genres: genres.iter().copied().collect(),
            directors: directors.iter().map(|d| d.to_string()).collect::<OrderedSet<_>>(),
        }
    }

    #[test]
    fn test_single_shared_director() {
        let config = RecommenderConfig::default();
        let text = explain(
            &movie("Candidate", None),
            &features(&[], &[], &["Jane Doe"]),
            &movie("Seed", None),
            &features(&[], &[], &["Jane Doe"]),
            &config,
        );
        assert_eq!(text, "Directed by Jane Doe, who also directed 'Seed'");
    }

    #[test]
    fn test_multiple_shared_directors() {
        let config = RecommenderConfig::default();
        let text = explain(
            &movie("Cloud Atlas", None),
            &features(&[], &[], &["Lana Wachowski", "Tom Tykwer", "Lilly Wachowski"]),
            &movie("The Matrix", None),
            &features(&[], &[], &["Lilly Wachowski", "Lana Wachowski"]),
            &config,
        );
        assert_eq!(
            text,
            "Shares directors (Lana Wachowski and Lilly Wachowski) with 'The Matrix'"
        );
    }

    #[test]
    fn test_genre_clause_pluralization() {
        let config = RecommenderConfig::default();
        let one = explain(
            &movie("B", None),
            &features(&[], &[80, 9648], &[]),
            &movie("A", None),
            &features(&[], &[80, 18], &[]),
            &config,
        );
        assert_eq!(one, "Shares 1 genre with 'A'");

        let two = explain(
            &movie("B", None),
            &features(&[], &[80, 18], &[]),
            &movie("A", None),
            &features(&[], &[18, 80], &[]),
            &config,
        );
        assert_eq!(two, "Shares 2 genres with 'A'");
    }

    #[test]
    fn test_themes_capped_in_extraction_order() {
        let config = RecommenderConfig::default();
        let text = explain(
            &movie("B", None),
            &features(&["heist", "crew", "vault", "betrayal", "city"], &[], &[]),
            &movie("A", None),
            &features(&["city", "betrayal", "vault", "crew", "heist"], &[], &[]),
            &config,
        );
        assert_eq!(text, "Similar themes: heist, crew, vault");
    }

    #[test]
    fn test_all_clauses_in_fixed_order() {
        let config = RecommenderConfig::default();
        let text = explain(
            &movie("Zodiac", Some(7.5)),
            &features(&["killer", "newspaper"], &[80, 9648], &["David Fincher"]),
            &movie("Se7en", None),
            &features(&["killer", "detectives"], &[80, 53], &["David Fincher"]),
            &config,
        );
        assert_eq!(
            text,
            "Directed by David Fincher, who also directed 'Se7en' • Shares 1 genre with 'Se7en' • Similar themes: killer • Highly rated by audiences"
        );
    }

    #[test]
    fn test_high_rating_alone() {
        let config = RecommenderConfig::default();
        let text = explain(
            &movie("B", Some(8.1)),
            &FeatureSet::default(),
            &movie("A", None),
            &FeatureSet::default(),
            &config,
        );
        assert_eq!(text, "Highly rated by audiences");
    }

    #[test]
    fn test_fallback_sentence() {
        let config = RecommenderConfig::default();
        let text = explain(
            &movie("B", Some(7.4)),
            &features(&["space"], &[878], &["Someone"]),
            &movie("A", None),
            &features(&["romance"], &[10749], &["Someone Else"]),
            &config,
        );
        assert_eq!(text, "Similar to \"A\" based on content and themes");
    }

    #[test]
    fn test_join_names() {
        assert_eq!(join_names(&["A"]), "A");
        assert_eq!(join_names(&["A", "B"]), "A and B");
        assert_eq!(join_names(&["A", "B", "C"]), "A, B and C");
        assert_eq!(join_names(&[]), "");
    }
}
