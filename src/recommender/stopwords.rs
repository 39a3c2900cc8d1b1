/// Common English function words dropped from overviews before keyword matching.
///
/// Tokens of two characters or fewer are discarded before this list is
/// consulted, so the short entries only matter if that cutoff is lowered.
pub const STOPWORDS: &[&str] = &[
    "a", "about", "after", "again", "against", "all", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "between", "both", "but", "by", "can", "could",
    "did", "do", "does", "down", "during", "each", "for", "from", "had", "has", "have", "he",
    "her", "here", "him", "his", "how", "into", "is", "it", "its", "just", "more", "most", "must",
    "not", "now", "off", "only", "other", "our", "out", "over", "she", "should", "some", "such",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "those",
    "through", "too", "under", "very", "was", "were", "what", "when", "where", "which", "while",
    "who", "why", "will", "with", "would", "you", "your",
];
