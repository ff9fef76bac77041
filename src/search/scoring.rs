//! Relevance scoring for free-text queries.
//!
//! Scoring:
//! - +100 when the whole query is a substring of the text
//! - +10 per query word found anywhere in the text
//! - +5 per (query word, text word) pair where one is a prefix of the other
//! - x1.5 on the accumulated score when the text contains "title" or "name"
//!
//! Both sides are lower-cased first. An empty or whitespace-only query scores 0.

/// Added when the full query occurs in the text
pub const EXACT_MATCH_WEIGHT: f64 = 100.0;

/// Added per query word occurring in the text
pub const WORD_MATCH_WEIGHT: f64 = 10.0;

/// Added per text word sharing a prefix relation with a query word
pub const PREFIX_MATCH_WEIGHT: f64 = 5.0;

/// Multiplier applied when the text mentions a field-name marker
pub const FIELD_NAME_BOOST: f64 = 1.5;

// Matched against the text, not the field a word came from.
const FIELD_NAME_MARKERS: [&str; 2] = ["title", "name"];

/// Score `searchable_text` against a raw user query.
///
/// Returns 0.0 when nothing matches; callers drop such candidates.
pub fn score(searchable_text: &str, query: &str) -> f64 {
    if query.trim().is_empty() {
        return 0.0;
    }

    let text = searchable_text.to_lowercase();
    let query = query.to_lowercase();
    let mut score = 0.0;

    if text.contains(query.as_str()) {
        score += EXACT_MATCH_WEIGHT;
    }

    let text_words: Vec<&str> = text.split_whitespace().collect();

    for word in query.split_whitespace() {
        if text.contains(word) {
            score += WORD_MATCH_WEIGHT;
        }

        let prefix_matches = text_words
            .iter()
            .filter(|text_word| word.starts_with(**text_word) || text_word.starts_with(word))
            .count();
        score += PREFIX_MATCH_WEIGHT * prefix_matches as f64;
    }

    if FIELD_NAME_MARKERS.iter().any(|marker| text.contains(marker)) {
        score *= FIELD_NAME_BOOST;
    }

    score
}
