//! Bag-of-words relevance scoring.
//!
//! Tokenization lower-cases the text, splits on every run of characters outside
//! `[a-z0-9]`, and drops empty tokens and [`STOPWORDS`]. This is deliberately
//! ASCII-oriented: text in non-Latin scripts yields few or no tokens.

use std::collections::HashMap;

/// Common English function words excluded from matching.
pub const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Sparse token → occurrence count.
pub type TermFrequency = HashMap<String, u32>;

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Lower-cased `[a-z0-9]` runs of `text`, stopwords removed.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty() && !is_stopword(token))
        .map(str::to_string)
        .collect()
}

/// Count occurrences of each token.
pub fn term_frequency<I>(tokens: I) -> TermFrequency
where
    I: IntoIterator<Item = String>,
{
    let mut counts = TermFrequency::new();
    for token in tokens {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

fn magnitude(vector: &TermFrequency) -> f64 {
    vector
        .values()
        .map(|&count| f64::from(count) * f64::from(count))
        .sum::<f64>()
        .sqrt()
}

/// Cosine similarity of two term-frequency vectors.
///
/// Zero when either side is empty or they share no tokens.
pub fn cosine_similarity(query: &TermFrequency, document: &TermFrequency) -> f64 {
    let dot: f64 = document
        .iter()
        .filter_map(|(token, &count)| {
            query
                .get(token)
                .map(|&q| f64::from(q) * f64::from(count))
        })
        .sum();

    let query_magnitude = magnitude(query);
    let document_magnitude = magnitude(document);
    if dot == 0.0 || query_magnitude == 0.0 || document_magnitude == 0.0 {
        return 0.0;
    }
    dot / (query_magnitude * document_magnitude)
}
