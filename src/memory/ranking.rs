//! Lexical memory ranking.
//!
//! Ranks a caller-supplied memory list against free-text query fragments
//! without any embedding call:
//!
//! ```text
//! score = 0.7 * cosine(tf(query), tf(content + tags)) + 0.3 * salience
//! ```
//!
//! Ties go to the most recently created memory. When the query has no tokens
//! at all (empty, or only stopwords) ranking falls back to salience alone and
//! no memory text is tokenized. That path keeps input order among equal
//! salience.

use std::cmp::Ordering;

use crate::memory::lexical::{cosine_similarity, term_frequency, tokenize};
use crate::memory::types::MemoryEntry;

/// Weight of lexical similarity in the blended score.
pub const SIMILARITY_WEIGHT: f64 = 0.7;
/// Weight of salience in the blended score.
pub const SALIENCE_WEIGHT: f64 = 0.3;
/// Result count when the caller does not pass a limit.
pub const DEFAULT_LIMIT: usize = 10;

/// A memory with the score it was ranked by.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMemory<'a> {
    pub entry: &'a MemoryEntry,
    /// Blended score, or plain salience on the empty-query path.
    pub score: f64,
}

/// `0.7 * similarity + 0.3 * salience`.
pub fn blend_score(similarity: f64, salience: f64) -> f64 {
    SIMILARITY_WEIGHT * similarity + SALIENCE_WEIGHT * salience
}

/// Highest score first, then newest first.
fn by_score_then_recency(a: &ScoredMemory<'_>, b: &ScoredMemory<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.entry.created_at.cmp(&a.entry.created_at))
}

/// Score and order `memories` against `query_texts`, keeping the top `limit`
/// (default [`DEFAULT_LIMIT`]).
pub fn rank_memories<'a, S: AsRef<str>>(
    memories: &'a [MemoryEntry],
    query_texts: &[S],
    limit: Option<usize>,
) -> Vec<ScoredMemory<'a>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    if memories.is_empty() || limit == 0 {
        return Vec::new();
    }

    let joined = query_texts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(" ");
    let query_tokens = tokenize(&joined);
    let salience_only = query_tokens.is_empty();

    let mut scored: Vec<ScoredMemory<'a>> = if salience_only {
        memories
            .iter()
            .map(|entry| ScoredMemory {
                entry,
                score: entry.salience,
            })
            .collect()
    } else {
        let query_vector = term_frequency(query_tokens);
        memories
            .iter()
            .map(|entry| {
                let memory_vector = term_frequency(tokenize(&entry.searchable_text()));
                let similarity = cosine_similarity(&query_vector, &memory_vector);
                ScoredMemory {
                    entry,
                    score: blend_score(similarity, entry.salience),
                }
            })
            .collect()
    };

    if salience_only {
        // Stable: equal salience keeps input order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    } else {
        scored.sort_by(by_score_then_recency);
    }
    scored.truncate(limit);

    tracing::debug!(
        candidates = memories.len(),
        returned = scored.len(),
        salience_only,
        "lexical ranking"
    );
    scored
}

/// The top `limit` memories most relevant to `query_texts`.
pub fn find_relevant_memories<S: AsRef<str>>(
    memories: &[MemoryEntry],
    query_texts: &[S],
    limit: Option<usize>,
) -> Vec<MemoryEntry> {
    rank_memories(memories, query_texts, limit)
        .into_iter()
        .map(|scored| scored.entry.clone())
        .collect()
}
