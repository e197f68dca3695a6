//! One "rank memories for a query" capability over both retrieval paths.
//!
//! [`RecallStrategy::Lexical`] ranks the memory list carried in the request with
//! the blended lexical score. [`RecallStrategy::Semantic`] ignores that list and
//! asks a [`MemoryStore`] to search the entity's partition by embedding. The two
//! formulas are intentionally different and are never merged.

use anyhow::Result;

use crate::memory::ranking::find_relevant_memories;
use crate::memory::store::MemoryStore;
use crate::memory::types::MemoryEntry;

/// Everything either strategy might need. Each strategy reads only its part.
#[derive(Debug, Clone, Copy)]
pub struct RecallRequest<'a> {
    /// Owner of the memories; used by the semantic strategy.
    pub entity_id: &'a str,
    /// Already-loaded memories; used by the lexical strategy.
    pub memories: &'a [MemoryEntry],
    /// Free-text query fragments, e.g. recent conversation messages.
    pub queries: &'a [String],
    pub limit: Option<usize>,
}

#[derive(Debug, Clone)]
pub enum RecallStrategy {
    /// Term-frequency cosine blended with salience. No embedding call.
    Lexical,
    /// Embedding similarity through the vector index. Salience is ignored.
    Semantic(MemoryStore),
}

impl RecallStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::Semantic(_) => "semantic",
        }
    }

    pub async fn recall(&self, request: &RecallRequest<'_>) -> Result<Vec<MemoryEntry>> {
        if request.limit == Some(0) {
            return Ok(Vec::new());
        }

        let recalled = match self {
            Self::Lexical => find_relevant_memories(request.memories, request.queries, request.limit),
            Self::Semantic(store) => {
                let query = request.queries.join(" ");
                if query.trim().is_empty() {
                    Vec::new()
                } else {
                    store
                        .search_memories(request.entity_id, &query, request.limit)
                        .await?
                }
            }
        };

        tracing::debug!(
            strategy = self.name(),
            entity_id = %request.entity_id,
            recalled = recalled.len(),
            "recall"
        );
        Ok(recalled)
    }
}
