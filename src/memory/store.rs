//! Embedding-backed memory stores.
//!
//! A [`MemoryStore`] bridges one entity kind (characters or universes) to the
//! shared [`VectorIndex`]. Each entity gets its own partition, named
//! `"<kind>:<entity_id>"`. Adding a memory embeds its content and upserts it;
//! searching embeds the query and returns entries in similarity order.
//!
//! Salience plays no part in this path. Blending salience with relevance is the
//! lexical ranker's job (see [`crate::memory::ranking`]).

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::embedding::EmbeddingProvider;
use crate::memory::index::{Partition, QueryOptions, VectorIndex, VectorRecord};
use crate::memory::types::{EntityKind, MemoryEntry, NewMemory};

/// Payload stored alongside each vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryMetadata {
    pub entity_id: String,
    pub entry: MemoryEntry,
}

/// The index type shared by every memory store in the process.
pub type MemoryIndex = VectorIndex<MemoryMetadata>;

/// Entity-scoped memory store over a shared vector index.
#[derive(Clone)]
pub struct MemoryStore {
    kind: EntityKind,
    index: Arc<MemoryIndex>,
    embedding: Arc<dyn EmbeddingProvider>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("kind", &self.kind)
            .field("model", &self.embedding.model())
            .finish()
    }
}

impl MemoryStore {
    pub fn new(
        kind: EntityKind,
        index: Arc<MemoryIndex>,
        embedding: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            kind,
            index,
            embedding,
        }
    }

    /// Store for character memories.
    pub fn characters(index: Arc<MemoryIndex>, embedding: Arc<dyn EmbeddingProvider>) -> Self {
        Self::new(EntityKind::Character, index, embedding)
    }

    /// Store for universe history.
    pub fn universes(index: Arc<MemoryIndex>, embedding: Arc<dyn EmbeddingProvider>) -> Self {
        Self::new(EntityKind::Universe, index, embedding)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    fn partition(&self, entity_id: &str) -> Arc<Partition<MemoryMetadata>> {
        self.index.partition(&self.kind.partition_name(entity_id))
    }

    /// Embed a draft and store it as a new memory for `entity_id`.
    ///
    /// Nothing is written if validation or the embedding call fails. The index
    /// write happens in one synchronous step after the embedding resolves.
    pub async fn add_memory(&self, entity_id: &str, draft: NewMemory) -> Result<MemoryEntry> {
        draft.validate()?;

        let vector = self
            .embedding
            .embed(&draft.content)
            .await
            .with_context(|| format!("failed to embed {} memory", self.kind))?;

        let entry = MemoryEntry::from_draft(draft);
        self.insert(entity_id, vector, entry.clone());

        tracing::info!(
            kind = %self.kind,
            entity_id = %entity_id,
            id = %entry.id,
            salience = entry.salience,
            "memory stored"
        );
        Ok(entry)
    }

    /// Embed an entry that already has an identity (e.g. one loaded from an
    /// entity record) and index it under its existing id.
    ///
    /// Re-indexing the same id replaces the previous vector.
    pub async fn reindex_memory(&self, entity_id: &str, entry: MemoryEntry) -> Result<()> {
        entry.validate()?;

        let vector = self
            .embedding
            .embed(&entry.content)
            .await
            .with_context(|| format!("failed to embed {} memory {}", self.kind, entry.id))?;

        tracing::debug!(kind = %self.kind, entity_id = %entity_id, id = %entry.id, "memory reindexed");
        self.insert(entity_id, vector, entry);
        Ok(())
    }

    fn insert(&self, entity_id: &str, vector: Vec<f32>, entry: MemoryEntry) {
        self.partition(entity_id).upsert(VectorRecord {
            id: entry.id.to_string(),
            vector,
            metadata: MemoryMetadata {
                entity_id: entity_id.to_string(),
                entry,
            },
        });
    }

    /// Memories for `entity_id` most similar to `query`, most similar first.
    ///
    /// `limit = None` returns every memory in the partition.
    pub async fn search_memories(
        &self,
        entity_id: &str,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<MemoryEntry>> {
        let vector = self
            .embedding
            .embed(query)
            .await
            .with_context(|| format!("failed to embed {} memory query", self.kind))?;

        let mut options = QueryOptions::new();
        options.limit = limit;
        let matches = self.partition(entity_id).query(&vector, &options);

        tracing::debug!(
            kind = %self.kind,
            entity_id = %entity_id,
            limit = ?limit,
            matches = matches.len(),
            "memory search"
        );
        Ok(matches.into_iter().map(|m| m.metadata.entry).collect())
    }

    /// Remove one memory from an entity's partition. Returns `false` if it was absent.
    pub fn forget_memory(&self, entity_id: &str, memory_id: &str) -> bool {
        let removed = self.partition(entity_id).delete(memory_id);
        tracing::info!(
            kind = %self.kind,
            entity_id = %entity_id,
            id = %memory_id,
            removed,
            "forget memory"
        );
        removed
    }

    /// Number of memories indexed for `entity_id`.
    pub fn memory_count(&self, entity_id: &str) -> usize {
        self.partition(entity_id).len()
    }
}
