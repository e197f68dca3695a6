#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use talae_recall::embedding::{EmbeddingError, EmbeddingProvider};
use talae_recall::memory::store::{MemoryIndex, MemoryStore};
use talae_recall::memory::types::{EntityKind, MemoryEntry};
use uuid::Uuid;

/// Vocabulary of the deterministic test embedder, one dimension per word.
pub const VOCABULARY: [&str; 6] = ["spaceship", "engine", "market", "spice", "storm", "harbor"];

/// Embeds text as keyword occurrence counts over [`VOCABULARY`]. Counts calls.
#[derive(Default)]
pub struct KeywordEmbedder {
    calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(keyword_vector(text))
    }

    fn model(&self) -> &str {
        "keyword-test"
    }
}

pub fn keyword_vector(text: &str) -> Vec<f32> {
    let lower = text.to_lowercase();
    VOCABULARY
        .iter()
        .map(|word| lower.matches(word).count() as f32)
        .collect()
}

/// Always fails like an unreachable provider would.
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(EmbeddingError::Status {
            status: 502,
            body: "bad gateway".into(),
        }
        .into())
    }

    fn model(&self) -> &str {
        "failing-test"
    }
}

/// A fresh store over its own index, plus the embedder for call counting.
pub fn keyword_store(kind: EntityKind) -> (MemoryStore, Arc<KeywordEmbedder>, Arc<MemoryIndex>) {
    let embedder = Arc::new(KeywordEmbedder::default());
    let index = Arc::new(MemoryIndex::new());
    let store = MemoryStore::new(kind, Arc::clone(&index), embedder.clone());
    (store, embedder, index)
}

/// A memory with a fixed id and a creation time `day` days into 2024.
pub fn memory(n: u128, content: &str, salience: f64, day: u32) -> MemoryEntry {
    MemoryEntry {
        id: Uuid::from_u128(n),
        content: content.to_string(),
        salience,
        tags: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::days(i64::from(day)),
    }
}

pub fn tagged(mut entry: MemoryEntry, tags: &[&str]) -> MemoryEntry {
    entry.tags = tags.iter().map(|t| t.to_string()).collect();
    entry
}
