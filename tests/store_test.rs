mod helpers;

use std::sync::Arc;

use helpers::{keyword_store, memory, FailingEmbedder, KeywordEmbedder};
use talae_recall::embedding::EmbeddingError;
use talae_recall::memory::store::{MemoryIndex, MemoryStore};
use talae_recall::memory::types::{EntityKind, NewMemory};

#[tokio::test]
async fn add_then_search_round_trip() {
    let (store, embedder, _) = keyword_store(EntityKind::Character);

    let spice = store
        .add_memory("c1", NewMemory::new("Bought spice at the market", 0.3))
        .await
        .unwrap();
    let engine = store
        .add_memory("c1", NewMemory::new("The spaceship engine stalled", 0.9))
        .await
        .unwrap();
    assert_eq!(embedder.calls(), 2);

    let results = store
        .search_memories("c1", "spice market", Some(2))
        .await
        .unwrap();
    assert_eq!(results[0], spice);
    assert_eq!(results[1], engine);
    assert_eq!(embedder.calls(), 3);
}

#[tokio::test]
async fn concurrent_adds_for_one_entity_are_both_kept() {
    let (store, _, _) = keyword_store(EntityKind::Character);

    let (first, second) = tokio::join!(
        store.add_memory("c1", NewMemory::new("storm over the harbor", 0.4)),
        store.add_memory("c1", NewMemory::new("spice at the market", 0.6)),
    );
    let first = first.unwrap();
    let second = second.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(store.memory_count("c1"), 2);

    let found = store.search_memories("c1", "storm spice", None).await.unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.contains(&first));
    assert!(found.contains(&second));
}

#[tokio::test]
async fn character_and_universe_stores_share_one_index() {
    let index = Arc::new(MemoryIndex::new());
    let embedder = Arc::new(KeywordEmbedder::default());
    let characters = MemoryStore::characters(Arc::clone(&index), embedder.clone());
    let universes = MemoryStore::universes(Arc::clone(&index), embedder);

    characters
        .add_memory("id-1", NewMemory::new("storm at the harbor", 0.5))
        .await
        .unwrap();
    universes
        .add_memory("id-1", NewMemory::new("the great storm", 0.5))
        .await
        .unwrap();

    assert_eq!(characters.memory_count("id-1"), 1);
    assert_eq!(universes.memory_count("id-1"), 1);
    assert_eq!(index.partition("character:id-1").len(), 1);
    assert_eq!(index.partition("universe:id-1").len(), 1);

    let found = universes.search_memories("id-1", "storm", None).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].content, "the great storm");
}

#[tokio::test]
async fn embedding_errors_surface_to_caller() {
    let store = MemoryStore::characters(Arc::new(MemoryIndex::new()), Arc::new(FailingEmbedder));

    let err = store
        .add_memory("c1", NewMemory::new("lost", 0.5))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EmbeddingError>(),
        Some(EmbeddingError::Status { status: 502, .. })
    ));
    assert_eq!(store.memory_count("c1"), 0);

    let err = store.search_memories("c1", "lost", None).await.unwrap_err();
    assert!(err.downcast_ref::<EmbeddingError>().is_some());
}

#[tokio::test]
async fn reindexed_entries_keep_their_ids() {
    let (store, _, _) = keyword_store(EntityKind::Universe);
    let entry = memory(7, "harbor storm season", 0.6, 3);

    store.reindex_memory("u1", entry.clone()).await.unwrap();
    store.reindex_memory("u1", entry.clone()).await.unwrap();
    assert_eq!(store.memory_count("u1"), 1);

    let found = store.search_memories("u1", "storm", None).await.unwrap();
    assert_eq!(found, vec![entry]);
}

#[tokio::test]
async fn forgotten_memories_stop_matching() {
    let (store, _, _) = keyword_store(EntityKind::Character);
    let entry = store
        .add_memory("c1", NewMemory::new("spaceship", 0.5))
        .await
        .unwrap();

    assert!(store.forget_memory("c1", &entry.id.to_string()));
    assert!(store
        .search_memories("c1", "spaceship", None)
        .await
        .unwrap()
        .is_empty());
}
