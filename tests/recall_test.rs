mod helpers;

use helpers::{keyword_store, memory};
use talae_recall::memory::recall::{RecallRequest, RecallStrategy};
use talae_recall::memory::types::{EntityKind, NewMemory};

#[tokio::test]
async fn strategies_answer_the_same_request_independently() {
    let (store, embedder, _) = keyword_store(EntityKind::Character);
    let indexed = store
        .add_memory("c1", NewMemory::new("market spice haul", 0.1))
        .await
        .unwrap();

    let loaded = vec![
        memory(1, "repaired the spaceship engine", 0.2, 0),
        memory(2, "sunny afternoon", 0.9, 0),
    ];
    let queries = vec!["spaceship engine".to_string(), "spice market".to_string()];
    let request = RecallRequest {
        entity_id: "c1",
        memories: &loaded,
        queries: &queries,
        limit: Some(1),
    };

    let lexical = RecallStrategy::Lexical.recall(&request).await.unwrap();
    assert_eq!(lexical[0].id.as_u128(), 1);
    assert_eq!(embedder.calls(), 1, "lexical recall must not embed");

    let semantic = RecallStrategy::Semantic(store).recall(&request).await.unwrap();
    assert_eq!(semantic, vec![indexed]);
    assert_eq!(embedder.calls(), 2);
}

#[tokio::test]
async fn empty_queries_differ_by_strategy() {
    let (store, embedder, _) = keyword_store(EntityKind::Universe);
    store
        .add_memory("u1", NewMemory::new("storm", 0.5))
        .await
        .unwrap();

    let loaded = vec![memory(1, "low", 0.1, 0), memory(2, "high", 0.8, 0)];
    let request = RecallRequest {
        entity_id: "u1",
        memories: &loaded,
        queries: &[],
        limit: None,
    };

    let lexical = RecallStrategy::Lexical.recall(&request).await.unwrap();
    assert_eq!(lexical[0].id.as_u128(), 2);

    let semantic = RecallStrategy::Semantic(store).recall(&request).await.unwrap();
    assert!(semantic.is_empty());
    assert_eq!(embedder.calls(), 1);
}
