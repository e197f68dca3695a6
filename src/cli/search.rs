use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use talae_recall::config::RecallConfig;
use talae_recall::memory::store::{MemoryIndex, MemoryStore};
use talae_recall::memory::types::EntityKind;

use super::{load_memories, preview};

/// Embed every memory in the file into a fresh index, then run one semantic search.
pub async fn search(
    config: &RecallConfig,
    memories_path: &Path,
    query: &str,
    kind: EntityKind,
    entity_id: &str,
    limit: Option<usize>,
) -> Result<()> {
    config.validate()?;
    let memories = load_memories(memories_path)?;
    let provider = talae_recall::embedding::create_provider(&config.embedding)?;
    let store = MemoryStore::new(kind, Arc::new(MemoryIndex::new()), provider);

    let pb = ProgressBar::new(memories.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  embedding {bar:40.cyan/blue} {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    for memory in memories {
        store.reindex_memory(entity_id, memory).await?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    let limit = limit.or(Some(config.retrieval.default_limit));
    let results = store.search_memories(entity_id, query, limit).await?;

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!(
        "Found {} result(s) in {}\n",
        results.len(),
        kind.partition_name(entity_id)
    );
    for (i, entry) in results.iter().enumerate() {
        println!(
            "  {}. {} (salience: {:.2})",
            i + 1,
            entry.id,
            entry.salience
        );
        println!("     {}", preview(&entry.content, 120));
        println!();
    }
    Ok(())
}
