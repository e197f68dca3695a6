//! CLI `rank` command: lexical ranking of a memories file.

use std::path::Path;

use anyhow::Result;
use talae_recall::memory::ranking::rank_memories;

use super::{load_memories, preview};

pub fn rank(memories_path: &Path, queries: &[String], limit: Option<usize>) -> Result<()> {
    let memories = load_memories(memories_path)?;
    let ranked = rank_memories(&memories, queries, limit);

    if ranked.is_empty() {
        println!("No memories ranked.");
        return Ok(());
    }

    if queries.iter().all(|q| q.trim().is_empty()) {
        println!("No query given, ranking by salience.\n");
    }

    for (i, scored) in ranked.iter().enumerate() {
        println!(
            "  {}. {} (score: {:.4}, salience: {:.2})",
            i + 1,
            scored.entry.id,
            scored.score,
            scored.entry.salience,
        );
        println!("     {}", preview(&scored.entry.content, 120));
        println!();
    }
    Ok(())
}
