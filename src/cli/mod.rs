pub mod doctor;
pub mod rank;
pub mod search;

use std::path::Path;

use anyhow::{Context, Result};
use talae_recall::memory::types::MemoryEntry;

/// Read a JSON array of memory entries, as stored on a character or universe record.
pub fn load_memories(path: &Path) -> Result<Vec<MemoryEntry>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read memories file: {}", path.display()))?;
    let memories: Vec<MemoryEntry> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse memories file: {}", path.display()))?;

    for memory in &memories {
        memory.validate()?;
    }
    tracing::debug!(path = %path.display(), count = memories.len(), "loaded memories");
    Ok(memories)
}

/// First `max` characters of `content`, with an ellipsis when cut.
pub fn preview(content: &str, max: usize) -> String {
    match content.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}
