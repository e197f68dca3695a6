//! Memory selection for prompt building.
//!
//! Response generation ranks a character's memories against the conversation
//! so far. World evolution has no query text, so it ranks with an empty query
//! and gets the salience-only ordering.

use crate::memory::ranking::find_relevant_memories;
use crate::memory::types::MemoryEntry;

/// Memories injected into a character response prompt.
pub const RESPONSE_MEMORY_LIMIT: usize = 8;
/// Memories considered when evolving a universe.
pub const EVOLUTION_MEMORY_LIMIT: usize = 5;
/// Placeholder when there is nothing to show.
pub const NO_MEMORIES: &str = "No significant memories yet.";

/// The `limit` character memories most relevant to the conversation messages.
pub fn memories_for_response<S: AsRef<str>>(
    memories: &[MemoryEntry],
    messages: &[S],
    limit: usize,
) -> Vec<MemoryEntry> {
    find_relevant_memories(memories, messages, Some(limit))
}

/// The `limit` most salient universe memories.
pub fn memories_for_evolution(memories: &[MemoryEntry], limit: usize) -> Vec<MemoryEntry> {
    find_relevant_memories::<&str>(memories, &[], Some(limit))
}

/// One `- content` line per memory.
pub fn render_memory_lines(memories: &[MemoryEntry]) -> String {
    if memories.is_empty() {
        return NO_MEMORIES.to_string();
    }
    memories
        .iter()
        .map(|m| format!("- {}", m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One `- content (importance: s)` line per memory.
pub fn render_weighted_memory_lines(memories: &[MemoryEntry]) -> String {
    if memories.is_empty() {
        return NO_MEMORIES.to_string();
    }
    memories
        .iter()
        .map(|m| format!("- {} (importance: {})", m.content, m.salience))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::types::NewMemory;

    fn entry(content: &str, salience: f64) -> MemoryEntry {
        MemoryEntry::from_draft(NewMemory::new(content, salience))
    }

    #[test]
    fn evolution_takes_most_salient() {
        let memories: Vec<MemoryEntry> = (0..8)
            .map(|i| entry(&format!("event {i}"), f64::from(i) / 10.0))
            .collect();
        let picked = memories_for_evolution(&memories, EVOLUTION_MEMORY_LIMIT);
        let saliences: Vec<f64> = picked.iter().map(|m| m.salience).collect();
        assert_eq!(saliences, vec![0.7, 0.6, 0.5, 0.4, 0.3]);
    }

    #[test]
    fn response_prefers_conversation_topic() {
        let memories = vec![
            entry("Won a sailing race last spring", 0.2),
            entry("Owns a bakery downtown", 0.5),
        ];
        let messages = ["Do you still go sailing?", "I heard about the race"];
        let picked = memories_for_response(&memories, &messages, 1);
        assert_eq!(picked[0].content, "Won a sailing race last spring");
    }

    #[test]
    fn render_lines() {
        let memories = vec![entry("first", 0.5), entry("second", 0.25)];
        assert_eq!(render_memory_lines(&memories), "- first\n- second");
        assert_eq!(
            render_weighted_memory_lines(&memories),
            "- first (importance: 0.5)\n- second (importance: 0.25)"
        );
    }

    #[test]
    fn render_empty_uses_placeholder() {
        assert_eq!(render_memory_lines(&[]), NO_MEMORIES);
        assert_eq!(render_weighted_memory_lines(&[]), NO_MEMORIES);
    }
}
