//! Core memory type definitions.
//!
//! Defines [`EntityKind`] (who owns a memory list), [`MemoryEntry`] (a stored
//! memory), and [`NewMemory`] (the caller-supplied draft an entry is built from).

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of entity that owns a memory collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A character's personal memories.
    Character,
    /// A universe's shared history.
    Universe,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Universe => "universe",
        }
    }

    /// Vector index partition name for one entity, e.g. `"character:<id>"`.
    pub fn partition_name(&self, entity_id: &str) -> String {
        format!("{}:{entity_id}", self.as_str())
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "character" => Ok(Self::Character),
            "universe" => Ok(Self::Universe),
            _ => Err(format!("unknown entity kind: {s}")),
        }
    }
}

/// A single memory owned by a character or universe.
///
/// Read-only once created. Serialized with camelCase keys to match the
/// `memories` list the persistence layer stores on each entity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryEntry {
    pub id: Uuid,
    pub content: String,
    /// Caller-assigned importance in `[0.0, 1.0]`.
    pub salience: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Whether `salience` is a finite number in `[0.0, 1.0]`.
pub fn is_valid_salience(salience: f64) -> bool {
    (0.0..=1.0).contains(&salience)
}

impl MemoryEntry {
    /// Build a new entry from a draft, assigning a fresh UUID v7 and the current time.
    pub fn from_draft(draft: NewMemory) -> Self {
        Self {
            id: Uuid::now_v7(),
            content: draft.content,
            salience: draft.salience,
            tags: draft.tags,
            created_at: Utc::now(),
        }
    }

    /// Reject an entry whose salience is outside `[0.0, 1.0]` or NaN.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_salience(self.salience) {
            bail!(
                "memory {} has salience {} outside [0.0, 1.0]",
                self.id,
                self.salience
            );
        }
        Ok(())
    }

    /// Text the lexical scorer sees: content followed by space-joined tags.
    pub fn searchable_text(&self) -> String {
        if self.tags.is_empty() {
            return self.content.clone();
        }
        format!("{} {}", self.content, self.tags.join(" "))
    }
}

/// Caller-supplied fields for a new memory. `id` and `created_at` are assigned on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMemory {
    pub content: String,
    pub salience: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewMemory {
    pub fn new(content: impl Into<String>, salience: f64) -> Self {
        Self {
            content: content.into(),
            salience,
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Salience must be a finite number in `[0.0, 1.0]`.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_salience(self.salience) {
            bail!("salience must be between 0.0 and 1.0, got {}", self.salience);
        }
        Ok(())
    }
}
