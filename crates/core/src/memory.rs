//! Memory entity — persisted notes and conversation excerpts that give
//! the assistant continuity across calls.
//!
//! Memories are append-only from the application's perspective: they are
//! created and deleted (singly or in bulk) but never updated in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of memory this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    /// A captured chat exchange (user message + assistant reply)
    Conversation,
    /// A remembered personal preference
    Preference,
    /// A free-form note
    Note,
}

/// A single memory entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    /// Unique ID for this memory
    pub id: String,

    /// Memory category
    #[serde(rename = "type")]
    pub kind: MemoryKind,

    /// The content of the memory
    pub content: String,

    /// Optional free-text context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// When this memory was created
    pub created_at: DateTime<Utc>,
}

impl Memory {
    /// Build a fresh memory entry of the given kind.
    pub fn new(kind: MemoryKind, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            content: content.into(),
            context: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}
