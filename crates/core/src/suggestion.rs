//! Suggestion — an ephemeral advisory message derived from task state.
//!
//! Suggestions are computed fresh on every request and never persisted.
//! The optional `task_id` is a weak reference: relation only, no ownership.

use serde::{Deserialize, Serialize};

/// Advisory category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// A deadline within one day
    Urgent,
    /// A deadline within three days
    Reminder,
    /// Too many open tasks
    Productivity,
    /// Nothing outstanding
    Encouragement,
}

/// A single advisory message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Advisory category
    #[serde(rename = "type")]
    pub kind: SuggestionKind,

    /// Human-readable message
    pub message: String,

    /// The task this advice refers to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}
