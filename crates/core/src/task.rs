//! Task entity — the unit of work the assistant reasons about.
//!
//! Deadlines and reminder times are stored as client-supplied timestamp
//! text rather than parsed dates: the suggestion engine parses them
//! fallibly at read time and skips entries it cannot understand, so a
//! malformed deadline can never poison the whole collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// A tracked task. `id` is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique ID for this task
    pub id: String,

    /// Short title
    pub title: String,

    /// Longer free-text description
    #[serde(default)]
    pub description: String,

    /// Deadline as timestamp text (RFC 3339), parsed fallibly downstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,

    /// Optional reminder timestamp text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,

    /// Priority (defaults to medium)
    #[serde(default)]
    pub priority: Priority,

    /// Whether the task is done
    #[serde(default)]
    pub completed: bool,

    /// When this task was created
    pub created_at: DateTime<Utc>,

    /// When this task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Fields a client supplies when creating a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub reminder_time: Option<String>,
    #[serde(default)]
    pub priority: Priority,
}

impl Task {
    /// Build a fresh task from client-supplied fields.
    pub fn create(new: NewTask) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            deadline: new.deadline,
            reminder_time: new.reminder_time,
            priority: new.priority,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_assigns_unique_ids() {
        let a = Task::create(NewTask {
            title: "one".into(),
            description: String::new(),
            deadline: None,
            reminder_time: None,
            priority: Priority::default(),
        });
        let b = Task::create(NewTask {
            title: "two".into(),
            description: String::new(),
            deadline: None,
            reminder_time: None,
            priority: Priority::default(),
        });
        assert_ne!(a.id, b.id);
        assert!(!a.completed);
    }

    #[test]
    fn priority_round_trips_lowercase() {
        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, "\"high\"");
        let back: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(back, Priority::Low);
    }

    #[test]
    fn task_deserializes_with_missing_optionals() {
        let task: Task = serde_json::from_str(
            r#"{
                "id": "t1",
                "title": "Submit report",
                "created_at": "2025-01-01T00:00:00Z",
                "updated_at": "2025-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.deadline.is_none());
    }
}
