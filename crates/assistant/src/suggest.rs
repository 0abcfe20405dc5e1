//! Suggestion engine — a pure function of `(incomplete_tasks, now)`.
//!
//! Evaluated fresh on every call, no caching, and it never raises: a
//! malformed deadline drops that task's suggestion instead of aborting
//! the computation.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use vitrine_core::suggestion::{Suggestion, SuggestionKind};
use vitrine_core::task::Task;

/// Parse a deadline string into a UTC timestamp. RFC 3339 with any offset
/// (including `Z`) is accepted; anything else is `None`.
pub fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Derives advisory notices from the current set of incomplete tasks.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    /// Deadlines within this window are urgent
    pub urgent_window: Duration,
    /// Deadlines within this (larger) window get a reminder
    pub reminder_window: Duration,
    /// More open tasks than this triggers the productivity nudge
    pub backlog_threshold: usize,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self {
            urgent_window: Duration::days(1),
            reminder_window: Duration::days(3),
            backlog_threshold: 5,
        }
    }
}

impl SuggestionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the ordered suggestion list for the given incomplete tasks.
    ///
    /// Per-task deadline suggestions come first in task iteration order
    /// (urgent takes precedence over reminder; a task never yields both),
    /// then at most one productivity nudge, then — only when there are no
    /// tasks at all — one encouragement.
    pub fn suggest(&self, incomplete_tasks: &[Task], now: DateTime<Utc>) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        for task in incomplete_tasks {
            let Some(raw) = task.deadline.as_deref() else {
                continue;
            };
            let Some(deadline) = parse_deadline(raw) else {
                debug!(task_id = %task.id, deadline = raw, "Skipping unparseable deadline");
                continue;
            };

            if deadline <= now + self.urgent_window {
                suggestions.push(Suggestion {
                    kind: SuggestionKind::Urgent,
                    message: format!("⚠️ Task '{}' is due soon!", task.title),
                    task_id: Some(task.id.clone()),
                });
            } else if deadline <= now + self.reminder_window {
                suggestions.push(Suggestion {
                    kind: SuggestionKind::Reminder,
                    message: format!("📅 Don't forget: '{}' is coming up.", task.title),
                    task_id: Some(task.id.clone()),
                });
            }
        }

        if incomplete_tasks.len() > self.backlog_threshold {
            suggestions.push(Suggestion {
                kind: SuggestionKind::Productivity,
                message: "💡 You have quite a few tasks. Consider prioritizing the top 3 to focus on today.".into(),
                task_id: None,
            });
        }

        if incomplete_tasks.is_empty() {
            suggestions.push(Suggestion {
                kind: SuggestionKind::Encouragement,
                message: "✨ All caught up! Great job staying on top of things.".into(),
                task_id: None,
            });
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::task::{NewTask, Priority};

    fn task(title: &str, deadline: Option<String>) -> Task {
        Task::create(NewTask {
            title: title.into(),
            description: String::new(),
            deadline,
            reminder_time: None,
            priority: Priority::default(),
        })
    }

    fn due_in(now: DateTime<Utc>, hours: i64) -> Option<String> {
        Some((now + Duration::hours(hours)).to_rfc3339())
    }

    #[test]
    fn task_due_in_two_hours_is_urgent_only() {
        let now = Utc::now();
        let engine = SuggestionEngine::new();
        let tasks = vec![task("Submit report", due_in(now, 2))];

        let suggestions = engine.suggest(&tasks, now);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::Urgent);
        assert_eq!(suggestions[0].task_id.as_deref(), Some(tasks[0].id.as_str()));
        assert!(suggestions[0].message.contains("Submit report"));
    }

    #[test]
    fn task_due_in_two_days_gets_a_reminder() {
        let now = Utc::now();
        let engine = SuggestionEngine::new();
        let tasks = vec![task("Prepare slides", due_in(now, 48))];

        let suggestions = engine.suggest(&tasks, now);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::Reminder);
    }

    #[test]
    fn far_deadline_yields_nothing() {
        let now = Utc::now();
        let engine = SuggestionEngine::new();
        let tasks = vec![task("Someday", due_in(now, 24 * 30))];
        assert!(engine.suggest(&tasks, now).is_empty());
    }

    #[test]
    fn malformed_deadline_is_skipped_silently() {
        let now = Utc::now();
        let engine = SuggestionEngine::new();
        let tasks = vec![
            task("bad date", Some("next tuesday".into())),
            task("good date", due_in(now, 2)),
        ];

        let suggestions = engine.suggest(&tasks, now);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].task_id.as_deref(), Some(tasks[1].id.as_str()));
    }

    #[test]
    fn six_open_tasks_trigger_one_productivity_nudge() {
        let now = Utc::now();
        let engine = SuggestionEngine::new();
        let tasks: Vec<Task> = (0..6).map(|i| task(&format!("t{i}"), None)).collect();

        let suggestions = engine.suggest(&tasks, now);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::Productivity);
        assert!(suggestions[0].task_id.is_none());
    }

    #[test]
    fn backlog_nudge_appears_after_deadline_suggestions() {
        let now = Utc::now();
        let engine = SuggestionEngine::new();
        let mut tasks: Vec<Task> = (0..6).map(|i| task(&format!("t{i}"), None)).collect();
        tasks.push(task("due", due_in(now, 1)));

        let suggestions = engine.suggest(&tasks, now);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].kind, SuggestionKind::Urgent);
        assert_eq!(suggestions[1].kind, SuggestionKind::Productivity);
    }

    #[test]
    fn zero_tasks_means_exactly_one_encouragement() {
        let engine = SuggestionEngine::new();
        let suggestions = engine.suggest(&[], Utc::now());
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::Encouragement);
    }

    #[test]
    fn parse_deadline_accepts_offsets_and_zulu() {
        assert!(parse_deadline("2025-06-01T12:00:00Z").is_some());
        assert!(parse_deadline("2025-06-01T12:00:00+02:00").is_some());
        assert!(parse_deadline("June 1st").is_none());
        assert!(parse_deadline("").is_none());
    }
}
