//! Context assembly — builds the system prompt for each assistant call
//! from accumulated memories and outstanding tasks.
//!
//! A pure, side-effect-free transformation: empty inputs degrade to
//! placeholder text, never to an error.

use vitrine_core::memory::Memory;
use vitrine_core::task::Task;

const PERSONA: &str = "You are a helpful, friendly, and proactive AI personal assistant for the \
portfolio owner. You help manage tasks, provide reminders, and offer productivity suggestions. \
You have a warm, supportive personality and speak in a professional yet friendly manner.";

const GUIDELINES: &str = "Guidelines:
- Be proactive about reminding about upcoming tasks and deadlines
- Suggest productivity improvements when relevant
- Remember personal preferences and details shared
- Be encouraging and supportive
- Keep responses concise but helpful
- If there are tasks due today or soon, mention them
- You can help with creating new tasks, notes, and reminders";

const NO_MEMORIES: &str = "No previous memories stored yet.";

/// Assembles the bounded context block fed to the provider.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    /// At most this many of the most recent memories are included
    pub max_memories: usize,
    /// At most this many incomplete tasks are included
    pub max_tasks: usize,
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self {
            max_memories: 20,
            max_tasks: 10,
        }
    }
}

impl ContextAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenate the persona preamble, the memory block, the optional
    /// task block, and the guidelines into one system prompt.
    pub fn assemble(&self, memories: &[Memory], tasks: &[Task]) -> String {
        let memory_block = self.memory_block(memories);
        let task_block = self.task_block(tasks);

        let mut prompt = format!(
            "{PERSONA}\n\nYour memory/context about the owner:\n{memory_block}"
        );
        if let Some(block) = task_block {
            prompt.push_str("\n\nUpcoming Tasks:\n");
            prompt.push_str(&block);
        }
        prompt.push_str("\n\n");
        prompt.push_str(GUIDELINES);
        prompt
    }

    /// The `max_memories` most recently created memories, newest first,
    /// one bulleted content line each.
    fn memory_block(&self, memories: &[Memory]) -> String {
        let mut recent: Vec<&Memory> = memories.iter().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(self.max_memories);

        if recent.is_empty() {
            return NO_MEMORIES.into();
        }
        recent
            .iter()
            .map(|m| format!("- {}", m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Up to `max_tasks` incomplete tasks in the order given; `None` when
    /// there are none, so the section disappears entirely.
    fn task_block(&self, tasks: &[Task]) -> Option<String> {
        let open: Vec<&Task> = tasks
            .iter()
            .filter(|t| !t.completed)
            .take(self.max_tasks)
            .collect();
        if open.is_empty() {
            return None;
        }
        Some(
            open.iter()
                .map(|t| {
                    format!(
                        "- {} (Priority: {}, Deadline: {})",
                        t.title,
                        t.priority,
                        t.deadline.as_deref().unwrap_or("No deadline"),
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use vitrine_core::memory::MemoryKind;
    use vitrine_core::task::{NewTask, Priority};

    fn memory_at(content: &str, created_at: DateTime<Utc>) -> Memory {
        let mut memory = Memory::new(MemoryKind::Note, content);
        memory.created_at = created_at;
        memory
    }

    fn task(title: &str, completed: bool) -> Task {
        let mut task = Task::create(NewTask {
            title: title.into(),
            description: String::new(),
            deadline: None,
            reminder_time: None,
            priority: Priority::High,
        });
        task.completed = completed;
        task
    }

    #[test]
    fn empty_inputs_degrade_to_placeholder() {
        let assembler = ContextAssembler::new();
        let prompt = assembler.assemble(&[], &[]);
        assert!(prompt.contains("No previous memories stored yet."));
        assert!(!prompt.contains("Upcoming Tasks:"));
        assert!(prompt.contains("Guidelines:"));
    }

    #[test]
    fn caps_at_twenty_most_recent_memories() {
        let assembler = ContextAssembler::new();
        let base = Utc::now();
        let memories: Vec<Memory> = (0..25)
            .map(|i| memory_at(&format!("memory {i}"), base + Duration::seconds(i)))
            .collect();

        let prompt = assembler.assemble(&memories, &[]);
        let lines = prompt.lines().filter(|l| l.starts_with("- memory")).count();
        assert_eq!(lines, 20);
        // The newest survives, the oldest five are dropped
        assert!(prompt.contains("- memory 24"));
        assert!(!prompt.contains("- memory 4\n"));
        assert!(!prompt.contains("- memory 0"));
    }

    #[test]
    fn task_section_lists_open_tasks_with_deadline_placeholder() {
        let assembler = ContextAssembler::new();
        let tasks = vec![task("Ship release", false), task("Old chore", true)];

        let prompt = assembler.assemble(&[], &tasks);
        assert!(prompt.contains("Upcoming Tasks:"));
        assert!(prompt.contains("- Ship release (Priority: high, Deadline: No deadline)"));
        assert!(!prompt.contains("Old chore"));
    }

    #[test]
    fn task_section_caps_at_ten() {
        let assembler = ContextAssembler::new();
        let tasks: Vec<Task> = (0..12).map(|i| task(&format!("t{i}"), false)).collect();

        let prompt = assembler.assemble(&[], &tasks);
        let lines = prompt.lines().filter(|l| l.starts_with("- t")).count();
        assert_eq!(lines, 10);
    }
}
