//! Typed repositories over the document store for the entities the
//! assistant logic consumes.
//!
//! Documents that no longer deserialize (e.g. after a partial merge wrote
//! an unexpected shape) are skipped with a warning rather than failing the
//! whole listing.

use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::warn;

use vitrine_core::error::Result;
use vitrine_core::memory::Memory;
use vitrine_core::store::{DocumentStore, FieldFilter, ListQuery, SortSpec, collections};
use vitrine_core::task::{NewTask, Task};

/// How many documents a plain listing will return at most.
const LIST_LIMIT: usize = 1_000;

fn deserialize_each<T: serde::de::DeserializeOwned>(collection: &str, docs: Vec<Value>) -> Vec<T> {
    docs.into_iter()
        .filter_map(|doc| match serde_json::from_value(doc) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(collection, error = %e, "Skipping undecodable document");
                None
            }
        })
        .collect()
}

/// Accessor for the `tasks` collection.
#[derive(Clone)]
pub struct TaskRepository {
    store: Arc<dyn DocumentStore>,
}

impl TaskRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, new: NewTask) -> Result<Task> {
        let task = Task::create(new);
        self.store
            .insert(collections::TASKS, serde_json::to_value(&task)?)
            .await?;
        Ok(task)
    }

    /// All tasks, in store order.
    pub async fn list(&self) -> Result<Vec<Task>> {
        let docs = self
            .store
            .list(collections::TASKS, ListQuery::all(LIST_LIMIT))
            .await?;
        Ok(deserialize_each(collections::TASKS, docs))
    }

    /// Incomplete tasks, in store order, capped at `limit`.
    pub async fn incomplete(&self, limit: usize) -> Result<Vec<Task>> {
        let docs = self
            .store
            .list(
                collections::TASKS,
                ListQuery::all(limit).filtered(FieldFilter::new("completed", false)),
            )
            .await?;
        Ok(deserialize_each(collections::TASKS, docs))
    }

    /// Merge a JSON patch into a task, stamping `updated_at`. The store
    /// guards `id` immutability. Returns `false` when the task is absent.
    pub async fn update(&self, id: &str, mut patch: Map<String, Value>) -> Result<bool> {
        patch.insert("updated_at".into(), serde_json::to_value(Utc::now())?);
        Ok(self.store.merge(collections::TASKS, id, patch).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.store.remove(collections::TASKS, id).await?)
    }

    pub async fn count(&self) -> Result<usize> {
        Ok(self.store.count(collections::TASKS, None).await?)
    }

    pub async fn count_completed(&self) -> Result<usize> {
        Ok(self
            .store
            .count(
                collections::TASKS,
                Some(FieldFilter::new("completed", true)),
            )
            .await?)
    }
}

/// Accessor for the `ai_memory` collection. Append-only except for
/// explicit single-item or bulk deletion.
#[derive(Clone)]
pub struct MemoryRepository {
    store: Arc<dyn DocumentStore>,
}

impl MemoryRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn append(&self, memory: Memory) -> Result<Memory> {
        self.store
            .insert(collections::MEMORIES, serde_json::to_value(&memory)?)
            .await?;
        Ok(memory)
    }

    /// The most recently created memories, newest first.
    pub async fn recent(&self, limit: usize) -> Result<Vec<Memory>> {
        let docs = self
            .store
            .list(
                collections::MEMORIES,
                ListQuery::all(limit).sorted(SortSpec::descending("created_at")),
            )
            .await?;
        Ok(deserialize_each(collections::MEMORIES, docs))
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.store.remove(collections::MEMORIES, id).await?)
    }

    pub async fn clear(&self) -> Result<u64> {
        Ok(self.store.clear(collections::MEMORIES).await?)
    }

    pub async fn count(&self) -> Result<usize> {
        Ok(self.store.count(collections::MEMORIES, None).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::InMemoryStore;
    use serde_json::json;
    use vitrine_core::memory::MemoryKind;
    use vitrine_core::task::Priority;

    fn repos() -> (TaskRepository, MemoryRepository) {
        let store: Arc<dyn DocumentStore> = Arc::new(InMemoryStore::new());
        (
            TaskRepository::new(store.clone()),
            MemoryRepository::new(store),
        )
    }

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.into(),
            description: String::new(),
            deadline: None,
            reminder_time: None,
            priority: Priority::default(),
        }
    }

    #[tokio::test]
    async fn task_lifecycle() {
        let (tasks, _) = repos();
        let task = tasks.create(new_task("Write post")).await.unwrap();
        assert_eq!(tasks.list().await.unwrap().len(), 1);
        assert_eq!(tasks.incomplete(10).await.unwrap().len(), 1);

        let mut patch = Map::new();
        patch.insert("completed".into(), json!(true));
        assert!(tasks.update(&task.id, patch).await.unwrap());
        assert!(tasks.incomplete(10).await.unwrap().is_empty());
        assert_eq!(tasks.count_completed().await.unwrap(), 1);

        assert!(tasks.delete(&task.id).await.unwrap());
        assert_eq!(tasks.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_stamps_updated_at() {
        let (tasks, _) = repos();
        let task = tasks.create(new_task("stampable")).await.unwrap();
        let before = task.updated_at;

        tasks.update(&task.id, Map::new()).await.unwrap();
        let after = &tasks.list().await.unwrap()[0];
        assert!(after.updated_at >= before);
    }

    #[tokio::test]
    async fn memories_come_back_newest_first() {
        let (_, memories) = repos();
        for i in 0..3 {
            let mut memory = Memory::new(MemoryKind::Note, format!("note {i}"));
            memory.created_at =
                chrono::DateTime::from_timestamp(1_700_000_000 + i, 0).unwrap();
            memories.append(memory).await.unwrap();
        }

        let recent = memories.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].content, "note 2");
        assert_eq!(recent[1].content, "note 1");
    }

    #[tokio::test]
    async fn memory_deletion_is_explicit() {
        let (_, memories) = repos();
        let kept = memories
            .append(Memory::new(MemoryKind::Note, "keep"))
            .await
            .unwrap();
        memories
            .append(Memory::new(MemoryKind::Note, "drop"))
            .await
            .unwrap();

        assert_eq!(memories.count().await.unwrap(), 2);
        assert!(memories.delete(&kept.id).await.unwrap());
        assert_eq!(memories.clear().await.unwrap(), 1);
        assert_eq!(memories.count().await.unwrap(), 0);
    }
}
