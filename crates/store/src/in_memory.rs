//! In-memory backend — the default store; process lifetime, no persistence.
//!
//! Collections are Vecs of JSON documents in insertion order, which is all
//! the "store order" the contract promises. Each trait method takes the
//! lock once, so individual operations are atomic; sequences of them are
//! not.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;

use vitrine_core::error::StoreError;
use vitrine_core::store::{DocumentStore, FieldFilter, ListQuery};

/// An in-memory document store backed by a map of collection name → Vec.
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn doc_id(document: &Value) -> Result<&str, StoreError> {
    document
        .get("id")
        .and_then(Value::as_str)
        .ok_or(StoreError::MissingId)
}

fn matches(document: &Value, filter: &FieldFilter) -> bool {
    document.get(&filter.field) == Some(&filter.equals)
}

/// Order two field values: numbers numerically, strings lexically.
/// Mixed or missing values sort as equal, keeping the comparison total.
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert(&self, collection: &str, document: Value) -> Result<(), StoreError> {
        doc_id(&document)?;
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn find(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.get("id").and_then(Value::as_str) == Some(id)))
            .cloned())
    }

    async fn find_first(&self, collection: &str) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.first())
            .cloned())
    }

    async fn list(&self, collection: &str, query: ListQuery) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        let mut results: Vec<Value> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| query.filter.as_ref().is_none_or(|f| matches(d, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sort) = &query.sort {
            results.sort_by(|a, b| {
                let ordering = compare_field(a.get(&sort.field), b.get(&sort.field));
                if sort.descending { ordering.reverse() } else { ordering }
            });
        }
        results.truncate(query.limit);
        Ok(results)
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let Some(doc) = docs
            .iter_mut()
            .find(|d| d.get("id").and_then(Value::as_str) == Some(id))
        else {
            return Ok(false);
        };
        if let Value::Object(fields) = doc {
            for (key, value) in patch {
                // `id` is immutable after creation
                if key != "id" {
                    fields.insert(key, value);
                }
            }
        }
        Ok(true)
    }

    async fn upsert_first(
        &self,
        collection: &str,
        patch: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.first_mut() {
            Some(Value::Object(fields)) => {
                for (key, value) in patch {
                    fields.insert(key, value);
                }
            }
            _ => docs.push(Value::Object(patch)),
        }
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.get("id").and_then(Value::as_str) != Some(id));
        Ok(docs.len() < before)
    }

    async fn clear(&self, collection: &str) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let removed = collections
            .get_mut(collection)
            .map(|docs| {
                let n = docs.len();
                docs.clear();
                n
            })
            .unwrap_or(0);
        Ok(removed as u64)
    }

    async fn count(
        &self,
        collection: &str,
        filter: Option<FieldFilter>,
    ) -> Result<usize, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| filter.as_ref().is_none_or(|f| matches(d, f)))
                    .count()
            })
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vitrine_core::store::SortSpec;

    #[tokio::test]
    async fn insert_and_find() {
        let store = InMemoryStore::new();
        store
            .insert("tasks", json!({"id": "t1", "title": "one"}))
            .await
            .unwrap();

        let found = store.find("tasks", "t1").await.unwrap();
        assert_eq!(found.unwrap()["title"], "one");
        assert!(store.find("tasks", "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_rejects_missing_id() {
        let store = InMemoryStore::new();
        let err = store.insert("tasks", json!({"title": "no id"})).await;
        assert!(matches!(err, Err(StoreError::MissingId)));
    }

    #[tokio::test]
    async fn list_filters_sorts_and_limits() {
        let store = InMemoryStore::new();
        for (id, done, created) in [
            ("a", false, "2025-01-03T00:00:00Z"),
            ("b", true, "2025-01-01T00:00:00Z"),
            ("c", false, "2025-01-02T00:00:00Z"),
        ] {
            store
                .insert(
                    "tasks",
                    json!({"id": id, "completed": done, "created_at": created}),
                )
                .await
                .unwrap();
        }

        let open = store
            .list(
                "tasks",
                ListQuery::all(10)
                    .filtered(FieldFilter::new("completed", false))
                    .sorted(SortSpec::descending("created_at")),
            )
            .await
            .unwrap();
        let ids: Vec<&str> = open.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["a", "c"]);

        let limited = store.list("tasks", ListQuery::all(1)).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn merge_updates_fields_but_never_id() {
        let store = InMemoryStore::new();
        store
            .insert("tasks", json!({"id": "t1", "title": "old", "completed": false}))
            .await
            .unwrap();

        let mut patch = Map::new();
        patch.insert("title".into(), json!("new"));
        patch.insert("id".into(), json!("hijacked"));
        assert!(store.merge("tasks", "t1", patch).await.unwrap());

        let doc = store.find("tasks", "t1").await.unwrap().unwrap();
        assert_eq!(doc["title"], "new");
        assert_eq!(doc["id"], "t1");

        assert!(!store.merge("tasks", "nope", Map::new()).await.unwrap());
    }

    #[tokio::test]
    async fn upsert_first_inserts_then_merges() {
        let store = InMemoryStore::new();
        let mut patch = Map::new();
        patch.insert("id".into(), json!("p1"));
        patch.insert("name".into(), json!("Ada"));
        store.upsert_first("portfolio", patch).await.unwrap();
        assert_eq!(store.count("portfolio", None).await.unwrap(), 1);

        let mut patch = Map::new();
        patch.insert("name".into(), json!("Grace"));
        store.upsert_first("portfolio", patch).await.unwrap();
        assert_eq!(store.count("portfolio", None).await.unwrap(), 1);
        let doc = store.find_first("portfolio").await.unwrap().unwrap();
        assert_eq!(doc["name"], "Grace");
    }

    #[tokio::test]
    async fn remove_clear_and_count() {
        let store = InMemoryStore::new();
        store
            .insert("gallery", json!({"id": "g1", "visible": true}))
            .await
            .unwrap();
        store
            .insert("gallery", json!({"id": "g2", "visible": false}))
            .await
            .unwrap();

        assert_eq!(store.count("gallery", None).await.unwrap(), 2);
        assert_eq!(
            store
                .count("gallery", Some(FieldFilter::new("visible", true)))
                .await
                .unwrap(),
            1
        );

        assert!(store.remove("gallery", "g1").await.unwrap());
        assert!(!store.remove("gallery", "g1").await.unwrap());
        assert_eq!(store.clear("gallery").await.unwrap(), 1);
        assert_eq!(store.count("gallery", None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn numeric_sort_orders_gallery() {
        let store = InMemoryStore::new();
        for (id, order) in [("g1", 2), ("g2", 0), ("g3", 1)] {
            store
                .insert("gallery", json!({"id": id, "order": order}))
                .await
                .unwrap();
        }
        let sorted = store
            .list(
                "gallery",
                ListQuery::all(10).sorted(SortSpec::ascending("order")),
            )
            .await
            .unwrap();
        let ids: Vec<&str> = sorted.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["g2", "g3", "g1"]);
    }
}
