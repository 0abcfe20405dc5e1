//! DocumentStore trait — the abstraction over the persistent document store.
//!
//! The store holds named collections of JSON documents keyed by a string
//! `id` field, with no foreign-key enforcement. Each operation is atomic on
//! its own; read-then-write sequences (such as computing the next gallery
//! order index) are not, and callers accept that race.
//!
//! Implementations: in-memory (default, process lifetime).

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreError;

/// Well-known collection names.
pub mod collections {
    pub const PORTFOLIO: &str = "portfolio";
    pub const TASKS: &str = "tasks";
    pub const ARTICLES: &str = "articles";
    pub const GALLERY: &str = "gallery";
    pub const MEMORIES: &str = "ai_memory";
    pub const NOTIFICATIONS: &str = "notifications";
}

/// Equality filter on a single top-level field.
#[derive(Debug, Clone)]
pub struct FieldFilter {
    pub field: String,
    pub equals: Value,
}

impl FieldFilter {
    pub fn new(field: impl Into<String>, equals: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            equals: equals.into(),
        }
    }
}

/// Sort order on a single top-level field. Strings compare lexically
/// (which orders RFC 3339 timestamps correctly), numbers numerically.
#[derive(Debug, Clone)]
pub struct SortSpec {
    pub field: String,
    pub descending: bool,
}

impl SortSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

/// A list query: optional filter, optional sort, hard limit.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub filter: Option<FieldFilter>,
    pub sort: Option<SortSpec>,
    pub limit: usize,
}

impl ListQuery {
    /// Everything in store order, up to `limit`.
    pub fn all(limit: usize) -> Self {
        Self {
            filter: None,
            sort: None,
            limit,
        }
    }

    pub fn filtered(mut self, filter: FieldFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sorted(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// The core DocumentStore trait.
///
/// Every handler and repository calls these primitives without knowing
/// which backend is in use — pure polymorphism.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// The backend name (e.g., "memory").
    fn name(&self) -> &str;

    /// Insert a document. It must carry a string `id` field.
    async fn insert(&self, collection: &str, document: Value) -> Result<(), StoreError>;

    /// Fetch a document by `id`.
    async fn find(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Fetch the first document in store order (singleton collections).
    async fn find_first(&self, collection: &str) -> Result<Option<Value>, StoreError>;

    /// List documents matching a query.
    async fn list(&self, collection: &str, query: ListQuery) -> Result<Vec<Value>, StoreError>;

    /// Merge `patch` into the document with the given `id`, field by field.
    /// Returns `false` when no such document exists.
    async fn merge(&self, collection: &str, id: &str, patch: Map<String, Value>)
    -> Result<bool, StoreError>;

    /// Merge `patch` into the first document of the collection, inserting
    /// the patch as a new document when the collection is empty.
    async fn upsert_first(
        &self,
        collection: &str,
        patch: Map<String, Value>,
    ) -> Result<(), StoreError>;

    /// Delete a document by `id`. Returns `false` when absent.
    async fn remove(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    /// Delete every document in the collection, returning how many went.
    async fn clear(&self, collection: &str) -> Result<u64, StoreError>;

    /// Count documents, optionally restricted by a field filter.
    async fn count(
        &self,
        collection: &str,
        filter: Option<FieldFilter>,
    ) -> Result<usize, StoreError>;
}
