//! # Vitrine Core
//!
//! Domain types, traits, and error definitions for the Vitrine portfolio
//! backend. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! External collaborators (the document store, the LLM provider) are defined
//! as traits here. Implementations live in their respective crates. This
//! enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod document;
pub mod error;
pub mod memory;
pub mod provider;
pub mod store;
pub mod suggestion;
pub mod task;

// Re-export key types at crate root for ergonomics
pub use document::{Article, Comment, GalleryPhoto, NewArticle, Notification, Portfolio};
pub use error::{AuthError, Error, ProviderError, Result, StoreError};
pub use memory::{Memory, MemoryKind};
pub use provider::{ChatProvider, ChatReply, ChatRequest, Usage};
pub use store::{DocumentStore, FieldFilter, ListQuery, SortSpec, collections};
pub use suggestion::{Suggestion, SuggestionKind};
pub use task::{NewTask, Priority, Task};
