//! Document store backends and typed repositories for Vitrine.
//!
//! The store itself speaks raw JSON documents (see
//! [`vitrine_core::store::DocumentStore`]); the repositories in this crate
//! put typed `Task` and `Memory` accessors on top for the components that
//! carry actual logic.

pub mod in_memory;
pub mod repository;
pub mod seed;

pub use in_memory::InMemoryStore;
pub use repository::{MemoryRepository, TaskRepository};
pub use seed::seed_defaults;
