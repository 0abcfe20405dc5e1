//! The assistant's decision logic: proactive suggestions, context
//! assembly, and orchestration of the external LLM call.
//!
//! - [`SuggestionEngine`] derives advisory notices from incomplete tasks
//!   and the current time.
//! - [`ContextAssembler`] builds the bounded system prompt from recent
//!   memories and outstanding tasks.
//! - [`AssistantOrchestrator`] wires both to the provider and writes each
//!   successful exchange back into the memory log.

pub mod context;
pub mod orchestrator;
pub mod suggest;

pub use context::ContextAssembler;
pub use orchestrator::{AssistantOrchestrator, ChatOutcome};
pub use suggest::{SuggestionEngine, parse_deadline};
