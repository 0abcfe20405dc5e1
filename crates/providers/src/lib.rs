//! LLM provider implementations for Vitrine.
//!
//! Every provider implements [`vitrine_core::ChatProvider`]; the
//! orchestrator calls `complete()` without knowing which backend is in use.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

use std::sync::Arc;
use vitrine_config::AssistantConfig;
use vitrine_core::ChatProvider;

/// Build the configured provider.
pub fn build_from_config(config: &AssistantConfig) -> Arc<dyn ChatProvider> {
    Arc::new(OpenAiCompatProvider::new(
        "openai",
        &config.base_url,
        &config.api_key,
    ))
}
