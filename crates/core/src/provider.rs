//! ChatProvider trait — the abstraction over the external LLM provider.
//!
//! A ChatProvider accepts a system prompt and a user message and returns a
//! text completion. Every call is a fresh, stateless conversation; the
//! assistant's continuity lives in the memory log, not in provider-side
//! session state.
//!
//! Implementations: OpenAI-compatible endpoints (OpenAI, OpenRouter,
//! Ollama, vLLM, …).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// A single stateless completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The model to use (e.g., "gpt-4.1-mini")
    pub model: String,

    /// The assembled system prompt (persona + memory + task context)
    pub system_prompt: String,

    /// The user's message
    pub user_message: String,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

/// A completion from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// The generated text
    pub content: String,

    /// Which model actually responded (may differ from requested)
    pub model: String,

    /// Token usage statistics, when the provider reports them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core ChatProvider trait.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ProviderError>;

    /// Health check — can we reach the provider?
    async fn health_check(&self) -> Result<bool, ProviderError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_defaults() {
        let request: ChatRequest = serde_json::from_str(
            r#"{
                "model": "gpt-4.1-mini",
                "system_prompt": "You are helpful.",
                "user_message": "hi"
            }"#,
        )
        .unwrap();
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert!(request.max_tokens.is_none());
    }

    #[test]
    fn chat_reply_serialization() {
        let reply = ChatReply {
            content: "Hello!".into(),
            model: "gpt-4.1-mini".into(),
            usage: None,
        };
        let json = serde_json::to_string(&reply).unwrap();
        assert!(json.contains("Hello!"));
        assert!(!json.contains("usage"));
    }
}
