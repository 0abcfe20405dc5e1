//! Assistant orchestration — one stateless provider conversation per call,
//! with the exchange written back into the memory log on success.
//!
//! This is the only component with an external-I/O failure mode. A
//! provider failure is absorbed into the outcome payload (`success =
//! false` plus an apology embedding the error detail); it never surfaces
//! as a transport-level error. Store failures, by contrast, propagate.

use std::sync::Arc;
use tracing::{error, info};

use crate::context::ContextAssembler;
use vitrine_core::error::Result;
use vitrine_core::memory::{Memory, MemoryKind};
use vitrine_core::provider::{ChatProvider, ChatRequest};
use vitrine_store::{MemoryRepository, TaskRepository};

/// The result of one assistant turn. `success` is the logical flag the
/// transport layer passes through unchanged.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub reply: String,
    pub success: bool,
}

/// Composes context, invokes the provider, and appends the exchange to
/// the memory log.
pub struct AssistantOrchestrator {
    provider: Arc<dyn ChatProvider>,
    tasks: TaskRepository,
    memories: MemoryRepository,
    assembler: ContextAssembler,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AssistantOrchestrator {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        tasks: TaskRepository,
        memories: MemoryRepository,
        model: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            provider,
            tasks,
            memories,
            assembler: ContextAssembler::new(),
            model: model.into(),
            temperature,
            max_tokens,
        }
    }

    /// Run one assistant turn for `user_message`.
    ///
    /// The memory log grows by one `conversation` entry per successful
    /// turn, unbounded — retention is deliberately left to explicit
    /// deletion through the memory API.
    pub async fn chat(&self, user_message: &str) -> Result<ChatOutcome> {
        let memories = self.memories.recent(self.assembler.max_memories).await?;
        let open_tasks = self.tasks.incomplete(self.assembler.max_tasks).await?;
        let system_prompt = self.assembler.assemble(&memories, &open_tasks);

        let request = ChatRequest {
            model: self.model.clone(),
            system_prompt,
            user_message: user_message.to_string(),
            temperature: self.temperature,
            max_tokens: Some(self.max_tokens),
        };

        match self.provider.complete(request).await {
            Ok(reply) => {
                self.memories
                    .append(Memory::new(
                        MemoryKind::Conversation,
                        format!("User: {user_message}\nAssistant: {}", reply.content),
                    ))
                    .await?;
                info!(model = %reply.model, "Assistant turn completed");
                Ok(ChatOutcome {
                    reply: reply.content,
                    success: true,
                })
            }
            Err(e) => {
                error!(error = %e, "Assistant provider call failed");
                Ok(ChatOutcome {
                    reply: format!(
                        "I apologize, I'm having trouble connecting right now. \
                         Please try again in a moment. Error: {e}"
                    ),
                    success: false,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use vitrine_core::error::ProviderError;
    use vitrine_core::provider::ChatReply;
    use vitrine_core::store::DocumentStore;
    use vitrine_core::task::{NewTask, Priority};
    use vitrine_store::InMemoryStore;

    /// Provider stub: either answers with a canned reply or fails.
    struct StubProvider {
        outcome: std::result::Result<String, ProviderError>,
        /// Captures the system prompt the orchestrator assembled.
        seen_prompt: std::sync::Mutex<Option<String>>,
    }

    impl StubProvider {
        fn replying(reply: &str) -> Self {
            Self {
                outcome: Ok(reply.into()),
                seen_prompt: std::sync::Mutex::new(None),
            }
        }

        fn failing(error: ProviderError) -> Self {
            Self {
                outcome: Err(error),
                seen_prompt: std::sync::Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ChatProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(&self, request: ChatRequest) -> std::result::Result<ChatReply, ProviderError> {
            *self.seen_prompt.lock().unwrap() = Some(request.system_prompt);
            match &self.outcome {
                Ok(content) => Ok(ChatReply {
                    content: content.clone(),
                    model: request.model,
                    usage: None,
                }),
                Err(e) => Err(e.clone()),
            }
        }
    }

    fn orchestrator(provider: Arc<StubProvider>) -> (AssistantOrchestrator, MemoryRepository, TaskRepository) {
        let store: Arc<dyn DocumentStore> = Arc::new(InMemoryStore::new());
        let tasks = TaskRepository::new(store.clone());
        let memories = MemoryRepository::new(store);
        let orchestrator = AssistantOrchestrator::new(
            provider,
            tasks.clone(),
            memories.clone(),
            "gpt-4.1-mini",
            0.7,
            1024,
        );
        (orchestrator, memories, tasks)
    }

    #[tokio::test]
    async fn success_appends_one_conversation_memory() {
        let provider = Arc::new(StubProvider::replying("Hello back!"));
        let (orchestrator, memories, _) = orchestrator(provider);

        let outcome = orchestrator.chat("Hello there").await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.reply, "Hello back!");

        let stored = memories.recent(10).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].kind, MemoryKind::Conversation);
        assert!(stored[0].content.contains("User: Hello there"));
        assert!(stored[0].content.contains("Assistant: Hello back!"));
    }

    #[tokio::test]
    async fn provider_failure_is_absorbed_and_writes_nothing() {
        let provider = Arc::new(StubProvider::failing(ProviderError::Network(
            "connection refused".into(),
        )));
        let (orchestrator, memories, _) = orchestrator(provider);

        let outcome = orchestrator.chat("Hello?").await.unwrap();
        assert!(!outcome.success);
        assert!(outcome.reply.contains("I apologize"));
        assert!(outcome.reply.contains("connection refused"));
        assert_eq!(memories.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn prompt_carries_memories_and_open_tasks() {
        let provider = Arc::new(StubProvider::replying("ok"));
        let (orchestrator, memories, tasks) = orchestrator(provider.clone());

        memories
            .append(Memory::new(MemoryKind::Preference, "Prefers morning meetings"))
            .await
            .unwrap();
        tasks
            .create(NewTask {
                title: "Renew domain".into(),
                description: String::new(),
                deadline: None,
                reminder_time: None,
                priority: Priority::High,
            })
            .await
            .unwrap();

        orchestrator.chat("What's on my plate?").await.unwrap();

        let prompt = provider.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("- Prefers morning meetings"));
        assert!(prompt.contains("Renew domain"));
    }
}
