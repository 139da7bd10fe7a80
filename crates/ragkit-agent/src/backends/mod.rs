pub mod huggingface;
pub mod openai;

use async_trait::async_trait;
use ragkit_core::{Message, RagkitResult};

/// Trait for text generation backends.
///
/// Each provider implements a single non-streaming completion call with
/// the temperature and token limit from its [`crate::ModelConfig`].
///
/// To add a new provider:
/// 1. Create a new module in `backends/`
/// 2. Implement `LlmBackend` for your struct
/// 3. Add the variant to `LlmProvider` in `config.rs`
/// 4. Wire it up in `LlmClient::new()` in `llm.rs`
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Generate a reply to `messages`, returned trimmed.
    async fn complete(
        &self,
        system_prompt: Option<&str>,
        messages: &[Message],
    ) -> RagkitResult<String>;

    /// Model identifier sent to the provider.
    fn model_id(&self) -> &str;
}
