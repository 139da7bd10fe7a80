use crate::backends::huggingface::HuggingFaceBackend;
use crate::backends::openai::OpenAiBackend;
use crate::backends::LlmBackend;
use crate::config::{LlmProvider, ModelConfig};
use ragkit_core::{Message, RagkitResult};

/// LLM client that dispatches to the correct provider backend.
pub struct LlmClient {
    backend: Box<dyn LlmBackend>,
}

impl LlmClient {
    pub fn new(config: ModelConfig) -> Self {
        let backend: Box<dyn LlmBackend> = match config.provider {
            LlmProvider::OpenAi => Box::new(OpenAiBackend::new(config)),
            LlmProvider::HuggingFace => Box::new(HuggingFaceBackend::new(config)),
        };
        Self { backend }
    }

    /// Create from a pre-built backend (for custom providers and tests).
    pub fn from_backend(backend: Box<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    pub fn model_id(&self) -> &str {
        self.backend.model_id()
    }

    pub async fn complete(
        &self,
        system_prompt: Option<&str>,
        messages: &[Message],
    ) -> RagkitResult<String> {
        self.backend.complete(system_prompt, messages).await
    }

    /// Send one fully-rendered prompt as a single user message.
    pub async fn prompt(&self, prompt: &str) -> RagkitResult<String> {
        self.complete(None, &[Message::user(prompt)]).await
    }
}
