use super::LlmBackend;
use crate::config::ModelConfig;
use async_trait::async_trait;
use ragkit_core::{Message, RagkitError, RagkitResult, Role};
use tracing::debug;

/// OpenAI-compatible chat completions backend.
///
/// Works with OpenAI and any server that implements `POST /v1/chat/completions`.
pub struct OpenAiBackend {
    config: ModelConfig,
    http: reqwest::Client,
}

impl OpenAiBackend {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn build_messages(
        &self,
        system_prompt: Option<&str>,
        messages: &[Message],
    ) -> Vec<serde_json::Value> {
        let mut api_messages: Vec<serde_json::Value> = Vec::new();

        if let Some(sys) = system_prompt {
            api_messages.push(serde_json::json!({
                "role": "system",
                "content": sys
            }));
        }

        for m in messages {
            api_messages.push(serde_json::json!({
                "role": match m.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                    Role::System => "system",
                },
                "content": m.content
            }));
        }

        api_messages
    }
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn complete(
        &self,
        system_prompt: Option<&str>,
        messages: &[Message],
    ) -> RagkitResult<String> {
        let url = format!("{}/v1/chat/completions", self.config.base_url());
        let body = serde_json::json!({
            "model": self.config.model_id,
            "messages": self.build_messages(system_prompt, messages),
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        });
        debug!(model = %self.config.model_id, messages = messages.len(), "Chat completion request");

        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| RagkitError::Http(e.to_string()))?;

        let status = resp.status();
        let resp_body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| RagkitError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(RagkitError::Generation(format!(
                "OpenAI API error {status}: {resp_body}"
            )));
        }

        parse_openai_response(&resp_body)
    }

    fn model_id(&self) -> &str {
        &self.config.model_id
    }
}

pub fn parse_openai_response(body: &serde_json::Value) -> RagkitResult<String> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(|text| text.trim().to_string())
        .ok_or_else(|| {
            RagkitError::Generation(format!("Response has no choices[0].message.content: {body}"))
        })
}
