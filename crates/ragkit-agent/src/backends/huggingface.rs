use super::LlmBackend;
use crate::config::ModelConfig;
use async_trait::async_trait;
use ragkit_core::{Message, RagkitError, RagkitResult};
use tracing::debug;

/// HuggingFace hosted inference backend for text-generation models.
///
/// The task takes a single prompt string, so the system prompt and all
/// messages are joined with blank lines.
pub struct HuggingFaceBackend {
    config: ModelConfig,
    http: reqwest::Client,
}

impl HuggingFaceBackend {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

fn flatten_prompt(system_prompt: Option<&str>, messages: &[Message]) -> String {
    system_prompt
        .into_iter()
        .chain(messages.iter().map(|m| m.content.as_str()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[async_trait]
impl LlmBackend for HuggingFaceBackend {
    async fn complete(
        &self,
        system_prompt: Option<&str>,
        messages: &[Message],
    ) -> RagkitResult<String> {
        let url = format!("{}/models/{}", self.config.base_url(), self.config.model_id);
        let body = serde_json::json!({
            "inputs": flatten_prompt(system_prompt, messages),
            "parameters": {
                "temperature": self.config.temperature,
                "max_new_tokens": self.config.max_tokens,
                "return_full_text": false,
            },
        });
        debug!(model = %self.config.model_id, "HuggingFace inference request");

        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
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
                "HuggingFace API error {status}: {resp_body}"
            )));
        }

        parse_huggingface_response(&resp_body)
    }

    fn model_id(&self) -> &str {
        &self.config.model_id
    }
}

/// Accepts `[{"generated_text": ..}]` or a bare `{"generated_text": ..}`.
pub fn parse_huggingface_response(body: &serde_json::Value) -> RagkitResult<String> {
    if let Some(err) = body["error"].as_str() {
        return Err(RagkitError::Generation(format!("HuggingFace error: {err}")));
    }
    let item = if body.is_array() { &body[0] } else { body };
    item["generated_text"]
        .as_str()
        .map(|text| text.trim().to_string())
        .ok_or_else(|| {
            RagkitError::Generation(format!("Response has no generated_text: {body}"))
        })
}
