use ragkit_core::{RagkitError, RagkitResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI or any server exposing the OpenAI chat completions API.
    #[serde(rename = "openai", alias = "openai_compatible")]
    OpenAi,
    /// HuggingFace hosted inference (text generation task).
    HuggingFace,
}

impl FromStr for LlmProvider {
    type Err = RagkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "openai_compatible" => Ok(Self::OpenAi),
            "huggingface" => Ok(Self::HuggingFace),
            other => Err(RagkitError::Config(format!(
                "Unknown PROVIDER '{other}': expected 'huggingface' or 'openai_compatible'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_provider")]
    pub provider: LlmProvider,
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_provider() -> LlmProvider {
    LlmProvider::OpenAi
}

fn default_model_id() -> String {
    "gpt-4".to_string()
}

fn default_temperature() -> f32 {
    0.5
}

fn default_max_tokens() -> u32 {
    1500
}

impl Default for ModelConfig {
    /// The healthcare RAG generation settings.
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model_id: default_model_id(),
            api_key: String::new(),
            api_base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl ModelConfig {
    pub fn base_url(&self) -> &str {
        if let Some(url) = &self.api_base_url {
            url.trim_end_matches('/')
        } else {
            match self.provider {
                LlmProvider::OpenAi => "https://api.openai.com",
                LlmProvider::HuggingFace => "https://api-inference.huggingface.co",
            }
        }
    }

    /// Meal bot backend from `PROVIDER`, `LLAMA_MODEL`,
    /// `HUGGINGFACEHUB_API_TOKEN` / `OPENAI_API_KEY` and `OPENAI_API_BASE`.
    pub fn from_env() -> RagkitResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ModelConfig::from_env`] with an explicit variable lookup.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> RagkitResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match get("PROVIDER") {
            Some(value) => value.parse()?,
            None => LlmProvider::HuggingFace,
        };
        let model_id = get("LLAMA_MODEL");

        let (api_key, api_base_url) = match provider {
            LlmProvider::HuggingFace => {
                let (Some(token), Some(_)) = (get("HUGGINGFACEHUB_API_TOKEN"), &model_id) else {
                    return Err(RagkitError::Config(
                        "HuggingFace provider selected but HUGGINGFACEHUB_API_TOKEN or LLAMA_MODEL is not set."
                            .to_string(),
                    ));
                };
                (token, None)
            }
            LlmProvider::OpenAi => {
                let (Some(key), Some(_)) = (get("OPENAI_API_KEY"), &model_id) else {
                    return Err(RagkitError::Config(
                        "OpenAI-compatible provider selected but OPENAI_API_KEY or LLAMA_MODEL is not set."
                            .to_string(),
                    ));
                };
                (key, get("OPENAI_API_BASE"))
            }
        };

        Ok(Self {
            provider,
            model_id: model_id.unwrap_or_default(),
            api_key,
            api_base_url,
            temperature: 0.7,
            max_tokens: 512,
        })
    }
}
