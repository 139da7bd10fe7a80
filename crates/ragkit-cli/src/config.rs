use ragkit_agent::{MealSettings, ModelConfig};
use ragkit_memory::{EmbeddingConfig, VectorStoreConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked for in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "ragkit.toml";

/// Contents of `ragkit.toml`. Every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct RagkitConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub vector_store: VectorStoreConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub text: TextConfig,
    #[serde(default)]
    pub meal: MealSettings,
}

#[derive(Debug, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TextConfig {
    /// Replaces the builtin Persian list when set.
    #[serde(default)]
    pub stop_words: Option<Vec<String>>,
    #[serde(default)]
    pub extra_stop_words: Vec<String>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            stop_words: None,
            extra_stop_words: Vec::new(),
            output: default_output(),
        }
    }
}

fn default_top_k() -> usize {
    ragkit_agent::rag::DEFAULT_TOP_K
}

fn default_output() -> PathBuf {
    PathBuf::from("word_frequencies.json")
}

impl RagkitConfig {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file yields the defaults.
    pub async fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let config_str = match tokio::fs::read_to_string(&path).await {
            Ok(s) => s,
            Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ));
            }
        };
        Self::parse(&config_str)
    }

    pub fn parse(config_str: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(config_str)?)
    }

    /// Fill credentials and endpoints from the environment.
    pub fn apply_env(&mut self) {
        self.apply_lookup(|key| std::env::var(key).ok());
    }

    /// `OPENAI_API_KEY` fills API keys left empty in the file.
    /// `WEAVIATE_URL` and `WEAVIATE_API_KEY` override the store settings.
    pub fn apply_lookup<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = var("OPENAI_API_KEY") {
            if self.model.api_key.is_empty() {
                self.model.api_key = key.clone();
            }
            if self.embedding.api_key.is_empty() {
                self.embedding.api_key = key;
            }
        }
        if let Some(url) = var("WEAVIATE_URL") {
            self.vector_store.url = Some(url);
        }
        if let Some(key) = var("WEAVIATE_API_KEY") {
            self.vector_store.api_key = Some(key);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use ragkit_agent::LlmProvider;
    use ragkit_memory::{EmbeddingBackend, VectorStoreKind};
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = RagkitConfig::parse("").unwrap();
        assert_eq!(config.model.provider, LlmProvider::OpenAi);
        assert_eq!(config.model.model_id, "gpt-4");
        assert_eq!(config.embedding.provider, EmbeddingBackend::OpenAi);
        assert_eq!(config.vector_store.kind, VectorStoreKind::Memory);
        assert_eq!(config.retrieval.top_k, 10);
        assert_eq!(config.text.output, PathBuf::from("word_frequencies.json"));
        assert!(config.text.stop_words.is_none());
        assert_eq!(config.meal.fallback_threshold, 2);
        assert_eq!(config.meal.history_limit, 10);
    }

    #[test]
    fn test_sections_parse() {
        let config = RagkitConfig::parse(
            r#"
            [model]
            model_id = "gpt-4o-mini"
            temperature = 0.2

            [embedding]
            provider = "local"
            dimension = 128

            [vector_store]
            kind = "weaviate"
            url = "http://localhost:8080"
            class_name = "Article"

            [retrieval]
            top_k = 4

            [text]
            stop_words = ["the", "a"]
            output = "out/freq.json"

            [meal]
            fallback_threshold = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.model.model_id, "gpt-4o-mini");
        assert_eq!(config.model.max_tokens, 1500);
        assert_eq!(config.embedding.provider, EmbeddingBackend::Local);
        assert_eq!(config.embedding.dimension, Some(128));
        assert_eq!(config.vector_store.kind, VectorStoreKind::Weaviate);
        assert_eq!(config.vector_store.class_name, "Article");
        assert_eq!(config.retrieval.top_k, 4);
        assert_eq!(config.text.stop_words.as_deref().unwrap(), ["the", "a"]);
        assert_eq!(config.meal.fallback_threshold, 3);
        assert_eq!(config.meal.max_ingredient_score, 5);
    }

    #[test]
    fn test_example_config_parses() {
        let config =
            RagkitConfig::parse(include_str!("../../../ragkit.toml.example")).unwrap();
        assert_eq!(config.retrieval.top_k, 10);
        assert_eq!(config.embedding.model_id, "text-embedding-ada-002");
        assert!(config.text.extra_stop_words.is_empty());
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        assert!(RagkitConfig::parse("[embedding]\nprovider = \"cohere\"").is_err());
    }

    #[test]
    fn test_env_fills_empty_keys_only() {
        let mut config = RagkitConfig::parse("[model]\napi_key = \"from-file\"").unwrap();
        config.apply_lookup(lookup(&[
            ("OPENAI_API_KEY", "from-env"),
            ("WEAVIATE_URL", "http://weaviate:8080"),
        ]));
        assert_eq!(config.model.api_key, "from-file");
        assert_eq!(config.embedding.api_key, "from-env");
        assert_eq!(
            config.vector_store.url.as_deref(),
            Some("http://weaviate:8080")
        );
        assert!(config.vector_store.api_key.is_none());
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = RagkitConfig::default();
        config.apply_lookup(lookup(&[("OPENAI_API_KEY", "  "), ("WEAVIATE_URL", "")]));
        assert!(config.model.api_key.is_empty());
        assert!(config.vector_store.url.is_none());
    }

    #[tokio::test]
    async fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[retrieval]\ntop_k = 2\n").unwrap();
        let config = RagkitConfig::load(Some(&path)).await.unwrap();
        assert_eq!(config.retrieval.top_k, 2);
    }

    #[tokio::test]
    async fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = RagkitConfig::load(Some(&dir.path().join("nope.toml")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
