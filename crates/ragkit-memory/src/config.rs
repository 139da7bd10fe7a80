use crate::embedding::{EmbeddingProvider, LocalEmbedding};
use crate::store::{InMemoryVectorStore, VectorStore};
use ragkit_core::{RagkitError, RagkitResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    Local,
}

/// `[embedding]` section of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub provider: EmbeddingBackend,
    #[serde(default = "default_embedding_model")]
    pub model_id: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Vector length. Defaults to 1536 for OpenAI and 256 for local.
    #[serde(default)]
    pub dimension: Option<usize>,
}

fn default_embedding_model() -> String {
    "text-embedding-ada-002".to_string()
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingBackend::default(),
            model_id: default_embedding_model(),
            api_key: String::new(),
            api_base_url: None,
            dimension: None,
        }
    }
}

impl EmbeddingConfig {
    pub fn build(&self) -> RagkitResult<Arc<dyn EmbeddingProvider>> {
        match self.provider {
            EmbeddingBackend::Local => Ok(Arc::new(LocalEmbedding::new(self.dimension.unwrap_or(256)))),
            EmbeddingBackend::OpenAi => self.build_openai(),
        }
    }

    #[cfg(feature = "http-embeddings")]
    fn build_openai(&self) -> RagkitResult<Arc<dyn EmbeddingProvider>> {
        use crate::embedding::OpenAiEmbedding;

        if self.api_key.is_empty() {
            return Err(RagkitError::Config(
                "OpenAI embeddings selected but no API key is configured (set OPENAI_API_KEY)."
                    .to_string(),
            ));
        }
        let mut emb = OpenAiEmbedding::new(self.api_key.clone())
            .with_model(self.model_id.clone())
            .with_dimension(self.dimension.unwrap_or(OpenAiEmbedding::DEFAULT_DIMENSION));
        if let Some(url) = &self.api_base_url {
            emb = emb.with_base_url(url.clone());
        }
        Ok(Arc::new(emb))
    }

    #[cfg(not(feature = "http-embeddings"))]
    fn build_openai(&self) -> RagkitResult<Arc<dyn EmbeddingProvider>> {
        Err(RagkitError::Config(
            "OpenAI embeddings require the `http-embeddings` feature".to_string(),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorStoreKind {
    #[default]
    Memory,
    Weaviate,
}

/// `[vector_store]` section of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreConfig {
    #[serde(default)]
    pub kind: VectorStoreKind,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_class_name")]
    pub class_name: String,
}

fn default_class_name() -> String {
    "Document".to_string()
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            kind: VectorStoreKind::default(),
            url: None,
            api_key: None,
            class_name: default_class_name(),
        }
    }
}

impl VectorStoreConfig {
    pub fn build(&self) -> RagkitResult<Arc<dyn VectorStore>> {
        match self.kind {
            VectorStoreKind::Memory => Ok(Arc::new(InMemoryVectorStore::new())),
            VectorStoreKind::Weaviate => self.build_weaviate(),
        }
    }

    #[cfg(feature = "http-vectorstore")]
    fn build_weaviate(&self) -> RagkitResult<Arc<dyn VectorStore>> {
        use crate::weaviate::WeaviateStore;

        let url = self.url.as_deref().filter(|u| !u.is_empty()).ok_or_else(|| {
            RagkitError::Config(
                "Weaviate vector store selected but no URL is configured (set WEAVIATE_URL)."
                    .to_string(),
            )
        })?;
        let mut store = WeaviateStore::new(url).with_class(self.class_name.clone());
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            store = store.with_api_key(key);
        }
        Ok(Arc::new(store))
    }

    #[cfg(not(feature = "http-vectorstore"))]
    fn build_weaviate(&self) -> RagkitResult<Arc<dyn VectorStore>> {
        Err(RagkitError::Config(
            "The Weaviate store requires the `http-vectorstore` feature".to_string(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_defaults() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.provider, EmbeddingBackend::OpenAi);
        assert_eq!(config.model_id, "text-embedding-ada-002");
    }

    #[test]
    fn test_embedding_provider_names() {
        assert_eq!(serde_json::to_string(&EmbeddingBackend::OpenAi).unwrap(), "\"openai\"");
        let local: EmbeddingBackend = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(local, EmbeddingBackend::Local);
    }

    #[test]
    fn test_local_embedding_build() {
        let config = EmbeddingConfig {
            provider: EmbeddingBackend::Local,
            dimension: Some(64),
            ..EmbeddingConfig::default()
        };
        assert_eq!(config.build().unwrap().dimension(), 64);
    }

    #[test]
    fn test_openai_embedding_requires_key() {
        let err = EmbeddingConfig::default().build().err().unwrap();
        assert!(matches!(err, RagkitError::Config(_)));
    }

    #[test]
    fn test_store_defaults_to_memory() {
        let config: VectorStoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.kind, VectorStoreKind::Memory);
        assert_eq!(config.class_name, "Document");
        assert!(config.build().is_ok());
    }

    #[test]
    fn test_weaviate_requires_url() {
        let config = VectorStoreConfig {
            kind: VectorStoreKind::Weaviate,
            ..VectorStoreConfig::default()
        };
        assert!(matches!(config.build().err().unwrap(), RagkitError::Config(_)));
    }
}
