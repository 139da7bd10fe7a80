use async_trait::async_trait;
use ragkit_core::{RagkitError, RagkitResult};
use std::collections::HashMap;

/// Trait for computing text embeddings (vector representations).
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Compute embedding vector for a single text.
    async fn embed(&self, text: &str) -> RagkitResult<Vec<f32>>;

    /// Compute embeddings for several texts, one call per text.
    async fn embed_batch(&self, texts: &[&str]) -> RagkitResult<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Dimension of the embedding vectors produced by this provider.
    fn dimension(&self) -> usize;
}

/// Hashed bag-of-words embedding. Deterministic and offline.
///
/// Each lowercase word contributes its term frequency to three hashed
/// slots; the result is L2-normalized.
pub struct LocalEmbedding {
    dimension: usize,
}

impl LocalEmbedding {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }
}

impl Default for LocalEmbedding {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl EmbeddingProvider for LocalEmbedding {
    async fn embed(&self, text: &str) -> RagkitResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(RagkitError::Embedding("Cannot embed empty text".to_string()));
        }

        let lowered = text.to_lowercase();
        let mut freq: HashMap<&str, f32> = HashMap::new();
        let mut total = 0.0f32;
        for word in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() > 1)
        {
            *freq.entry(word).or_insert(0.0) += 1.0;
            total += 1.0;
        }

        let mut vector = vec![0.0f32; self.dimension];
        if total == 0.0 {
            return Ok(vector);
        }

        for (word, count) in &freq {
            let tf = count / total;
            for (salt, weight) in [(0u8, 1.0f32), (1, 0.7), (2, 0.5)] {
                let slot = fnv1a(word.as_bytes(), salt) as usize % self.dimension;
                vector[slot] += tf * weight;
            }
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// FNV-1a over `data` followed by `salt` (salt 0 hashes `data` alone).
fn fnv1a(data: &[u8], salt: u8) -> u32 {
    let mut hash: u32 = 2_166_136_261;
    let tail: &[u8] = if salt == 0 { &[] } else { std::slice::from_ref(&salt) };
    for &byte in data.iter().chain(tail) {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(16_777_619);
    }
    hash
}

#[cfg(feature = "http-embeddings")]
pub use self::openai::OpenAiEmbedding;

#[cfg(feature = "http-embeddings")]
mod openai {
    use super::EmbeddingProvider;
    use async_trait::async_trait;
    use ragkit_core::{RagkitError, RagkitResult};
    use tracing::debug;

    /// Client for the OpenAI-compatible `POST /v1/embeddings` endpoint.
    pub struct OpenAiEmbedding {
        model_id: String,
        api_key: String,
        base_url: String,
        dimension: usize,
        http: reqwest::Client,
    }

    impl OpenAiEmbedding {
        pub const DEFAULT_MODEL: &'static str = "text-embedding-ada-002";
        pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com";
        pub const DEFAULT_DIMENSION: usize = 1536;

        pub fn new(api_key: impl Into<String>) -> Self {
            Self {
                model_id: Self::DEFAULT_MODEL.to_string(),
                api_key: api_key.into(),
                base_url: Self::DEFAULT_BASE_URL.to_string(),
                dimension: Self::DEFAULT_DIMENSION,
                http: reqwest::Client::new(),
            }
        }

        pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
            self.model_id = model_id.into();
            self
        }

        pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
            self.base_url = base_url.into().trim_end_matches('/').to_string();
            self
        }

        pub fn with_dimension(mut self, dimension: usize) -> Self {
            self.dimension = dimension;
            self
        }
    }

    #[async_trait]
    impl EmbeddingProvider for OpenAiEmbedding {
        async fn embed(&self, text: &str) -> RagkitResult<Vec<f32>> {
            let url = format!("{}/v1/embeddings", self.base_url);
            debug!(model = %self.model_id, chars = text.len(), "Requesting embedding");

            let resp = self
                .http
                .post(&url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&serde_json::json!({
                    "model": self.model_id,
                    "input": text,
                }))
                .send()
                .await
                .map_err(|e| RagkitError::Http(e.to_string()))?;

            let status = resp.status();
            let body: serde_json::Value = resp
                .json()
                .await
                .map_err(|e| RagkitError::Http(e.to_string()))?;

            if !status.is_success() {
                return Err(RagkitError::Embedding(format!(
                    "Embedding API error {status}: {body}"
                )));
            }

            parse_embedding_response(&body)
        }

        fn dimension(&self) -> usize {
            self.dimension
        }
    }

    pub(crate) fn parse_embedding_response(body: &serde_json::Value) -> RagkitResult<Vec<f32>> {
        let values = body["data"][0]["embedding"].as_array().ok_or_else(|| {
            RagkitError::Embedding(format!("Response has no data[0].embedding: {body}"))
        })?;
        values
            .iter()
            .map(|v| {
                v.as_f64()
                    .map(|f| f as f32)
                    .ok_or_else(|| RagkitError::Embedding(format!("Non-numeric embedding value: {v}")))
            })
            .collect()
    }

    #[cfg(test)]
    #[allow(clippy::unwrap_used, clippy::expect_used)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_embedding_response() {
            let body = serde_json::json!({
                "object": "list",
                "data": [{"object": "embedding", "index": 0, "embedding": [0.5, -0.25, 1.0]}],
                "model": "text-embedding-ada-002"
            });
            assert_eq!(parse_embedding_response(&body).unwrap(), vec![0.5, -0.25, 1.0]);
        }

        #[test]
        fn test_parse_embedding_response_missing_data() {
            let body = serde_json::json!({"error": {"message": "bad key"}});
            assert!(matches!(
                parse_embedding_response(&body),
                Err(RagkitError::Embedding(_))
            ));
        }
    }
}
