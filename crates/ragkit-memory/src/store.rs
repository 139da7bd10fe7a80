use crate::document::Document;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ragkit_core::{RagkitError, RagkitResult};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A document as held by a store, together with its embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: Uuid,
    pub document: Document,
    pub embedding: Vec<f32>,
    pub created_at: DateTime<Utc>,
}

/// Result of a similarity search. Higher `score` means more similar.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub document: Document,
    pub score: f32,
}

/// Trait for vector storage backends.
///
/// Stores are append-only: there is no update or delete.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Store a document under its embedding. Returns the assigned id.
    async fn insert(&self, document: Document, embedding: Vec<f32>) -> RagkitResult<Uuid>;

    /// Return the `top_k` stored documents nearest to `query_embedding`,
    /// most similar first, under the backend's own metric.
    async fn search(&self, query_embedding: &[f32], top_k: usize)
        -> RagkitResult<Vec<SearchResult>>;

    /// Number of stored documents.
    async fn count(&self) -> RagkitResult<usize>;
}

/// In-memory vector store using brute-force cosine similarity.
pub struct InMemoryVectorStore {
    entries: RwLock<Vec<StoredDocument>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn insert(&self, document: Document, embedding: Vec<f32>) -> RagkitResult<Uuid> {
        if embedding.is_empty() {
            return Err(RagkitError::VectorStore("Empty document embedding".to_string()));
        }
        let id = Uuid::new_v4();
        self.entries.write().await.push(StoredDocument {
            id,
            document,
            embedding,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> RagkitResult<Vec<SearchResult>> {
        if query_embedding.is_empty() {
            return Err(RagkitError::VectorStore("Empty query embedding".to_string()));
        }

        let entries = self.entries.read().await;
        let mut scored: Vec<SearchResult> = entries
            .iter()
            .map(|e| SearchResult {
                document: e.document.clone(),
                score: cosine_similarity(query_embedding, &e.embedding),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);

        Ok(scored)
    }

    async fn count(&self) -> RagkitResult<usize> {
        Ok(self.entries.read().await.len())
    }
}

/// Cosine similarity between two vectors. Mismatched lengths or a zero
/// vector score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na * nb)
    }
}
