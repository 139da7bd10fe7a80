//! Documents, embeddings and vector storage for retrieval-augmented generation.
//!
//! Embedding computation and vector indexing are delegated to external
//! services. The local embedder and the in-memory store let the pipeline
//! run offline and in tests.
//!
//! # Main types
//!
//! - [`Document`] — Immutable `{content, source}` pair.
//! - [`EmbeddingProvider`] — Trait for turning text into vectors.
//! - [`OpenAiEmbedding`] — OpenAI-compatible `/v1/embeddings` client.
//! - [`LocalEmbedding`] — Hashed bag-of-words embedding, no network.
//! - [`VectorStore`] — Trait for inserting and searching embedded documents.
//! - [`InMemoryVectorStore`] — Brute-force cosine store.
//! - [`WeaviateStore`] — Weaviate REST/GraphQL client.

/// Embedding and vector store selection from configuration.
pub mod config;
/// Document type and the builtin healthcare corpus.
pub mod document;
/// Embedding provider trait and implementations.
pub mod embedding;
/// Vector store trait and in-memory implementation.
pub mod store;
/// Weaviate-backed vector store.
#[cfg(feature = "http-vectorstore")]
pub mod weaviate;

pub use config::{EmbeddingBackend, EmbeddingConfig, VectorStoreConfig, VectorStoreKind};
pub use document::{healthcare_documents, Document};
#[cfg(feature = "http-embeddings")]
pub use embedding::OpenAiEmbedding;
pub use embedding::{EmbeddingProvider, LocalEmbedding};
pub use store::{cosine_similarity, InMemoryVectorStore, SearchResult, StoredDocument, VectorStore};
#[cfg(feature = "http-vectorstore")]
pub use weaviate::WeaviateStore;
