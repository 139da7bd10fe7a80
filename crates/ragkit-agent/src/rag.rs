use crate::llm::LlmClient;
use crate::template;
use ragkit_core::RagkitResult;
use ragkit_memory::{Document, EmbeddingProvider, VectorStore};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_TOP_K: usize = 10;

const ANSWER_TEMPLATE: &str = "\
You are a helpful healthcare assistant. Answer the following question based on the provided context.
If the context doesn't contain enough information, state \"I do not know.\"

Context:
{context}

Question:
{question}

Answer:
";

/// Concatenate retrieved documents into one context block, in retrieval order.
pub fn build_context(documents: &[Document]) -> String {
    let mut context = String::new();
    for doc in documents {
        // writing into a String cannot fail
        let _ = write!(context, "Source: {}\nContent: {}\n\n", doc.source(), doc.content());
    }
    context
}

pub fn build_prompt(question: &str, context: &str) -> String {
    template::fill(ANSWER_TEMPLATE, &[("context", context), ("question", question)])
}

/// Outcome of [`RagPipeline::answer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RagAnswer {
    /// Retrieval returned nothing; the model was not called.
    NoDocuments,
    Answered {
        answer: String,
        /// Source labels of the documents placed in the context.
        sources: Vec<String>,
    },
}

/// Embed → search → assemble context → generate.
pub struct RagPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    llm: LlmClient,
    top_k: usize,
}

impl RagPipeline {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        llm: LlmClient,
    ) -> Self {
        Self {
            embedder,
            store,
            llm,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Embed and store each document. Returns how many were stored.
    pub async fn ingest(&self, documents: Vec<Document>) -> RagkitResult<usize> {
        let mut stored = 0;
        for doc in documents {
            let embedding = self.embedder.embed(doc.content()).await?;
            let id = self.store.insert(doc, embedding).await?;
            debug!(%id, "Document stored");
            stored += 1;
        }
        info!(count = stored, "Documents ingested");
        Ok(stored)
    }

    /// The `top_k` documents nearest to `query`.
    pub async fn retrieve(&self, query: &str) -> RagkitResult<Vec<Document>> {
        let query_embedding = self.embedder.embed(query).await?;
        let results = self.store.search(&query_embedding, self.top_k).await?;
        info!(top_k = self.top_k, hits = results.len(), "Retrieved documents");
        Ok(results.into_iter().map(|r| r.document).collect())
    }

    pub async fn generate_answer(&self, question: &str, context: &str) -> RagkitResult<String> {
        info!(model = self.llm.model_id(), "Generating answer");
        self.llm.prompt(&build_prompt(question, context)).await
    }

    pub async fn answer(&self, question: &str) -> RagkitResult<RagAnswer> {
        let documents = self.retrieve(question).await?;
        if documents.is_empty() {
            return Ok(RagAnswer::NoDocuments);
        }

        let context = build_context(&documents);
        let answer = self.generate_answer(question, &context).await?;
        Ok(RagAnswer::Answered {
            answer,
            sources: documents.iter().map(|d| d.source().to_string()).collect(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_build_context_format() {
        let docs = vec![
            Document::new("Asthma affects the airways.", "Asthma Overview"),
            Document::new("Flu is viral.", "Influenza Overview"),
        ];
        assert_eq!(
            build_context(&docs),
            "Source: Asthma Overview\nContent: Asthma affects the airways.\n\n\
             Source: Influenza Overview\nContent: Flu is viral.\n\n"
        );
        assert_eq!(build_context(&[]), "");
    }

    #[test]
    fn test_build_prompt_fills_placeholders() {
        let prompt = build_prompt("What is COPD?", "Source: COPD Overview\nContent: ...\n\n");
        assert!(prompt.starts_with("You are a helpful healthcare assistant."));
        assert!(prompt.contains("state \"I do not know.\""));
        assert!(prompt.contains("Context:\nSource: COPD Overview"));
        assert!(prompt.contains("Question:\nWhat is COPD?\n"));
        assert!(prompt.trim_end().ends_with("Answer:"));
        assert!(!prompt.contains("{context}"));
    }

    #[test]
    fn test_build_prompt_leaves_placeholders_in_context_alone() {
        let context = build_context(&[Document::new("Ask about {question} here.", "Forum")]);
        let prompt = build_prompt("What is flu?", &context);
        assert!(prompt.contains("Content: Ask about {question} here.\n"));
        assert!(prompt.contains("Question:\nWhat is flu?\n"));
    }
}
