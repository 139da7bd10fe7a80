use crate::document::Document;
use crate::store::{SearchResult, VectorStore};
use async_trait::async_trait;
use ragkit_core::{RagkitError, RagkitResult};
use tracing::debug;
use uuid::Uuid;

/// Vector store backed by a Weaviate instance.
///
/// Objects are created through the REST API with a caller-supplied vector;
/// search and count go through GraphQL `Get` / `Aggregate` queries.
pub struct WeaviateStore {
    base_url: String,
    class_name: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl WeaviateStore {
    pub const DEFAULT_CLASS: &'static str = "Document";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            class_name: Self::DEFAULT_CLASS.to_string(),
            api_key: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {key}")),
            None => request,
        }
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> RagkitResult<serde_json::Value> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .authorize(self.http.post(&url))
            .json(body)
            .send()
            .await
            .map_err(|e| RagkitError::Http(e.to_string()))?;

        let status = resp.status();
        let resp_body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| RagkitError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(RagkitError::VectorStore(format!(
                "Weaviate error {status}: {resp_body}"
            )));
        }
        Ok(resp_body)
    }

    async fn graphql(&self, query: String) -> RagkitResult<serde_json::Value> {
        let body = self
            .post_json("/v1/graphql", &serde_json::json!({ "query": query }))
            .await?;
        if let Some(errors) = body["errors"].as_array() {
            if !errors.is_empty() {
                return Err(RagkitError::VectorStore(format!(
                    "Weaviate GraphQL errors: {}",
                    serde_json::Value::Array(errors.clone())
                )));
            }
        }
        Ok(body)
    }
}

/// GraphQL `Get` query for the `top_k` nearest objects of `class`.
pub fn near_vector_query(class: &str, vector: &[f32], top_k: usize) -> RagkitResult<String> {
    let vector = serde_json::to_string(vector)?;
    Ok(format!(
        "{{ Get {{ {class}(nearVector: {{vector: {vector}}}, limit: {top_k}) \
         {{ content source _additional {{ distance }} }} }} }}"
    ))
}

pub(crate) fn parse_search_response(
    body: &serde_json::Value,
    class: &str,
) -> RagkitResult<Vec<SearchResult>> {
    let hits = match body["data"]["Get"][class].as_array() {
        Some(hits) => hits,
        None if body["data"]["Get"][class].is_null() => return Ok(Vec::new()),
        None => {
            return Err(RagkitError::VectorStore(format!(
                "Unexpected Weaviate search response: {body}"
            )))
        }
    };

    Ok(hits
        .iter()
        .map(|hit| {
            let distance = hit["_additional"]["distance"].as_f64().unwrap_or(1.0) as f32;
            SearchResult {
                document: Document::new(
                    hit["content"].as_str().unwrap_or_default(),
                    hit["source"].as_str().unwrap_or_default(),
                ),
                score: 1.0 - distance,
            }
        })
        .collect())
}

#[async_trait]
impl VectorStore for WeaviateStore {
    async fn insert(&self, document: Document, embedding: Vec<f32>) -> RagkitResult<Uuid> {
        let body = serde_json::json!({
            "class": self.class_name,
            "properties": {
                "content": document.content(),
                "source": document.source(),
            },
            "vector": embedding,
        });
        let resp = self.post_json("/v1/objects", &body).await?;

        let id = resp["id"].as_str().ok_or_else(|| {
            RagkitError::VectorStore(format!("Weaviate object response has no id: {resp}"))
        })?;
        debug!(id, source = document.source(), "Weaviate object created");
        Uuid::parse_str(id).map_err(|e| RagkitError::VectorStore(format!("Invalid object id {id}: {e}")))
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> RagkitResult<Vec<SearchResult>> {
        if query_embedding.is_empty() {
            return Err(RagkitError::VectorStore("Empty query embedding".to_string()));
        }
        let query = near_vector_query(&self.class_name, query_embedding, top_k)?;
        let body = self.graphql(query).await?;
        parse_search_response(&body, &self.class_name)
    }

    async fn count(&self) -> RagkitResult<usize> {
        let query = format!("{{ Aggregate {{ {} {{ meta {{ count }} }} }} }}", self.class_name);
        let body = self.graphql(query).await?;
        Ok(body["data"]["Aggregate"][&self.class_name][0]["meta"]["count"]
            .as_u64()
            .unwrap_or(0) as usize)
    }
}
