//! Remote vector index provider.
//!
//! Adapter for a managed vector database exposing a query/upsert HTTP
//! API: `POST {api_url}/query` with `{ "vector": ..., "k": ... }`
//! returning `{ "matches": [...] }`, and `POST {api_url}/vectors` for
//! upserts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chunk::{ChunkMetadata, ScoredChunk};
use crate::error::{Result, RetrievalError};
use crate::providers::VectorIndex;

pub struct HttpVectorIndex {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    vector: &'a [f32],
    k: usize,
}

#[derive(Deserialize)]
struct QueryResponse {
    matches: Vec<ScoredChunk>,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    id: &'a str,
    vector: Vec<f32>,
    metadata: ChunkMetadata,
}

impl HttpVectorIndex {
    pub fn new(api_url: &str, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl VectorIndex for HttpVectorIndex {
    async fn query(&self, vector: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        let request = self
            .client
            .post(format!("{}/query", self.api_url))
            .json(&QueryRequest { vector, k });

        let response: QueryResponse = self
            .authorized(request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| RetrievalError::Index(format!("query rejected: {e}")))?
            .json()
            .await?;

        debug!(k, matches = response.matches.len(), "vector index query");

        Ok(response.matches)
    }

    async fn upsert(&self, id: &str, vector: Vec<f32>, metadata: ChunkMetadata) -> Result<()> {
        let request = self
            .client
            .post(format!("{}/vectors", self.api_url))
            .json(&UpsertRequest { id, vector, metadata });

        self.authorized(request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| RetrievalError::Index(format!("upsert rejected: {e}")))?;

        Ok(())
    }
}
