//! HTTP embedding provider.
//!
//! Talks to a self-hosted embedding service (sentence-transformers,
//! Ollama, or any endpoint exposing the same contract): a JSON POST to
//! `{api_url}/embed` with `{ "model": ..., "input": ... }` answered by
//! `{ "embedding": [f32, ...] }`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RetrievalError};
use crate::providers::EmbeddingProvider;

pub struct HttpEmbeddingProvider {
    client: reqwest::Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

impl HttpEmbeddingProvider {
    pub fn new(api_url: &str, model: &str, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut request = self
            .client
            .post(format!("{}/embed", self.api_url))
            .json(&EmbedRequest {
                model: &self.model,
                input: text,
            });

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response: EmbedResponse = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.embedding.is_empty() {
            return Err(RetrievalError::Embedding(
                "embedding service returned an empty vector".to_string(),
            ));
        }

        debug!(model = %self.model, dimension = response.embedding.len(), "embedded query");

        Ok(response.embedding)
    }
}
