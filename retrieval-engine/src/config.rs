use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RetrievalError};
use crate::ingest::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_MIN_DOCUMENT_LENGTH};
use crate::providers::{
    EmbeddingProvider, HttpEmbeddingProvider, HttpVectorIndex, MemoryVectorIndex, VectorIndex,
};
use crate::retriever::DEFAULT_TOP_K;

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Embedding service base URL
    pub embedding_api_url: String,
    /// Embedding model name
    pub embedding_model: String,
    pub embedding_api_key: Option<String>,
    /// Remote vector index base URL; `None` selects the in-memory index
    pub index_api_url: Option<String>,
    pub index_api_key: Option<String>,
    pub top_k: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub min_document_length: usize,
}

impl RetrievalConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let embedding_api_url = std::env::var("EMBEDDING_API_URL")
            .map_err(|_| RetrievalError::Config("EMBEDDING_API_URL not set".to_string()))?;

        let embedding_model = std::env::var("EMBEDDING_MODEL")
            .unwrap_or_else(|_| "sentence-transformers/all-MiniLM-L6-v2".to_string());

        let top_k = std::env::var("RETRIEVAL_TOP_K")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TOP_K);

        let chunk_size = std::env::var("CHUNK_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_CHUNK_SIZE);

        let chunk_overlap = std::env::var("CHUNK_OVERLAP")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_CHUNK_OVERLAP);

        let min_document_length = std::env::var("MIN_DOCUMENT_LENGTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MIN_DOCUMENT_LENGTH);

        Ok(Self {
            embedding_api_url,
            embedding_model,
            embedding_api_key: std::env::var("EMBEDDING_API_KEY").ok(),
            index_api_url: std::env::var("VECTOR_INDEX_URL").ok(),
            index_api_key: std::env::var("VECTOR_INDEX_API_KEY").ok(),
            top_k,
            chunk_size,
            chunk_overlap,
            min_document_length,
        })
    }

    /// Build the embedding provider this configuration describes
    pub fn embedding_provider(&self) -> Arc<dyn EmbeddingProvider> {
        Arc::new(HttpEmbeddingProvider::new(
            &self.embedding_api_url,
            &self.embedding_model,
            self.embedding_api_key.clone(),
        ))
    }

    /// Build the vector index this configuration describes
    pub fn vector_index(&self) -> Arc<dyn VectorIndex> {
        match &self.index_api_url {
            Some(url) => Arc::new(HttpVectorIndex::new(url, self.index_api_key.clone())),
            None => Arc::new(MemoryVectorIndex::new()),
        }
    }
}
