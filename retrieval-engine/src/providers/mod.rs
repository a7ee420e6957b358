pub mod http_embedding;
pub mod http_index;
pub mod memory_index;

pub use http_embedding::*;
pub use http_index::*;
pub use memory_index::*;

use async_trait::async_trait;

use crate::chunk::{ChunkMetadata, ScoredChunk};
use crate::error::Result;

/// Trait for embedding providers: text in, fixed-dimension vector out
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Trait for vector indexes over the document corpus
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Nearest-neighbor query returning up to `k` chunks, best first
    async fn query(&self, vector: &[f32], k: usize) -> Result<Vec<ScoredChunk>>;

    /// Insert or replace one chunk vector; idempotent per `id`
    async fn upsert(&self, id: &str, vector: Vec<f32>, metadata: ChunkMetadata) -> Result<()>;
}
