//! In-memory cosine-similarity index.
//!
//! Exact nearest-neighbor search over an in-process vector table. Used
//! for local runs and tests; corpora at clinical scale belong behind
//! [`HttpVectorIndex`](crate::providers::HttpVectorIndex).

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::chunk::{ChunkMetadata, ScoredChunk};
use crate::error::Result;
use crate::providers::VectorIndex;

struct StoredChunk {
    vector: Vec<f32>,
    metadata: ChunkMetadata,
}

pub struct MemoryVectorIndex {
    chunks: RwLock<HashMap<String, StoredChunk>>,
}

impl MemoryVectorIndex {
    pub fn new() -> Self {
        Self {
            chunks: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.chunks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.chunks.read().await.is_empty()
    }
}

impl Default for MemoryVectorIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

#[async_trait]
impl VectorIndex for MemoryVectorIndex {
    async fn query(&self, vector: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        let chunks = self.chunks.read().await;

        let mut scored: Vec<ScoredChunk> = chunks
            .iter()
            .map(|(id, stored)| ScoredChunk {
                id: id.clone(),
                text: stored.metadata.text.clone(),
                source: stored.metadata.source.clone(),
                score: cosine_similarity(vector, &stored.vector),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        Ok(scored)
    }

    async fn upsert(&self, id: &str, vector: Vec<f32>, metadata: ChunkMetadata) -> Result<()> {
        self.chunks
            .write()
            .await
            .insert(id.to_string(), StoredChunk { vector, metadata });
        Ok(())
    }
}
