//! Retriever: query → embed → nearest-neighbor search → ranked context.

use std::sync::Arc;

use audit_trail::{AuditEntry, AuditSink};
use serde_json::json;
use tracing::{info, warn};

use crate::chunk::RetrievalResult;
use crate::error::Result;
use crate::providers::{EmbeddingProvider, VectorIndex};

/// How many chunks a retrieval returns by default
pub const DEFAULT_TOP_K: usize = 3;

/// Retrieves ranked corpus context for a query.
///
/// Holds its providers for its whole lifetime; nothing is constructed
/// per call. No result caching: each request embeds and queries once.
pub struct Retriever {
    embedding: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    audit: Arc<dyn AuditSink>,
}

impl Retriever {
    pub fn new(
        embedding: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            embedding,
            index,
            audit,
        }
    }

    /// Retrieve the top-`k` chunks for `query`.
    ///
    /// Context joins chunk texts in rank order with blank lines; sources
    /// are deduplicated with no order guarantee. Embedding and index
    /// failures propagate to the caller.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<RetrievalResult> {
        let vector = self.embedding.embed(query).await?;
        let documents = self.index.query(&vector, k).await?;

        let result = RetrievalResult::from_chunks(documents);

        info!(
            k,
            num_docs = result.documents.len(),
            num_sources = result.sources.len(),
            "retrieval complete"
        );

        let entry = AuditEntry::new(
            "retrieval",
            json!({
                "query": query,
                "k": k,
                "num_docs": result.documents.len(),
                "sources": &result.sources,
            }),
        );
        // The audit sink is side-effect only; a failed write never fails
        // the retrieval
        if let Err(error) = self.audit.log(entry).await {
            warn!(%error, "audit write failed for retrieval event");
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkMetadata;
    use crate::providers::MemoryVectorIndex;
    use async_trait::async_trait;
    use audit_trail::MemorySink;

    struct KeywordEmbedding;

    // Maps text onto a 2-dimensional axis so similarity is predictable
    #[async_trait]
    impl EmbeddingProvider for KeywordEmbedding {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            if text.contains("flu") {
                Ok(vec![1.0, 0.0])
            } else {
                Ok(vec![0.0, 1.0])
            }
        }
    }

    async fn seeded_index() -> Arc<MemoryVectorIndex> {
        let index = MemoryVectorIndex::new();
        let entries = [
            ("c1", vec![1.0, 0.0], "Influenza spreads via droplets.", "flu_guide.txt"),
            ("c2", vec![0.9, 0.1], "Flu symptoms include fever.", "flu_guide.txt"),
            ("c3", vec![0.0, 1.0], "Hypertension basics.", "bp_guide.txt"),
        ];
        for (id, vector, text, source) in entries {
            index
                .upsert(
                    id,
                    vector,
                    ChunkMetadata {
                        text: text.to_string(),
                        source: source.to_string(),
                    },
                )
                .await
                .unwrap();
        }
        Arc::new(index)
    }

    #[tokio::test]
    async fn retrieve_joins_context_and_dedupes_sources() {
        let audit = Arc::new(MemorySink::new());
        let retriever = Retriever::new(Arc::new(KeywordEmbedding), seeded_index().await, audit.clone());

        let result = retriever.retrieve("how does the flu spread", 2).await.unwrap();

        assert_eq!(result.documents.len(), 2);
        assert_eq!(
            result.context,
            "Influenza spreads via droplets.\n\nFlu symptoms include fever."
        );
        // Both chunks come from the same document
        assert_eq!(result.sources.len(), 1);
        assert!(result.sources.contains("flu_guide.txt"));
    }

    struct RejectingIndex;

    #[async_trait]
    impl VectorIndex for RejectingIndex {
        async fn query(&self, _vector: &[f32], _k: usize) -> Result<Vec<crate::chunk::ScoredChunk>> {
            Err(crate::error::RetrievalError::Index(
                "query rejected: 503 Service Unavailable".to_string(),
            ))
        }

        async fn upsert(&self, _id: &str, _vector: Vec<f32>, _metadata: ChunkMetadata) -> Result<()> {
            Err(crate::error::RetrievalError::Index(
                "upsert rejected: 503 Service Unavailable".to_string(),
            ))
        }
    }

    #[tokio::test]
    async fn index_rejection_surfaces_as_index_error() {
        let audit = Arc::new(MemorySink::new());
        let retriever = Retriever::new(
            Arc::new(KeywordEmbedding),
            Arc::new(RejectingIndex),
            audit.clone(),
        );

        let error = retriever.retrieve("flu questions", 3).await.unwrap_err();

        assert!(matches!(error, crate::error::RetrievalError::Index(_)));
        // Nothing is audited for a failed retrieval
        assert!(audit.entries().await.is_empty());
    }

    #[tokio::test]
    async fn retrieve_emits_one_audit_event() {
        let audit = Arc::new(MemorySink::new());
        let retriever = Retriever::new(Arc::new(KeywordEmbedding), seeded_index().await, audit.clone());

        retriever.retrieve("flu questions", 3).await.unwrap();

        let entries = audit.entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event_type, "retrieval");
        assert_eq!(entries[0].payload["k"], serde_json::json!(3));
        assert_eq!(entries[0].payload["num_docs"], serde_json::json!(3));
    }
}
