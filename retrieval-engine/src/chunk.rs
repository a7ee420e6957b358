use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Metadata stored alongside a chunk vector in the index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub text: String,
    /// Source document identifier (file name, document id)
    pub source: String,
}

/// A chunk returned by a similarity query, with its rank score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub id: String,
    pub text: String,
    pub source: String,
    pub score: f32,
}

/// Outcome of one retrieval pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// Top-k chunk texts joined by blank lines, in rank order
    pub context: String,
    /// Deduplicated source identifiers; iteration order is not defined
    pub sources: HashSet<String>,
    /// The ranked chunk records backing `context`
    pub documents: Vec<ScoredChunk>,
}

impl RetrievalResult {
    /// Build a result from ranked chunks: context keeps rank order,
    /// sources deduplicate
    pub fn from_chunks(documents: Vec<ScoredChunk>) -> Self {
        let context = documents
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let sources = documents.iter().map(|c| c.source.clone()).collect();

        Self {
            context,
            sources,
            documents,
        }
    }

    pub fn empty() -> Self {
        Self {
            context: String::new(),
            sources: HashSet::new(),
            documents: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &str, text: &str, source: &str) -> ScoredChunk {
        ScoredChunk {
            id: id.to_string(),
            text: text.to_string(),
            source: source.to_string(),
            score: 0.5,
        }
    }

    #[test]
    fn context_joins_chunks_in_rank_order() {
        let result = RetrievalResult::from_chunks(vec![
            chunk("1", "first chunk", "a.txt"),
            chunk("2", "second chunk", "b.txt"),
        ]);

        assert_eq!(result.context, "first chunk\n\nsecond chunk");
    }

    #[test]
    fn sources_deduplicate_regardless_of_order() {
        let result = RetrievalResult::from_chunks(vec![
            chunk("1", "x", "a.txt"),
            chunk("2", "y", "a.txt"),
            chunk("3", "z", "b.txt"),
        ]);

        assert_eq!(result.sources.len(), 2);
        assert!(result.sources.contains("a.txt"));
        assert!(result.sources.contains("b.txt"));
        // Rank order survives in the document list
        assert_eq!(result.documents.len(), 3);
    }
}
