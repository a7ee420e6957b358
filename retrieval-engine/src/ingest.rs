//! Corpus ingestion: load → filter → chunk → embed → upsert.
//!
//! Chunk IDs are the sha-256 of the chunk text, so re-running ingestion
//! over the same corpus upserts the same IDs and stays idempotent.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::chunk::ChunkMetadata;
use crate::error::{Result, RetrievalError};
use crate::providers::{EmbeddingProvider, VectorIndex};

/// Documents shorter than this are dropped before chunking
pub const DEFAULT_MIN_DOCUMENT_LENGTH: usize = 1000;

/// Default chunk size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Default overlap between consecutive chunks, in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

/// Summary of one ingestion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub documents_loaded: usize,
    pub documents_skipped: usize,
    pub chunks_upserted: usize,
}

/// Deterministic chunk identifier
pub fn chunk_id(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    format!("{:x}", digest)
}

/// Split `text` into overlapping character windows.
///
/// Operates on characters, not bytes, so multi-byte text never splits
/// inside a code point. Returns an error when `overlap >= chunk_size`,
/// which would loop forever.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>> {
    if chunk_size == 0 {
        return Err(RetrievalError::Ingestion("chunk_size must be positive".to_string()));
    }
    if overlap >= chunk_size {
        return Err(RetrievalError::Ingestion(format!(
            "overlap ({}) must be smaller than chunk_size ({})",
            overlap, chunk_size
        )));
    }

    let chars: Vec<char> = text.chars().collect();
    let step = chunk_size - overlap;
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        let chunk: String = chars[start..end].iter().collect();
        let trimmed = chunk.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }
        if end == chars.len() {
            break;
        }
        start += step;
    }

    Ok(chunks)
}

/// Ingests a plain-text corpus into the vector index
pub struct CorpusIngestor<'a> {
    embedding: &'a dyn EmbeddingProvider,
    index: &'a dyn VectorIndex,
    chunk_size: usize,
    chunk_overlap: usize,
    min_document_length: usize,
}

impl<'a> CorpusIngestor<'a> {
    pub fn new(embedding: &'a dyn EmbeddingProvider, index: &'a dyn VectorIndex) -> Self {
        Self {
            embedding,
            index,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            min_document_length: DEFAULT_MIN_DOCUMENT_LENGTH,
        }
    }

    pub fn with_chunking(mut self, chunk_size: usize, chunk_overlap: usize) -> Self {
        self.chunk_size = chunk_size;
        self.chunk_overlap = chunk_overlap;
        self
    }

    pub fn with_min_document_length(mut self, min_length: usize) -> Self {
        self.min_document_length = min_length;
        self
    }

    /// Ingest every `.txt` / `.md` file directly under `dir`.
    ///
    /// Documents below the minimum length are skipped; everything else
    /// is chunked and upserted under deterministic IDs.
    pub async fn ingest_dir(&self, dir: &Path) -> Result<IngestReport> {
        info!(dir = %dir.display(), "starting ingestion");

        let mut report = IngestReport {
            documents_loaded: 0,
            documents_skipped: 0,
            chunks_upserted: 0,
        };

        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                matches!(
                    path.extension().and_then(|e| e.to_str()),
                    Some("txt") | Some("md")
                )
            })
            .collect();
        paths.sort();

        for path in paths {
            let text = std::fs::read_to_string(&path)?;
            let source = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_string();

            if text.trim().len() < self.min_document_length {
                debug!(source = %source, "skipping short document");
                report.documents_skipped += 1;
                continue;
            }

            report.documents_loaded += 1;
            report.chunks_upserted += self.ingest_document(&source, &text).await?;
        }

        info!(
            documents = report.documents_loaded,
            skipped = report.documents_skipped,
            chunks = report.chunks_upserted,
            "ingestion complete"
        );

        Ok(report)
    }

    /// Chunk and upsert a single document under the given source id
    pub async fn ingest_document(&self, source: &str, text: &str) -> Result<usize> {
        let chunks = chunk_text(text, self.chunk_size, self.chunk_overlap)?;
        let total = chunks.len();

        for (i, chunk) in chunks.into_iter().enumerate() {
            let id = chunk_id(&chunk);
            let vector = self.embedding.embed(&chunk).await?;

            self.index
                .upsert(
                    &id,
                    vector,
                    ChunkMetadata {
                        text: chunk,
                        source: source.to_string(),
                    },
                )
                .await?;

            if (i + 1) % 64 == 0 {
                info!(source = %source, uploaded = i + 1, total, "ingestion progress");
            }
        }

        if total == 0 {
            warn!(source = %source, "document produced no chunks");
        }

        Ok(total)
    }
}
