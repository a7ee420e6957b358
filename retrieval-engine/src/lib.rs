//! Corpus retrieval and ingestion engine for MedAssist Engine
//!
//! Implements retrieval-augmented generation's retrieval half: a query
//! is embedded, matched against a vector index by cosine similarity, and
//! the top-k chunks come back as a single ranked context string plus a
//! deduplicated set of source identifiers.
//!
//! External services sit behind two seams:
//! - [`EmbeddingProvider`]: text → fixed-dimension vector
//! - [`VectorIndex`]: similarity query + upsert for ingestion
//!
//! Providers are constructed once from configuration and injected, so
//! tests substitute fakes and no call builds a fresh client.
//!
//! Ingestion (chunking, deterministic chunk IDs, batched upserts) lives
//! in [`ingest`] and feeds the same index the retriever queries.

pub mod chunk;
pub mod config;
pub mod error;
pub mod ingest;
pub mod providers;
pub mod retriever;

pub use chunk::*;
pub use config::*;
pub use error::*;
pub use ingest::*;
pub use providers::*;
pub use retriever::*;
