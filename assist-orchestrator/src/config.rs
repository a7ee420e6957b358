use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Pipeline configuration: retrieval depth and per-stage deadlines.
///
/// Deadlines attach to every external call so a slow or hung
/// collaborator degrades the response instead of stalling the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Chunks requested per retrieval
    pub top_k: usize,
    pub retrieval_timeout_ms: u64,
    pub generation_timeout_ms: u64,
    pub audit_timeout_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            retrieval_timeout_ms: 10_000,
            generation_timeout_ms: 30_000,
            audit_timeout_ms: 2_000,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            top_k: std::env::var("RETRIEVAL_TOP_K")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.top_k),
            retrieval_timeout_ms: std::env::var("RETRIEVAL_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.retrieval_timeout_ms),
            generation_timeout_ms: std::env::var("GENERATION_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.generation_timeout_ms),
            audit_timeout_ms: std::env::var("AUDIT_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.audit_timeout_ms),
        }
    }

    pub fn retrieval_timeout(&self) -> Duration {
        Duration::from_millis(self.retrieval_timeout_ms)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_millis(self.generation_timeout_ms)
    }

    pub fn audit_timeout(&self) -> Duration {
        Duration::from_millis(self.audit_timeout_ms)
    }
}
