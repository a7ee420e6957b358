use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::prompt::PromptTemplate;
use crate::providers::{ChatHttpProvider, GenerationProvider};

/// Generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Completion service base URL
    pub api_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl GenerationConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("GENERATION_API_URL")
            .map_err(|_| GenerationError::Config("GENERATION_API_URL not set".to_string()))?;

        let model = std::env::var("GENERATION_MODEL")
            .unwrap_or_else(|_| "llama-3.1-8b-instant".to_string());

        Ok(Self {
            api_url,
            model,
            api_key: std::env::var("GENERATION_API_KEY").ok(),
        })
    }

    /// Build the generation provider this configuration describes
    pub fn provider(&self) -> Arc<dyn GenerationProvider> {
        Arc::new(ChatHttpProvider::with_template(
            &self.api_url,
            &self.model,
            self.api_key.clone(),
            PromptTemplate::default(),
        ))
    }
}
