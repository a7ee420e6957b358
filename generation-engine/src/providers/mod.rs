pub mod chat_http;

pub use chat_http::*;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for answer generation providers.
///
/// `query` is the user's original question (never the enriched internal
/// query); `context` is the retrieved corpus material, possibly empty.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(&self, query: &str, context: &str) -> Result<String>;
}
