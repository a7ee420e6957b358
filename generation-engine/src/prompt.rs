//! Prompt construction.
//!
//! The template keeps prompt wording out of pipeline code. `{context}`
//! and `{question}` slots are substituted verbatim; the default system
//! preamble constrains answers to educational, non-diagnostic content
//! grounded in the supplied context.

use serde::{Deserialize, Serialize};

/// Default system preamble for medical answers
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a careful medical information assistant. Answer using the provided \
     context where relevant. Give educational information only: no diagnosis, \
     no prescriptions, no dosage recommendations. If the context does not \
     cover the question, say so.";

/// Default user-message layout
pub const DEFAULT_USER_TEMPLATE: &str = "Context:\n{context}\n\nQuestion:\n{question}";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub system: String,
    pub user: String,
}

impl PromptTemplate {
    pub fn new(system: &str, user: &str) -> Self {
        Self {
            system: system.to_string(),
            user: user.to_string(),
        }
    }

    /// Fill the user-message slots with the query and retrieved context
    pub fn render(&self, question: &str, context: &str) -> String {
        self.user
            .replace("{context}", context)
            .replace("{question}", question)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT, DEFAULT_USER_TEMPLATE)
    }
}
