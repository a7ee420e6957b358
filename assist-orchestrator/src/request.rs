use serde::{Deserialize, Serialize};

/// Fixed answer returned when a request carries no usable input
pub const NO_INPUT_MESSAGE: &str = "I did not receive any input to process.";

/// Label introducing the image-context block of an enriched query.
/// Image findings are context only, never a question to answer.
pub const IMAGE_CONTEXT_LABEL: &str = "Image findings (for context only):";

/// One user request: typed or transcribed text, and/or a neutral
/// textual summary extracted from an image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistRequest {
    pub user_text: Option<String>,
    pub image_summary: Option<String>,
}

impl AssistRequest {
    pub fn new(user_text: Option<String>, image_summary: Option<String>) -> Self {
        Self {
            user_text,
            image_summary,
        }
    }

    pub fn text(user_text: &str) -> Self {
        Self {
            user_text: Some(user_text.to_string()),
            image_summary: None,
        }
    }

    /// User text with surrounding whitespace stripped; empty when absent
    pub fn user_text_trimmed(&self) -> &str {
        self.user_text.as_deref().map(str::trim).unwrap_or("")
    }

    /// Image summary with surrounding whitespace stripped; empty when absent
    pub fn image_summary_trimmed(&self) -> &str {
        self.image_summary.as_deref().map(str::trim).unwrap_or("")
    }

    /// True when neither input carries content
    pub fn is_empty(&self) -> bool {
        self.user_text_trimmed().is_empty() && self.image_summary_trimmed().is_empty()
    }

    /// Build the enriched query: the user's text, plus a delimited,
    /// explicitly labeled image-context block when a summary exists.
    /// The original user text is never dropped or rewritten.
    pub fn enriched_query(&self) -> String {
        let mut query = self.user_text_trimmed().to_string();

        let summary = self.image_summary_trimmed();
        if !summary.is_empty() {
            query.push_str("\n\n");
            query.push_str(IMAGE_CONTEXT_LABEL);
            query.push('\n');
            query.push_str(summary);
        }

        query
    }
}

/// The pipeline's response contract.
///
/// Field names and types are load-bearing: voice output and display
/// consumers deserialize exactly this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistResponse {
    pub answer: String,
    pub sources: Vec<String>,
    pub safety_notes: Vec<String>,
    pub latency_ms: u64,
}
