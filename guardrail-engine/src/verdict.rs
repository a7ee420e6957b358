use serde::{Deserialize, Serialize};

/// Result of a pre-generation safety check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyVerdict {
    /// True when any hard-block rule matched
    pub blocked: bool,
    /// Fixed refusal message, present only when blocked
    pub message: Option<String>,
    /// Identifiers of every matching rule, in table order,
    /// prefixed `hard_block:` or `soft_warning:`
    pub reasons: Vec<String>,
}

impl SafetyVerdict {
    pub fn pass(reasons: Vec<String>) -> Self {
        Self {
            blocked: false,
            message: None,
            reasons,
        }
    }

    pub fn block(message: &str, reasons: Vec<String>) -> Self {
        Self {
            blocked: true,
            message: Some(message.to_string()),
            reasons,
        }
    }
}
