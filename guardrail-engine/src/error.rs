use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardrailError {
    #[error("Invalid rule pattern for '{id}': {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },

    #[error("Duplicate rule id: {0}")]
    DuplicateRule(String),
}

pub type GuardrailResult<T> = Result<T, GuardrailError>;
