use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Sink error: {0}")]
    Sink(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AuditResult<T> = Result<T, AuditError>;
