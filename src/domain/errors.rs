//! Domain errors for the doc-rag pipeline.

use thiserror::Error;

/// Domain-level errors that can occur anywhere in the question-answering pipeline.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Failed to load {url}: {reason}")]
    LoadFailed { url: String, reason: String },

    #[error("Failed to parse sitemap {url}: {reason}")]
    SitemapParse { url: String, reason: String },

    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("Completion failed: {0}")]
    CompletionFailed(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
