//! OpenAI API error types.

use thiserror::Error;

use crate::infrastructure::logging::SecretScrubber;

/// Errors that can occur when talking to the OpenAI API
#[derive(Error, Debug)]
pub enum OpenAiApiError {
    /// No key in config and `OPENAI_API_KEY` unset
    #[error("OpenAI API key not set. Set OPENAI_API_KEY env var or configure openai.api_key.")]
    MissingApiKey,

    /// Invalid request parameters or malformed request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed due to invalid or missing API key
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Unknown model or endpoint
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// API server encountered an internal error
    #[error("API server error (HTTP {status}): {body}")]
    ServerError { status: u16, body: String },

    /// Network error occurred during request
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON serialization or deserialization error
    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Unexpected status code
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl OpenAiApiError {
    /// Create error from HTTP status code and response body
    ///
    /// The body is scrubbed of credentials first; OpenAI echoes the
    /// offending key in 401 responses.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let body = SecretScrubber::global().scrub_message(body);
        match status.as_u16() {
            400 | 422 => Self::InvalidRequest(body),
            401 | 403 => Self::AuthenticationFailed(body),
            404 => Self::NotFound(body),
            429 => Self::RateLimitExceeded(body),
            code @ 500..=599 => Self::ServerError { status: code, body },
            _ => Self::Unknown(format!("HTTP {status}: {body}")),
        }
    }
}
