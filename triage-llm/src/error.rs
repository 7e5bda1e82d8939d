//! LLM error types.

use thiserror::Error;

/// Errors that can occur while talking to the generation service.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed or the service returned a non-success status.
    #[error("generation request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be decoded.
    #[error("failed to decode generation response: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("generation request timed out after {0}ms")]
    Timeout(u64),

    /// The generation service could not be reached.
    #[error("generation service unavailable: {0}")]
    Unavailable(String),

    /// No API credential configured.
    #[error("no generation API credential configured")]
    MissingCredential,
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(0)
        } else if err.is_connect() {
            LlmError::Unavailable(err.to_string())
        } else {
            LlmError::RequestFailed(err.to_string())
        }
    }
}
