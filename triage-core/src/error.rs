//! Error types for the Triage core.

use thiserror::Error;

use crate::session::SessionId;

/// Top-level error type for core game operations.
///
/// Generation and parse failures never appear here — they degrade to
/// fallback content inside the LLM layer and the request still succeeds.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An operation referenced a session identifier that does not exist.
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic I/O error (configuration file loading).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, CoreError>;
