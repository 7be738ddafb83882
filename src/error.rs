//! Error types for Hark.

use thiserror::Error;

/// Library-level error type for Hark operations.
///
/// Remote-call failures are deliberately absent here: they are modeled as
/// [`crate::inference::RemoteError`] and always recovered by the local
/// fallback, so callers never observe them directly.
#[derive(Error, Debug)]
pub enum HarkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transcript produced no chunks; cannot build an index over empty content")]
    EmptyTranscript,

    #[error("No transcript has been indexed yet; transcribe audio before asking questions")]
    IndexNotBuilt,

    #[error("Embedding dimension mismatch: index expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Local inference failed: {0}")]
    LocalInference(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Hark operations.
pub type Result<T> = std::result::Result<T, HarkError>;
