//! Error types for askrag.
//!
//! This module defines a unified error enum covering configuration, I/O,
//! provider, knowledge base, prompt and startup failures.

use thiserror::Error;

/// Unified error type for askrag.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required file does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Chat-completion provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Embedding provider errors
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Document, chunking, index and retrieval errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Prompt template errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// The RAG pipeline could not be built at startup
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Wrap any error as a startup initialization failure.
    ///
    /// Errors that are already `Initialization` are returned unchanged.
    pub fn into_initialization(self) -> Self {
        match self {
            AppError::Initialization(_) => self,
            other => AppError::Initialization(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_initialization_wraps_cause() {
        let err = AppError::Embedding("connection refused".to_string()).into_initialization();
        match err {
            AppError::Initialization(msg) => assert!(msg.contains("connection refused")),
            other => panic!("Expected Initialization, got {:?}", other),
        }
    }

    #[test]
    fn test_into_initialization_is_not_nested() {
        let err = AppError::Initialization("boom".to_string()).into_initialization();
        assert_eq!(err.to_string(), "Initialization error: boom");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
