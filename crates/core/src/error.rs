//! Error types for medask.
//!
//! This module defines a unified error enum covering configuration, I/O,
//! input validation, LLM, knowledge (retrieval) and prompt errors.
//!
//! An answer that is not grounded in the retrieved context is *not* an
//! error: the pipeline returns the fallback line instead.

use thiserror::Error;

/// Unified error type for medask.
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

    /// Invalid caller input (e.g. an empty question)
    #[error("Invalid input: {0}")]
    Input(String),

    /// Generation backend errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Retrieval and corpus errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Prompt rendering errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
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
