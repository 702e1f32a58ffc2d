//! Error types for the task client

use thiserror::Error;

/// Result type alias for the task client
pub type Result<T> = std::result::Result<T, AppError>;

/// Main error type for the task client
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Document store errors
    #[error("Store error: {0}")]
    Store(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Session storage errors
    #[error("Session error: {0}")]
    Session(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
