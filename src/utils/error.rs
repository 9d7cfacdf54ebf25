//! Error Handling Module
//!
//! Defines custom error types for the carspec library.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Main error type for carspec operations
#[derive(Error, Debug)]
pub enum CarSpecError {
    /// The uploaded bytes could not be decoded as an image
    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    /// Numeric/model execution failure during the forward pass
    #[error("Inference error: {0}")]
    Inference(String),

    /// Problem with a class-index-to-label mapping
    #[error("Label map error: {0}")]
    Labels(String),

    /// Problem with the verified specification store
    #[error("Specification store error: {0}")]
    Store(String),

    /// Problem loading or using the model weights
    #[error("Model error: {0}")]
    Model(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience Result type for carspec operations
pub type Result<T> = std::result::Result<T, CarSpecError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, msg: &str) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| CarSpecError::InvalidInput(format!("{}: {}", msg, e)))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| CarSpecError::InvalidInput(format!("{}: {}", f(), e)))
    }
}

impl<T> ResultExt<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| CarSpecError::InvalidInput(msg.to_string()))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.ok_or_else(|| CarSpecError::InvalidInput(f()))
    }
}
