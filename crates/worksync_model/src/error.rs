//! Error types for workspace documents.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur when encoding or decoding a workspace document.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The document is not valid JSON, or is missing required structure.
    #[error("invalid workspace document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}
