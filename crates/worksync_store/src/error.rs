//! Error types for the local workspace store.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when reading or writing the local workspace file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The workspace file does not exist.
    #[error("workspace file not found: {path}")]
    NotFound {
        /// The path that was probed.
        path: PathBuf,
    },

    /// The workspace file exists but does not deserialize.
    #[error("workspace file is malformed: {source}")]
    Parse {
        /// The underlying decode error.
        #[source]
        source: worksync_model::ModelError,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
