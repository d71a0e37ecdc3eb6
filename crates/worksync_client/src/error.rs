//! Error types for the remote workspace client.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur when talking to the remote workspace service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The remote service has no workspace with this id.
    #[error("workspace {id} not found on remote service")]
    NotFound {
        /// The workspace id that was requested.
        id: i64,
    },

    /// The remote service rejected the credentials.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The remote service rejected the upload as conflicting.
    #[error("remote service reported a conflict for workspace {id}")]
    Conflict {
        /// The workspace id that was pushed.
        id: i64,
    },

    /// The remote service answered with an unexpected status.
    #[error("remote service error (status {status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body or reason, if any.
        message: String,
    },

    /// The transport failed before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The response could not be interpreted.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Payload encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Payload decryption failed: passphrase mismatch or corrupted ciphertext.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// The workspace document failed to encode or decode.
    #[error("workspace codec error: {0}")]
    Model(#[from] worksync_model::ModelError),
}
