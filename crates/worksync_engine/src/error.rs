//! Error types for the sync engine.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during pull or push.
///
/// None of these ever escape the engine boundary: the [`SyncManager`]
/// converts them into outcome values and logs them, preserving the guarantee
/// that a sync failure never aborts the host lifecycle.
///
/// [`SyncManager`]: crate::SyncManager
#[derive(Debug, Error)]
pub enum SyncError {
    /// The local workspace file could not be read or written.
    #[error("local store error: {0}")]
    Store(#[from] worksync_store::StoreError),

    /// The remote workspace service call failed.
    #[error("remote service error: {0}")]
    Client(#[from] worksync_client::ClientError),

    /// A lifecycle operation was attempted in the wrong phase.
    #[error("invalid lifecycle transition: {phase:?} cannot {operation}")]
    InvalidPhase {
        /// The phase the engine was in.
        phase: crate::SyncPhase,
        /// The operation that was attempted.
        operation: &'static str,
    },
}
