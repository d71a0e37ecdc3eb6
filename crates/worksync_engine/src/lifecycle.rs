//! Sync lifecycle state machine.

/// The phase of the sync lifecycle within one process lifetime.
///
/// The machine only moves forward:
///
/// ```text
/// NotStarted → Pulled → Running → Pushed → Stopped
/// ```
///
/// Pull and push each execute exactly once; there is no mid-run re-sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// The process has not pulled yet.
    NotStarted,
    /// The start-of-life pull has executed (successfully or not).
    Pulled,
    /// The host's running phase; the engine is dormant.
    Running,
    /// The end-of-life push is executing.
    Pushed,
    /// The push has completed and the engine is done for this process.
    Stopped,
}

impl SyncPhase {
    /// Returns true if the start-of-life pull may execute.
    #[must_use]
    pub fn can_pull(&self) -> bool {
        matches!(self, SyncPhase::NotStarted)
    }

    /// Returns true if the end-of-life push may execute.
    ///
    /// Push is allowed directly after pull as well: a host that fails during
    /// startup still gets its shutdown hook.
    #[must_use]
    pub fn can_push(&self) -> bool {
        matches!(self, SyncPhase::Pulled | SyncPhase::Running)
    }

    /// Returns true if the engine has finished for this process.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        matches!(self, SyncPhase::Stopped)
    }
}
