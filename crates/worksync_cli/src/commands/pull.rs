//! The `pull` command: start-of-life synchronization.

use crate::commands::banner;
use crate::http::ReqwestClient;
use tracing::info;
use worksync_engine::{PullOutcome, SyncManager, SyncSettings};

/// Runs the pull. Always exits successfully: a failed pull is logged, never
/// fatal to the host lifecycle.
pub fn run(settings: SyncSettings) -> Result<(), Box<dyn std::error::Error>> {
    banner(&settings);

    let http = ReqwestClient::new()?;
    let manager = SyncManager::over_http(settings, http);

    match manager.pull() {
        PullOutcome::Disabled => info!("pull skipped: remote sync disabled"),
        PullOutcome::Updated => info!("pull complete: local workspace updated"),
        PullOutcome::SkippedLocalNewer => info!("pull complete: local workspace kept"),
        // Already logged at the engine boundary with full context.
        PullOutcome::Failed(_) => {}
    }

    Ok(())
}
