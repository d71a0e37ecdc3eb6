//! The `push` command: end-of-life synchronization.

use crate::commands::banner;
use crate::http::ReqwestClient;
use tracing::info;
use worksync_engine::{PushOutcome, SyncManager, SyncSettings};

/// Runs the push. Always exits successfully: a failed push is logged as a
/// data-loss risk, but the host is shutting down either way.
pub fn run(settings: SyncSettings) -> Result<(), Box<dyn std::error::Error>> {
    banner(&settings);

    let http = ReqwestClient::new()?;
    let manager = SyncManager::over_http(settings, http);

    // The pull slot of the lifecycle belongs to a previous invocation of
    // this binary; advance past it without touching anything.
    manager.mark_pulled()?;

    match manager.push() {
        PushOutcome::Disabled => info!("push skipped: remote sync disabled"),
        PushOutcome::Pushed => info!("push complete: remote workspace updated"),
        PushOutcome::NothingToPush(_) => info!("push skipped: no local workspace"),
        // Already logged at the engine boundary with full context.
        PushOutcome::Failed(_) => {}
    }

    Ok(())
}
