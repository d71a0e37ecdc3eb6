//! CLI command implementations.

pub mod pull;
pub mod push;

use tracing::info;
use worksync_engine::SyncSettings;

/// Logs the startup banner: what we are, where the workspace lives, and
/// whether remote sync is active.
pub fn banner(settings: &SyncSettings) {
    info!("worksync {}", env!("CARGO_PKG_VERSION"));
    info!("workspace path: {}", settings.workspace_file().display());
    if settings.sync_enabled() {
        info!(
            "remote: {} (workspace {})",
            settings.remote_api_url, settings.remote_workspace_id
        );
        info!(
            "payload encryption: {}",
            if settings.remote_passphrase.is_some() {
                "enabled"
            } else {
                "disabled"
            }
        );
    } else {
        info!("remote sync: disabled");
    }
}
