//! Immutable sync settings.

use std::path::{Path, PathBuf};

/// Environment variable holding the attribution username.
pub(crate) const USERNAME_ENV: &str = "WORKSYNC_USERNAME";

/// Extension of the local workspace file.
const WORKSPACE_EXTENSION: &str = "json";

/// Immutable configuration snapshot for the sync engine.
///
/// Constructed once before the pull and passed by reference into the
/// [`SyncManager`](crate::SyncManager); the engine performs no ambient
/// configuration lookups inside pull/push logic.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Directory holding the local workspace file.
    pub data_dir: PathBuf,
    /// Workspace filename base; `.json` is appended by convention.
    pub workspace_filename: String,
    /// Base URL of the remote workspace service.
    pub remote_api_url: String,
    /// API key credential.
    pub remote_api_key: String,
    /// API secret credential.
    pub remote_api_secret: String,
    /// Payload passphrase; `None` (or empty) disables encryption.
    pub remote_passphrase: Option<String>,
    /// Remote workspace id; `<= 0` disables sync entirely.
    pub remote_workspace_id: i64,
    /// Attribution username sent to the remote service.
    pub username: Option<String>,
}

impl SyncSettings {
    /// Creates settings with the given data directory and remote id.
    ///
    /// Everything else starts empty and is filled in with the `with_*`
    /// builders.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>, remote_workspace_id: i64) -> Self {
        Self {
            data_dir: data_dir.into(),
            workspace_filename: "workspace".to_string(),
            remote_api_url: String::new(),
            remote_api_key: String::new(),
            remote_api_secret: String::new(),
            remote_passphrase: None,
            remote_workspace_id,
            username: None,
        }
    }

    /// Sets the workspace filename base.
    #[must_use]
    pub fn with_workspace_filename(mut self, name: impl Into<String>) -> Self {
        self.workspace_filename = name.into();
        self
    }

    /// Sets the remote endpoint and credentials.
    #[must_use]
    pub fn with_remote_api(
        mut self,
        url: impl Into<String>,
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        self.remote_api_url = url.into();
        self.remote_api_key = key.into();
        self.remote_api_secret = secret.into();
        self
    }

    /// Sets the payload passphrase. Empty strings normalize to `None`.
    #[must_use]
    pub fn with_passphrase(mut self, passphrase: Option<String>) -> Self {
        self.remote_passphrase = passphrase.filter(|p| !p.is_empty());
        self
    }

    /// Sets the attribution username. Empty strings normalize to `None`.
    #[must_use]
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username.filter(|u| !u.is_empty());
        self
    }

    /// Reads the attribution username from the `WORKSYNC_USERNAME`
    /// environment variable.
    ///
    /// This is the only environment access in the engine, and it happens
    /// here at construction time, never inside pull/push.
    #[must_use]
    pub fn with_username_from_env(self) -> Self {
        let username = std::env::var(USERNAME_ENV).ok();
        self.with_username(username)
    }

    /// Returns the single local workspace file path:
    /// `<data_dir>/<workspace_filename>.json`.
    #[must_use]
    pub fn workspace_file(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}.{WORKSPACE_EXTENSION}", self.workspace_filename))
    }

    /// Returns true if remote sync is active.
    #[must_use]
    pub fn sync_enabled(&self) -> bool {
        self.remote_workspace_id > 0
    }

    /// Returns the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_file_derivation() {
        let settings = SyncSettings::new("/var/lib/worksync", 1);
        assert_eq!(
            settings.workspace_file(),
            PathBuf::from("/var/lib/worksync/workspace.json")
        );

        let settings = settings.with_workspace_filename("diagram");
        assert_eq!(
            settings.workspace_file(),
            PathBuf::from("/var/lib/worksync/diagram.json")
        );
    }

    #[test]
    fn sync_enabled_requires_positive_id() {
        assert!(SyncSettings::new("/tmp", 1).sync_enabled());
        assert!(!SyncSettings::new("/tmp", 0).sync_enabled());
        assert!(!SyncSettings::new("/tmp", -5).sync_enabled());
    }

    #[test]
    fn empty_passphrase_normalizes_to_none() {
        let settings = SyncSettings::new("/tmp", 1).with_passphrase(Some(String::new()));
        assert!(settings.remote_passphrase.is_none());

        let settings = SyncSettings::new("/tmp", 1).with_passphrase(Some("secret".into()));
        assert_eq!(settings.remote_passphrase.as_deref(), Some("secret"));
    }

    #[test]
    fn empty_username_normalizes_to_none() {
        let settings = SyncSettings::new("/tmp", 1).with_username(Some(String::new()));
        assert!(settings.username.is_none());
    }
}
