//! The sync manager: pull-on-start and push-on-stop orchestration.

use crate::error::{SyncError, SyncResult};
use crate::lifecycle::SyncPhase;
use crate::settings::SyncSettings;
use parking_lot::RwLock;
use tracing::{debug, error, info, warn};
use worksync_client::{HttpClient, HttpWorkspaceClient, RemoteOptions, WorkspaceApi};
use worksync_store::LocalWorkspaceStore;

/// Outcome of the start-of-life pull.
///
/// Pull never fails the host: every error is folded into
/// [`Failed`](Self::Failed) after being logged.
#[derive(Debug)]
pub enum PullOutcome {
    /// Remote sync is disabled (`remote_workspace_id <= 0`); nothing happened.
    Disabled,
    /// The remote copy was strictly newer and the local file was overwritten.
    Updated,
    /// The local file is at least as new as the remote copy; it was left
    /// untouched to protect unpushed edits.
    SkippedLocalNewer,
    /// The pull failed; startup continues regardless.
    Failed(SyncError),
}

/// Outcome of the end-of-life push.
#[derive(Debug)]
pub enum PushOutcome {
    /// Remote sync is disabled; nothing happened.
    Disabled,
    /// The local workspace was uploaded and the remote assigned a new revision.
    Pushed,
    /// The local file could not be loaded; there was nothing to send.
    NothingToPush(SyncError),
    /// The upload failed; local edits were not persisted remotely.
    Failed(SyncError),
}

/// Orchestrates the pull at process start and the push at process stop.
///
/// Holds the immutable [`SyncSettings`], the local store, and the remote API
/// handle. The lifecycle phase cell guarantees that pull and push each
/// execute at most once per process lifetime.
///
/// Both operations run synchronously on the caller's thread and block on
/// file and network I/O; no timeout is layered on top of the transport's
/// own. Neither operation ever panics or propagates an error: failures are
/// logged here, at one boundary per phase, and surfaced as outcome values.
pub struct SyncManager<A: WorkspaceApi> {
    settings: SyncSettings,
    store: LocalWorkspaceStore,
    api: A,
    phase: RwLock<SyncPhase>,
}

impl<A: WorkspaceApi> SyncManager<A> {
    /// Creates a manager from settings and a remote API handle.
    pub fn new(settings: SyncSettings, api: A) -> Self {
        let store = LocalWorkspaceStore::new(settings.workspace_file());
        Self {
            settings,
            store,
            api,
            phase: RwLock::new(SyncPhase::NotStarted),
        }
    }

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> SyncPhase {
        *self.phase.read()
    }

    /// Returns the local store.
    pub fn store(&self) -> &LocalWorkspaceStore {
        &self.store
    }

    /// Returns the remote API handle.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns the settings.
    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Runs the start-of-life pull. Executes at most once.
    ///
    /// Fetches the remote workspace and overwrites the local file iff the
    /// remote copy is strictly newer than the file's mtime (a missing local
    /// file counts as infinitely old). Equal timestamps do not overwrite:
    /// the local copy may hold unpushed edits that must not be clobbered.
    pub fn pull(&self) -> PullOutcome {
        {
            let mut phase = self.phase.write();
            if !phase.can_pull() {
                let err = SyncError::InvalidPhase {
                    phase: *phase,
                    operation: "pull",
                };
                warn!(phase = ?*phase, "pull attempted more than once, ignoring");
                return PullOutcome::Failed(err);
            }
            *phase = SyncPhase::Pulled;
        }

        if !self.settings.sync_enabled() {
            debug!(
                workspace_id = self.settings.remote_workspace_id,
                "remote sync disabled, skipping pull"
            );
            return PullOutcome::Disabled;
        }

        let id = self.settings.remote_workspace_id;
        info!(workspace_id = id, "pulling workspace from remote service");

        match self.try_pull() {
            Ok(outcome) => {
                match &outcome {
                    PullOutcome::Updated => {
                        info!(workspace_id = id, path = %self.store.path().display(), "local workspace updated from remote")
                    }
                    PullOutcome::SkippedLocalNewer => {
                        info!(workspace_id = id, "skipping - local workspace file is newer")
                    }
                    _ => {}
                }
                outcome
            }
            Err(e) => {
                // A failed pull is never fatal; the host keeps starting up.
                error!(workspace_id = id, error = %e, "pull failed");
                PullOutcome::Failed(e)
            }
        }
    }

    fn try_pull(&self) -> SyncResult<PullOutcome> {
        let remote = self.api.get_workspace(self.settings.remote_workspace_id)?;
        let local_mtime = self.store.modified_at()?;

        // Strict greater-than, no clock-skew tolerance. A remote copy with
        // no timestamp never overwrites an existing local file.
        let overwrite = match (remote.last_modified_date, local_mtime) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(remote_ts), Some(local_ts)) => remote_ts > local_ts,
        };

        if overwrite {
            self.store.save(&remote)?;
            Ok(PullOutcome::Updated)
        } else {
            Ok(PullOutcome::SkippedLocalNewer)
        }
    }

    /// Advances past the pull slot without performing any I/O.
    ///
    /// For hosts whose pull ran in an earlier process lifetime (for example
    /// a shutdown hook invoked as its own process) and that only need the
    /// push half of the lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidPhase`] if the pull slot has already been
    /// consumed.
    pub fn mark_pulled(&self) -> SyncResult<()> {
        let mut phase = self.phase.write();
        if !phase.can_pull() {
            return Err(SyncError::InvalidPhase {
                phase: *phase,
                operation: "mark_pulled",
            });
        }
        *phase = SyncPhase::Pulled;
        Ok(())
    }

    /// Marks the host's running phase as begun.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidPhase`] unless the pull has executed and
    /// the push has not.
    pub fn mark_running(&self) -> SyncResult<()> {
        let mut phase = self.phase.write();
        if *phase != SyncPhase::Pulled {
            return Err(SyncError::InvalidPhase {
                phase: *phase,
                operation: "mark_running",
            });
        }
        *phase = SyncPhase::Running;
        Ok(())
    }

    /// Runs the end-of-life push. Executes at most once.
    ///
    /// Loads the local workspace, clears its revision token so the remote
    /// service assigns a fresh one, and uploads it. This is the last chance
    /// to persist local edits remotely; a failure is logged as a data-loss
    /// risk but the process still terminates cleanly.
    pub fn push(&self) -> PushOutcome {
        {
            let mut phase = self.phase.write();
            if !phase.can_push() {
                let err = SyncError::InvalidPhase {
                    phase: *phase,
                    operation: "push",
                };
                warn!(phase = ?*phase, "push attempted in wrong phase, ignoring");
                return PushOutcome::Failed(err);
            }
            *phase = SyncPhase::Pushed;
        }

        let outcome = if self.settings.sync_enabled() {
            let id = self.settings.remote_workspace_id;
            info!(workspace_id = id, "pushing workspace to remote service");
            self.try_push(id)
        } else {
            debug!(
                workspace_id = self.settings.remote_workspace_id,
                "remote sync disabled, skipping push"
            );
            PushOutcome::Disabled
        };

        *self.phase.write() = SyncPhase::Stopped;
        outcome
    }

    fn try_push(&self, id: i64) -> PushOutcome {
        let mut workspace = match self.store.load() {
            Ok(ws) => ws,
            Err(e) => {
                warn!(workspace_id = id, error = %e, "no local workspace to push");
                return PushOutcome::NothingToPush(e.into());
            }
        };

        // The remote service assigns the revision; never round-trip ours.
        workspace.clear_revision();

        match self.api.put_workspace(id, &workspace) {
            Ok(()) => {
                info!(workspace_id = id, "workspace pushed");
                PushOutcome::Pushed
            }
            Err(e) => {
                error!(
                    workspace_id = id,
                    error = %e,
                    "push failed - local edits were not persisted remotely"
                );
                PushOutcome::Failed(e.into())
            }
        }
    }
}

impl<C: HttpClient> SyncManager<HttpWorkspaceClient<C>> {
    /// Creates a manager whose remote API handle is an HTTP adapter built
    /// from the settings: endpoint, credentials, attribution username, and
    /// the payload cipher iff a passphrase is configured.
    pub fn over_http(settings: SyncSettings, http: C) -> Self {
        let options = RemoteOptions::new(
            settings.remote_api_url.clone(),
            settings.remote_api_key.clone(),
            settings.remote_api_secret.clone(),
        )
        .with_username(settings.username.clone())
        .with_passphrase(settings.remote_passphrase.clone());

        let api = HttpWorkspaceClient::new(options, http);
        Self::new(settings, api)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::{tempdir, TempDir};
    use worksync_client::{ClientError, MockWorkspaceApi};
    use worksync_model::Workspace;

    fn manager_with_id(id: i64) -> (TempDir, SyncManager<MockWorkspaceApi>) {
        let dir = tempdir().unwrap();
        let settings = SyncSettings::new(dir.path(), id);
        let manager = SyncManager::new(settings, MockWorkspaceApi::new());
        (dir, manager)
    }

    fn remote_workspace(id: i64, name: &str) -> Workspace {
        let mut ws = Workspace::new(id);
        ws.content
            .insert("name".into(), serde_json::Value::String(name.into()));
        ws
    }

    #[test]
    fn disabled_pull_touches_nothing() {
        let (_dir, manager) = manager_with_id(0);

        let outcome = manager.pull();
        assert!(matches!(outcome, PullOutcome::Disabled));
        assert!(manager.api.get_calls().is_empty());
        assert!(!manager.store().exists());
    }

    #[test]
    fn disabled_push_touches_nothing() {
        let (_dir, manager) = manager_with_id(-3);
        manager.pull();

        let outcome = manager.push();
        assert!(matches!(outcome, PushOutcome::Disabled));
        assert!(manager.api.put_calls().is_empty());
        assert_eq!(manager.phase(), SyncPhase::Stopped);
    }

    #[test]
    fn pull_missing_local_file_overwrites() {
        let (_dir, manager) = manager_with_id(42);
        let mut remote = remote_workspace(42, "X");
        remote.last_modified_date = Some("2024-01-01T00:00:00Z".parse().unwrap());
        manager.api.set_get_response(Ok(remote));

        let outcome = manager.pull();
        assert!(matches!(outcome, PullOutcome::Updated));

        let saved = manager.store().load().unwrap();
        assert_eq!(
            saved.content.get("name"),
            Some(&serde_json::Value::String("X".into()))
        );
    }

    #[test]
    fn pull_remote_strictly_newer_overwrites() {
        let (_dir, manager) = manager_with_id(42);
        manager.store().save(&remote_workspace(42, "local")).unwrap();
        let mtime = manager.store().modified_at().unwrap().unwrap();

        let mut remote = remote_workspace(42, "remote");
        remote.last_modified_date = Some(mtime + Duration::hours(1));
        manager.api.set_get_response(Ok(remote));

        assert!(matches!(manager.pull(), PullOutcome::Updated));
        let saved = manager.store().load().unwrap();
        assert_eq!(
            saved.content.get("name"),
            Some(&serde_json::Value::String("remote".into()))
        );
    }

    #[test]
    fn pull_equal_timestamps_does_not_overwrite() {
        let (_dir, manager) = manager_with_id(42);
        manager.store().save(&remote_workspace(42, "local")).unwrap();
        let mtime = manager.store().modified_at().unwrap().unwrap();

        let mut remote = remote_workspace(42, "remote");
        remote.last_modified_date = Some(mtime);
        manager.api.set_get_response(Ok(remote));

        assert!(matches!(manager.pull(), PullOutcome::SkippedLocalNewer));
        let saved = manager.store().load().unwrap();
        assert_eq!(
            saved.content.get("name"),
            Some(&serde_json::Value::String("local".into()))
        );
    }

    #[test]
    fn pull_remote_older_does_not_overwrite() {
        let (_dir, manager) = manager_with_id(42);
        manager.store().save(&remote_workspace(42, "local")).unwrap();
        let mtime = manager.store().modified_at().unwrap().unwrap();

        let mut remote = remote_workspace(42, "remote");
        remote.last_modified_date = Some(mtime - Duration::hours(1));
        manager.api.set_get_response(Ok(remote));

        assert!(matches!(manager.pull(), PullOutcome::SkippedLocalNewer));
    }

    #[test]
    fn pull_remote_without_timestamp_does_not_overwrite_existing() {
        let (_dir, manager) = manager_with_id(42);
        manager.store().save(&remote_workspace(42, "local")).unwrap();
        manager
            .api
            .set_get_response(Ok(remote_workspace(42, "remote")));

        assert!(matches!(manager.pull(), PullOutcome::SkippedLocalNewer));
    }

    #[test]
    fn pull_failure_leaves_local_untouched() {
        let (_dir, manager) = manager_with_id(42);
        manager.store().save(&remote_workspace(42, "local")).unwrap();
        manager
            .api
            .set_get_response(Err(ClientError::Network("unreachable".into())));

        let outcome = manager.pull();
        assert!(matches!(outcome, PullOutcome::Failed(_)));

        let saved = manager.store().load().unwrap();
        assert_eq!(
            saved.content.get("name"),
            Some(&serde_json::Value::String("local".into()))
        );
        // Startup continues: the lifecycle still advances.
        assert_eq!(manager.phase(), SyncPhase::Pulled);
    }

    #[test]
    fn pull_executes_at_most_once() {
        let (_dir, manager) = manager_with_id(42);
        manager
            .api
            .set_get_response(Ok(remote_workspace(42, "remote")));

        manager.pull();
        let second = manager.pull();
        assert!(matches!(
            second,
            PullOutcome::Failed(SyncError::InvalidPhase { .. })
        ));
        assert_eq!(manager.api.get_calls().len(), 1);
    }

    #[test]
    fn push_strips_revision() {
        let (_dir, manager) = manager_with_id(42);
        let mut local = remote_workspace(42, "local");
        local.revision = Some("17".into());
        manager.store().save(&local).unwrap();
        manager.api.set_put_response(Ok(()));

        manager.pull();
        let outcome = manager.push();
        assert!(matches!(outcome, PushOutcome::Pushed));

        let puts = manager.api.put_calls();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].0, 42);
        assert!(puts[0].1.revision.is_none());
        // The on-disk copy keeps its revision; only the pushed value is reset.
        assert_eq!(manager.store().load().unwrap().revision.as_deref(), Some("17"));
    }

    #[test]
    fn push_with_missing_local_file_sends_nothing() {
        let (_dir, manager) = manager_with_id(42);
        manager.api.set_put_response(Ok(()));

        manager.pull();
        let outcome = manager.push();
        assert!(matches!(outcome, PushOutcome::NothingToPush(_)));
        assert!(manager.api.put_calls().is_empty());
    }

    #[test]
    fn push_failure_still_stops() {
        let (_dir, manager) = manager_with_id(42);
        manager.store().save(&remote_workspace(42, "local")).unwrap();
        manager
            .api
            .set_put_response(Err(ClientError::Network("unreachable".into())));

        manager.pull();
        let outcome = manager.push();
        assert!(matches!(outcome, PushOutcome::Failed(_)));
        assert_eq!(manager.phase(), SyncPhase::Stopped);
    }

    #[test]
    fn push_executes_at_most_once() {
        let (_dir, manager) = manager_with_id(42);
        manager.store().save(&remote_workspace(42, "local")).unwrap();
        manager.api.set_put_response(Ok(()));

        manager.pull();
        manager.push();
        let second = manager.push();
        assert!(matches!(
            second,
            PushOutcome::Failed(SyncError::InvalidPhase { .. })
        ));
        assert_eq!(manager.api.put_calls().len(), 1);
    }

    #[test]
    fn push_before_pull_is_rejected() {
        let (_dir, manager) = manager_with_id(42);
        let outcome = manager.push();
        assert!(matches!(
            outcome,
            PushOutcome::Failed(SyncError::InvalidPhase { .. })
        ));
    }

    #[test]
    fn mark_pulled_enables_push_without_io() {
        let (_dir, manager) = manager_with_id(42);
        manager.store().save(&remote_workspace(42, "local")).unwrap();
        manager.api.set_put_response(Ok(()));

        manager.mark_pulled().unwrap();
        assert!(manager.api.get_calls().is_empty());
        assert!(manager.mark_pulled().is_err());

        assert!(matches!(manager.push(), PushOutcome::Pushed));
    }

    #[test]
    fn lifecycle_walks_forward() {
        let (_dir, manager) = manager_with_id(0);
        assert_eq!(manager.phase(), SyncPhase::NotStarted);

        manager.pull();
        assert_eq!(manager.phase(), SyncPhase::Pulled);

        manager.mark_running().unwrap();
        assert_eq!(manager.phase(), SyncPhase::Running);
        assert!(manager.mark_running().is_err());

        manager.push();
        assert_eq!(manager.phase(), SyncPhase::Stopped);
    }
}
