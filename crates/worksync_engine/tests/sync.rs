//! End-to-end lifecycle tests: pull at start, push at stop.

use chrono::{DateTime, Utc};
use tempfile::tempdir;
use worksync_client::{ClientError, MockWorkspaceApi};
use worksync_engine::{PullOutcome, PushOutcome, SyncManager, SyncPhase, SyncSettings};
use worksync_model::Workspace;

fn remote_document() -> Workspace {
    let mut ws = Workspace::new(42);
    ws.revision = Some("9".into());
    ws.last_modified_date = Some("2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
    ws.content
        .insert("name".into(), serde_json::Value::String("X".into()));
    ws
}

#[test]
fn full_lifecycle_pull_run_push() {
    let dir = tempdir().unwrap();
    let settings = SyncSettings::new(dir.path(), 42)
        .with_remote_api("https://api.example.com", "key", "secret");

    let api = MockWorkspaceApi::new();
    api.set_get_response(Ok(remote_document()));
    api.set_put_response(Ok(()));

    let manager = SyncManager::new(settings, api);

    // Start of life: local file absent, remote copy wins.
    assert!(matches!(manager.pull(), PullOutcome::Updated));
    let local = manager.store().load().unwrap();
    assert_eq!(
        local.content.get("name"),
        Some(&serde_json::Value::String("X".into()))
    );

    // Running phase: the engine is dormant while the host does its work.
    manager.mark_running().unwrap();
    assert_eq!(manager.phase(), SyncPhase::Running);

    // End of life: push reads the file and uploads exactly once, with the
    // revision token stripped.
    assert!(matches!(manager.push(), PushOutcome::Pushed));

    let puts = manager.api().put_calls();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].0, 42);
    assert!(puts[0].1.revision.is_none());
    assert_eq!(
        puts[0].1.content.get("name"),
        Some(&serde_json::Value::String("X".into()))
    );

    assert_eq!(manager.phase(), SyncPhase::Stopped);
}

#[test]
fn remote_outage_never_aborts_the_lifecycle() {
    let dir = tempdir().unwrap();
    let settings = SyncSettings::new(dir.path(), 42);

    let api = MockWorkspaceApi::new();
    api.set_get_response(Err(ClientError::Network("connection refused".into())));
    api.set_put_response(Err(ClientError::Network("connection refused".into())));

    let manager = SyncManager::new(settings, api);

    // Pull fails; the process still reaches its running phase.
    assert!(matches!(manager.pull(), PullOutcome::Failed(_)));
    manager.mark_running().unwrap();

    // Nothing was ever written locally, so the push has nothing to send;
    // the process still stops cleanly.
    assert!(matches!(manager.push(), PushOutcome::NothingToPush(_)));
    assert_eq!(manager.phase(), SyncPhase::Stopped);
}

#[test]
fn remote_outage_during_push_with_local_edits() {
    let dir = tempdir().unwrap();
    let settings = SyncSettings::new(dir.path(), 42);

    let api = MockWorkspaceApi::new();
    api.set_get_response(Ok(remote_document()));
    api.set_put_response(Err(ClientError::Network("connection refused".into())));

    let manager = SyncManager::new(settings, api);
    manager.pull();
    manager.mark_running().unwrap();

    // The upload fails; the outcome surfaces the data-loss risk, the
    // lifecycle completes anyway.
    assert!(matches!(manager.push(), PushOutcome::Failed(_)));
    assert_eq!(manager.phase(), SyncPhase::Stopped);
    // The local copy survives for the next process lifetime.
    assert!(manager.store().exists());
}

#[test]
fn disabled_sync_is_a_complete_noop() {
    let dir = tempdir().unwrap();
    let settings = SyncSettings::new(dir.path(), 0);

    let manager = SyncManager::new(settings, MockWorkspaceApi::new());

    assert!(matches!(manager.pull(), PullOutcome::Disabled));
    manager.mark_running().unwrap();
    assert!(matches!(manager.push(), PushOutcome::Disabled));

    assert!(manager.api().get_calls().is_empty());
    assert!(manager.api().put_calls().is_empty());
    assert!(!manager.store().exists());
}
