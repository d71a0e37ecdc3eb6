//! The remote workspace service interface.

use crate::error::{ClientError, ClientResult};
use std::sync::Mutex;
use worksync_model::Workspace;

/// The narrow interface the sync engine consumes.
///
/// Two operations only: fetch a workspace by id and store a workspace by id.
/// Implementations handle transport, authentication, and payload encryption;
/// the engine never sees any of that.
pub trait WorkspaceApi: Send + Sync {
    /// Fetches the remote workspace, including its last-modified timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the workspace does not exist, the credentials are
    /// rejected, or the transport fails.
    fn get_workspace(&self, id: i64) -> ClientResult<Workspace>;

    /// Uploads the workspace; the remote service assigns a new revision.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected, the remote reports
    /// a conflict, or the transport fails.
    fn put_workspace(&self, id: i64, workspace: &Workspace) -> ClientResult<()>;
}

/// A scripted workspace API for tests.
///
/// Records every call and hands back pre-set responses, so engine tests can
/// assert call counts and captured payloads without any network.
#[derive(Debug, Default)]
pub struct MockWorkspaceApi {
    get_response: Mutex<Option<ClientResult<Workspace>>>,
    put_response: Mutex<Option<ClientResult<()>>>,
    get_calls: Mutex<Vec<i64>>,
    put_calls: Mutex<Vec<(i64, Workspace)>>,
}

impl MockWorkspaceApi {
    /// Creates a new mock with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the next (and every subsequent) get response.
    pub fn set_get_response(&self, response: ClientResult<Workspace>) {
        *self.get_response.lock().unwrap() = Some(response);
    }

    /// Scripts the next (and every subsequent) put response.
    pub fn set_put_response(&self, response: ClientResult<()>) {
        *self.put_response.lock().unwrap() = Some(response);
    }

    /// Returns the ids passed to `get_workspace`, in call order.
    #[must_use]
    pub fn get_calls(&self) -> Vec<i64> {
        self.get_calls.lock().unwrap().clone()
    }

    /// Returns the (id, workspace) pairs passed to `put_workspace`.
    #[must_use]
    pub fn put_calls(&self) -> Vec<(i64, Workspace)> {
        self.put_calls.lock().unwrap().clone()
    }

    fn clone_result<T: Clone>(slot: &Mutex<Option<ClientResult<T>>>) -> ClientResult<T> {
        match slot.lock().unwrap().as_ref() {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(e)) => Err(ClientError::Network(e.to_string())),
            None => Err(ClientError::Protocol("no mock response set".into())),
        }
    }
}

impl WorkspaceApi for MockWorkspaceApi {
    fn get_workspace(&self, id: i64) -> ClientResult<Workspace> {
        self.get_calls.lock().unwrap().push(id);
        Self::clone_result(&self.get_response)
    }

    fn put_workspace(&self, id: i64, workspace: &Workspace) -> ClientResult<()> {
        self.put_calls.lock().unwrap().push((id, workspace.clone()));
        Self::clone_result(&self.put_response)
    }
}
