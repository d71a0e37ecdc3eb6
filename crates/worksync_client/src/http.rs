//! HTTP adapter for the remote workspace service.
//!
//! The actual HTTP library is abstracted behind the [`HttpClient`] trait so
//! different implementations can be plugged in (reqwest, hyper, a loopback
//! double for tests). The adapter layers the service conventions on top of
//! the raw transport: the agent string, the attribution username, the API
//! credentials, and the optional payload cipher.

use crate::api::WorkspaceApi;
use crate::crypto::PassphraseCipher;
use crate::error::{ClientError, ClientResult};
use crate::AGENT;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use worksync_model::Workspace;

/// HTTP client abstraction.
///
/// Implement this trait to provide the actual transport. Only the two verbs
/// the workspace service needs are modeled.
pub trait HttpClient: Send + Sync {
    /// Sends a GET request and returns the response.
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, String>;

    /// Sends a PUT request with a JSON body and returns the response.
    fn put(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: Vec<u8>,
    ) -> Result<HttpResponse, String>;
}

/// A raw HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

/// Connection options for the remote workspace service.
#[derive(Debug, Clone)]
pub struct RemoteOptions {
    /// Base URL of the service, without a trailing slash.
    pub api_url: String,
    /// API key credential.
    pub api_key: String,
    /// API secret credential.
    pub api_secret: String,
    /// Attribution username sent with every request, if configured.
    pub username: Option<String>,
    /// Payload passphrase; `Some` activates encryption.
    pub passphrase: Option<String>,
}

impl RemoteOptions {
    /// Creates options with the given endpoint and credentials.
    #[must_use]
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        let mut api_url = api_url.into();
        while api_url.ends_with('/') {
            api_url.pop();
        }
        Self {
            api_url,
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            username: None,
            passphrase: None,
        }
    }

    /// Sets the attribution username. Empty strings are treated as unset.
    #[must_use]
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username.filter(|u| !u.is_empty());
        self
    }

    /// Sets the payload passphrase. Empty strings are treated as unset.
    #[must_use]
    pub fn with_passphrase(mut self, passphrase: Option<String>) -> Self {
        self.passphrase = passphrase.filter(|p| !p.is_empty());
        self
    }
}

/// The wire envelope exchanged with the remote service.
///
/// The envelope's `last_modified_date` mirrors the document's so the remote
/// service can index it without decrypting the payload. When `encrypted` is
/// set, `payload` is base64 ciphertext; otherwise it is the workspace JSON
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEnvelope {
    /// Workspace id.
    pub id: i64,
    /// Last-modified timestamp of the enclosed document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
    /// Whether `payload` is ciphertext.
    #[serde(default)]
    pub encrypted: bool,
    /// The document payload: workspace JSON, or base64 ciphertext.
    pub payload: String,
}

/// HTTP-backed implementation of [`WorkspaceApi`].
///
/// Performs no merge-from-remote reconciliation: a put uploads the local
/// document as-is. The sync engine owns the conflict policy.
pub struct HttpWorkspaceClient<C: HttpClient> {
    options: RemoteOptions,
    cipher: Option<PassphraseCipher>,
    client: C,
}

impl<C: HttpClient> HttpWorkspaceClient<C> {
    /// Creates a client from connection options and a transport.
    ///
    /// A cipher is bound iff the options carry a passphrase.
    #[must_use]
    pub fn new(options: RemoteOptions, client: C) -> Self {
        let cipher = options.passphrase.as_deref().map(PassphraseCipher::new);
        Self {
            options,
            cipher,
            client,
        }
    }

    /// Returns the base URL of the remote service.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.options.api_url
    }

    /// Returns true if payload encryption is active.
    #[must_use]
    pub fn encrypts_payload(&self) -> bool {
        self.cipher.is_some()
    }

    fn workspace_url(&self, id: i64) -> String {
        format!("{}/workspace/{}", self.options.api_url, id)
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("User-Agent".to_string(), AGENT.to_string()),
            ("X-Api-Key".to_string(), self.options.api_key.clone()),
            ("X-Api-Secret".to_string(), self.options.api_secret.clone()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];
        if let Some(user) = &self.options.username {
            headers.push(("X-User".to_string(), user.clone()));
        }
        headers
    }

    fn check_status(&self, id: i64, response: HttpResponse) -> ClientResult<Vec<u8>> {
        match response.status {
            200..=299 => Ok(response.body),
            401 | 403 => Err(ClientError::Auth(format!(
                "remote service rejected credentials (status {})",
                response.status
            ))),
            404 => Err(ClientError::NotFound { id }),
            409 => Err(ClientError::Conflict { id }),
            status => Err(ClientError::Server {
                status,
                message: String::from_utf8_lossy(&response.body).into_owned(),
            }),
        }
    }

    fn decode_envelope(&self, body: &[u8]) -> ClientResult<Workspace> {
        let envelope: RemoteEnvelope = serde_json::from_slice(body)
            .map_err(|e| ClientError::Protocol(format!("invalid remote envelope: {e}")))?;

        let document = if envelope.encrypted {
            let cipher = self.cipher.as_ref().ok_or_else(|| {
                ClientError::Decryption(
                    "payload is encrypted but no passphrase is configured".into(),
                )
            })?;
            let ciphertext = BASE64
                .decode(envelope.payload.as_bytes())
                .map_err(|e| ClientError::Protocol(format!("invalid base64 payload: {e}")))?;
            cipher.decrypt(&ciphertext)?
        } else {
            envelope.payload.into_bytes()
        };

        let mut workspace = Workspace::from_json(&document)?;
        // Older documents may lack their own timestamp; the envelope's is
        // the remote service's authoritative value in that case.
        if workspace.last_modified_date.is_none() {
            workspace.last_modified_date = envelope.last_modified_date;
        }
        Ok(workspace)
    }

    fn encode_envelope(&self, id: i64, workspace: &Workspace) -> ClientResult<Vec<u8>> {
        let document = workspace.to_json()?;

        let (encrypted, payload) = match &self.cipher {
            Some(cipher) => (true, BASE64.encode(cipher.encrypt(&document)?)),
            None => (
                false,
                String::from_utf8(document)
                    .map_err(|e| ClientError::Protocol(format!("non-UTF-8 document: {e}")))?,
            ),
        };

        let envelope = RemoteEnvelope {
            id,
            last_modified_date: workspace.last_modified_date,
            encrypted,
            payload,
        };

        serde_json::to_vec(&envelope)
            .map_err(|e| ClientError::Protocol(format!("envelope encoding failed: {e}")))
    }
}

impl<C: HttpClient> WorkspaceApi for HttpWorkspaceClient<C> {
    fn get_workspace(&self, id: i64) -> ClientResult<Workspace> {
        let response = self
            .client
            .get(&self.workspace_url(id), &self.headers())
            .map_err(ClientError::Network)?;

        let body = self.check_status(id, response)?;
        self.decode_envelope(&body)
    }

    fn put_workspace(&self, id: i64, workspace: &Workspace) -> ClientResult<()> {
        let body = self.encode_envelope(id, workspace)?;

        let response = self
            .client
            .put(&self.workspace_url(id), &self.headers(), body)
            .map_err(ClientError::Network)?;

        self.check_status(id, response)?;
        Ok(())
    }
}
