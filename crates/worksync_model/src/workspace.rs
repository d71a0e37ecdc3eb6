//! The workspace document type.

use crate::error::ModelResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A synchronized workspace document.
///
/// The sync engine only interprets three fields: the remote `id`, the opaque
/// `revision` token assigned by the remote service, and the last-modified
/// timestamp used for conflict avoidance. The rest of the document is carried
/// in [`content`](Self::content) and round-trips byte-for-byte in meaning
/// (field order aside) through serialization.
///
/// # Invariants
///
/// - An unset `revision` is never serialized, so a pushed document physically
///   cannot carry a stale revision token.
/// - `id <= 0` means the workspace has no remote counterpart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// Identity of the document in the remote service.
    #[serde(default)]
    pub id: i64,

    /// Opaque version token assigned by the remote service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,

    /// Timestamp of the last content change (RFC 3339 on the wire).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,

    /// The opaque document body. Unknown fields land here and are preserved.
    #[serde(flatten)]
    pub content: Map<String, Value>,
}

impl Workspace {
    /// Creates an empty workspace with the given remote id.
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self {
            id,
            revision: None,
            last_modified_date: None,
            content: Map::new(),
        }
    }

    /// Clears the revision token.
    ///
    /// Called before every push so the remote service assigns a fresh
    /// revision instead of rejecting a stale one.
    pub fn clear_revision(&mut self) {
        self.revision = None;
    }

    /// Stamps the last-modified timestamp with the current time.
    pub fn touch(&mut self) {
        self.last_modified_date = Some(Utc::now());
    }

    /// Decodes a workspace from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid JSON document.
    pub fn from_json(bytes: &[u8]) -> ModelResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Encodes the workspace as compact JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> ModelResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Encodes the workspace as pretty-printed JSON bytes.
    ///
    /// Used for the on-disk copy, which people open in editors.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> ModelResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}
