//! # Worksync Client
//!
//! The remote workspace service client.
//!
//! This crate provides:
//! - [`WorkspaceApi`] - the narrow interface the sync engine consumes
//!   (get-by-id and put-by-id, nothing else)
//! - [`HttpWorkspaceClient`] - an adapter over a pluggable [`HttpClient`]
//!   trait that attaches the agent string, the attribution username, and the
//!   optional payload cipher
//! - [`PassphraseCipher`] - symmetric AES-256-GCM payload encryption keyed
//!   by a passphrase alone
//! - [`MockWorkspaceApi`] - a scripted test double
//!
//! ## Design
//!
//! The actual HTTP library is abstracted behind [`HttpClient`], so library
//! consumers choose their own transport (the CLI binds `reqwest`). The
//! adapter performs no merge-from-remote reconciliation: a put uploads local
//! content as-is, and the sync engine owns the entire conflict policy.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod crypto;
mod error;
mod http;

pub use api::{MockWorkspaceApi, WorkspaceApi};
pub use crypto::{PassphraseCipher, NONCE_SIZE, SALT_SIZE, TAG_SIZE};
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, HttpResponse, HttpWorkspaceClient, RemoteEnvelope, RemoteOptions};

/// Agent string sent with every remote request, embedding the build number.
pub const AGENT: &str = concat!("worksync/", env!("CARGO_PKG_VERSION"));
