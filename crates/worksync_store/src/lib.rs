//! # Worksync Store
//!
//! The local workspace store: exactly one JSON file on disk.
//!
//! This crate owns the only file path the sync engine ever touches. It
//! provides three operations:
//!
//! - load the workspace document from disk
//! - save it atomically (write-to-temp-then-rename)
//! - probe the file's modification time without reading the body
//!
//! The modification time is the engine's cheap conflict signal: it is
//! compared against the remote document's last-modified timestamp to decide
//! whether a pull may overwrite local work.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod store;

pub use error::{StoreError, StoreResult};
pub use store::LocalWorkspaceStore;
