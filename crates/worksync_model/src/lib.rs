//! # Worksync Model
//!
//! The `Workspace` document type and its JSON codec.
//!
//! A workspace is the unit of synchronization: an opaque document body plus
//! the three envelope fields the sync engine cares about (remote id, remote
//! revision token, last-modified timestamp). Everything else in the document
//! is owned by the external document-model library and round-trips through
//! this crate untouched.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod workspace;

pub use error::{ModelError, ModelResult};
pub use workspace::Workspace;
