//! # Worksync Engine
//!
//! Keeps a locally persisted workspace consistent with a remote versioned
//! copy across process start and stop.
//!
//! This crate provides:
//! - Sync lifecycle state machine (not-started → pulled → running → pushed → stopped)
//! - The pull-on-start algorithm with its timestamp conflict-avoidance rule
//! - The push-on-stop algorithm with its revision-reset rule
//! - Immutable sync settings, read once at construction
//!
//! ## Key invariants
//!
//! - Pull and push each execute exactly once per process lifetime
//! - A pull never overwrites a local file that is at least as new as the
//!   remote copy (local edits win ties)
//! - A push never transmits a revision token
//! - No sync failure ever aborts process startup or shutdown: every error is
//!   logged at the engine boundary and converted into an outcome value
//!
//! ## Conflict avoidance
//!
//! The sole mechanism is a coarse timestamp comparison: the local file is
//! overwritten on pull iff the remote document is strictly newer than the
//! file's mtime. There is no clock-skew tolerance; skew between the local
//! filesystem clock and the remote service clock is a documented limitation.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod lifecycle;
mod manager;
mod settings;

pub use error::{SyncError, SyncResult};
pub use lifecycle::SyncPhase;
pub use manager::{PullOutcome, PushOutcome, SyncManager};
pub use settings::SyncSettings;
