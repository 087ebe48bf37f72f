//! Error types at the collaborator boundary.

use crate::EntryKind;

/// Errors surfaced by an option store write.
///
/// The read side of the store is infallible; only writing values back can
/// be rejected by the host's persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum OptionStoreError {
    #[error("option values for {kind} rejected: {reason}")]
    Rejected { kind: EntryKind, reason: String },

    #[error("option store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by a discovered-entry provider query.
///
/// The engine never propagates these: a failed query is logged and treated
/// as an empty result, so resolution always sees a total function.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("discovery query failed: {0}")]
    QueryFailed(String),
}
