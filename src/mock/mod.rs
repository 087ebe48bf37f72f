//! Mock collaborators
//!
//! Configurable in-memory implementations of the four collaborator
//! contracts, for driving the resolution engine without a real host.
//! Supports failure injection for testing the discovery boundary.
//!
//! Build a [`MockCollaborators`] bundle with the `with_*` methods, then
//! borrow a [`ToolContext`](strata_model::ToolContext) from it:
//!
//! - `MockOptionStore`: per-kind user and undefine option values, with
//!   write recording so tests can assert the serialized form
//! - `MockDiscoveryProvider`: per-kind discovered entries, call counting,
//!   fail-always and fail-N-times-then-succeed injection
//! - `MockBuildPathProvider`: fixed toolchain include/library paths
//! - `MockPathMapper`: `${workspace}`-prefix location mapping

mod provider;
mod store;

pub use provider::{
    FailureMode, MockBuildPathProvider, MockCollaborators, MockDiscoveryProvider, MockPathMapper,
};
pub use store::MockOptionStore;
